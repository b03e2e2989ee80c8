//! Shared fixtures for integration tests: throwaway certificate material and
//! a ready-to-use configuration rooted in a temp directory.

use openssl::asn1::Asn1Time;
use openssl::bn::{BigNum, MsbOption};
use openssl::hash::MessageDigest;
use openssl::pkcs12::Pkcs12;
use openssl::pkey::{PKey, Private};
use openssl::rsa::Rsa;
use openssl::x509::extension::BasicConstraints;
use openssl::x509::{X509Builder, X509Name, X509NameBuilder, X509};
use pass_generator::PassConfig;
use std::fs;
use std::path::{Path, PathBuf};

pub const STORE_PASSWORD: &str = "secret";

pub struct TestEnv {
    pub config: PassConfig,
    pub ca_cert_pem: Vec<u8>,
}

fn name(common_name: &str) -> X509Name {
    let mut builder = X509NameBuilder::new().unwrap();
    builder.append_entry_by_text("C", "US").unwrap();
    builder.append_entry_by_text("O", "Pass Generator Tests").unwrap();
    builder.append_entry_by_text("CN", common_name).unwrap();
    builder.build()
}

fn random_serial() -> openssl::asn1::Asn1Integer {
    let mut serial = BigNum::new().unwrap();
    serial.rand(128, MsbOption::MAYBE_ZERO, false).unwrap();
    serial.to_asn1_integer().unwrap()
}

fn make_ca() -> (X509, PKey<Private>) {
    let key = PKey::from_rsa(Rsa::generate(2048).unwrap()).unwrap();
    let ca_name = name("Test Worldwide Developer Relations CA");

    let mut builder = X509Builder::new().unwrap();
    builder.set_version(2).unwrap();
    builder.set_serial_number(&random_serial()).unwrap();
    builder.set_subject_name(&ca_name).unwrap();
    builder.set_issuer_name(&ca_name).unwrap();
    builder.set_pubkey(&key).unwrap();
    builder
        .set_not_before(&Asn1Time::days_from_now(0).unwrap())
        .unwrap();
    builder
        .set_not_after(&Asn1Time::days_from_now(365).unwrap())
        .unwrap();
    builder
        .append_extension(BasicConstraints::new().critical().ca().build().unwrap())
        .unwrap();
    builder.sign(&key, MessageDigest::sha256()).unwrap();

    (builder.build(), key)
}

fn make_leaf(ca: &X509, ca_key: &PKey<Private>) -> (X509, PKey<Private>) {
    let key = PKey::from_rsa(Rsa::generate(2048).unwrap()).unwrap();

    let mut builder = X509Builder::new().unwrap();
    builder.set_version(2).unwrap();
    builder.set_serial_number(&random_serial()).unwrap();
    builder
        .set_subject_name(&name("Pass Type ID: pass.com.example.demo"))
        .unwrap();
    builder.set_issuer_name(ca.subject_name()).unwrap();
    builder.set_pubkey(&key).unwrap();
    builder
        .set_not_before(&Asn1Time::days_from_now(0).unwrap())
        .unwrap();
    builder
        .set_not_after(&Asn1Time::days_from_now(365).unwrap())
        .unwrap();
    builder.sign(ca_key, MessageDigest::sha256()).unwrap();

    (builder.build(), key)
}

/// Generate certificates under `root` and return a configuration pointing at
/// them, with passes persisted under `root/passes`.
pub fn test_env(root: &Path) -> TestEnv {
    let (ca_cert, ca_key) = make_ca();
    let (leaf_cert, leaf_key) = make_leaf(&ca_cert, &ca_key);

    let pkcs12 = Pkcs12::builder()
        .name("pass")
        .pkey(&leaf_key)
        .cert(&leaf_cert)
        .build2(STORE_PASSWORD)
        .unwrap();

    let cert_store_path = root.join("pass.p12");
    fs::write(&cert_store_path, pkcs12.to_der().unwrap()).unwrap();

    let ca_cert_pem = ca_cert.to_pem().unwrap();
    let wwdr_certificate_path = root.join("wwdr.pem");
    fs::write(&wwdr_certificate_path, &ca_cert_pem).unwrap();

    TestEnv {
        config: PassConfig {
            certificate_store_path: cert_store_path,
            certificate_store_password: STORE_PASSWORD.to_string(),
            wwdr_certificate_path,
            pass_type_identifier: "pass.com.example.demo".to_string(),
            organization_name: "Example Corp".to_string(),
            team_identifier: "AB12CD34EF".to_string(),
            storage_root: root.join("passes"),
            overwrite_existing: false,
        },
        ca_cert_pem,
    }
}

/// Write an asset file and return its path
pub fn write_asset(dir: &Path, basename: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(basename);
    fs::write(&path, contents).unwrap();
    path
}
