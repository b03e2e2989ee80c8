//! Certificate fixtures for unit tests: a throwaway CA standing in for the
//! WWDR intermediate, a leaf pass certificate issued by it, and a PKCS#12
//! store wrapping the leaf.

use openssl::asn1::Asn1Time;
use openssl::bn::{BigNum, MsbOption};
use openssl::hash::MessageDigest;
use openssl::pkcs12::Pkcs12;
use openssl::pkey::{PKey, Private};
use openssl::rsa::Rsa;
use openssl::x509::extension::BasicConstraints;
use openssl::x509::{X509Builder, X509Name, X509NameBuilder, X509};
use std::fs;
use std::path::{Path, PathBuf};

/// Paths and raw material produced by `write_test_material`
pub struct TestMaterial {
    pub cert_store: PathBuf,
    pub wwdr_cert: PathBuf,
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

/// Self-signed CA certificate plus its key
pub fn make_ca() -> (X509, PKey<Private>) {
    let rsa = Rsa::generate(2048).unwrap();
    let key = PKey::from_rsa(rsa).unwrap();

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

/// Leaf certificate issued by the CA, with its own key
pub fn make_leaf(ca: &X509, ca_key: &PKey<Private>) -> (X509, PKey<Private>) {
    let rsa = Rsa::generate(2048).unwrap();
    let key = PKey::from_rsa(rsa).unwrap();

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

/// Write a PKCS#12 store and a PEM intermediate into `dir` and return the
/// paths alongside the CA PEM for verification.
pub fn write_test_material(dir: &Path, password: &str) -> TestMaterial {
    let (ca_cert, ca_key) = make_ca();
    let (leaf_cert, leaf_key) = make_leaf(&ca_cert, &ca_key);

    let pkcs12 = Pkcs12::builder()
        .name("pass")
        .pkey(&leaf_key)
        .cert(&leaf_cert)
        .build2(password)
        .unwrap();

    let cert_store = dir.join("pass.p12");
    fs::write(&cert_store, pkcs12.to_der().unwrap()).unwrap();

    let ca_cert_pem = ca_cert.to_pem().unwrap();
    let wwdr_cert = dir.join("wwdr.pem");
    fs::write(&wwdr_cert, &ca_cert_pem).unwrap();

    TestMaterial {
        cert_store,
        wwdr_cert,
        ca_cert_pem,
    }
}
