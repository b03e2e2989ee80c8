//! Certificate loading and validation.
//!
//! The signing identity lives in a password-protected PKCS#12 store issued by
//! Apple; the WWDR intermediate arrives separately as a plain PEM file. Both
//! must load and parse before any bundle work starts, and neither changes
//! for the lifetime of a generator instance.

use crate::infra::error::{PassError, PassResult};
use openssl::pkcs12::Pkcs12;
use openssl::pkey::{PKey, Private};
use openssl::x509::X509;
use std::fs;
use std::path::Path;

/// The validated signing material for one generator instance
#[derive(Debug)]
pub struct SigningIdentity {
    certificate: X509,
    private_key: PKey<Private>,
    wwdr_certificate: X509,
}

impl SigningIdentity {
    /// Load and unlock the PKCS#12 store and parse the WWDR intermediate.
    pub fn load<P: AsRef<Path>>(
        cert_store_path: P,
        cert_store_password: &str,
        wwdr_cert_path: P,
    ) -> PassResult<Self> {
        let cert_store_path = cert_store_path.as_ref();
        let wwdr_cert_path = wwdr_cert_path.as_ref();

        let store_bytes = fs::read(cert_store_path).map_err(|e| {
            PassError::ConfigurationError(format!(
                "No certificate store found at {}: {}",
                cert_store_path.display(),
                e
            ))
        })?;

        let pkcs12 = Pkcs12::from_der(&store_bytes).map_err(|e| {
            PassError::CredentialError(format!(
                "The certificate store at {} is not a valid PKCS#12 container: {}",
                cert_store_path.display(),
                e
            ))
        })?;

        let parsed = pkcs12.parse2(cert_store_password).map_err(|e| {
            PassError::CredentialError(format!("The certificate store could not be unlocked: {e}"))
        })?;

        let certificate = parsed.cert.ok_or_else(|| {
            PassError::CredentialError(
                "The certificate store contains no certificate".to_string(),
            )
        })?;
        let private_key = parsed.pkey.ok_or_else(|| {
            PassError::CredentialError(
                "The certificate store contains no private key".to_string(),
            )
        })?;

        let wwdr_bytes = fs::read(wwdr_cert_path).map_err(|e| {
            PassError::ConfigurationError(format!(
                "No intermediate certificate found at {}: {}",
                wwdr_cert_path.display(),
                e
            ))
        })?;

        // The WWDR certificate must be PEM; Apple distributes it as DER, so
        // point people at the conversion rather than a bare parse error.
        let wwdr_certificate = X509::from_pem(&wwdr_bytes).map_err(|e| {
            PassError::FormatError(format!(
                "The intermediate certificate at {} is not valid PEM X.509 \
                 (the DER download from Apple must be exported to PEM): {}",
                wwdr_cert_path.display(),
                e
            ))
        })?;

        log::info!(
            "Loaded signing identity from {} with WWDR intermediate {}",
            cert_store_path.display(),
            wwdr_cert_path.display()
        );

        Ok(Self {
            certificate,
            private_key,
            wwdr_certificate,
        })
    }

    /// The leaf pass ID certificate
    #[must_use]
    pub fn certificate(&self) -> &X509 {
        &self.certificate
    }

    /// The leaf certificate's private key
    #[must_use]
    pub fn private_key(&self) -> &PKey<Private> {
        &self.private_key
    }

    /// The WWDR intermediate certificate
    #[must_use]
    pub fn wwdr_certificate(&self) -> &X509 {
        &self.wwdr_certificate
    }
}
