//! Detached PKCS#7 signing of the manifest.
//!
//! PassKit expects the `signature` archive member to be the raw DER
//! `SignedData` with the manifest content detached and the WWDR intermediate
//! included in the chain. The upstream implementation produced an S/MIME
//! envelope and scraped the base64 body out from between literal header and
//! boundary strings; `Pkcs7::to_der` gives the binary structure directly, so
//! no envelope ever exists here.

use crate::infra::error::{PassError, PassResult};
use crate::services::certificates::SigningIdentity;
use openssl::pkcs7::{Pkcs7, Pkcs7Flags};
use openssl::stack::Stack;
use openssl::x509::X509;

/// Signs manifest bytes with a loaded identity
pub struct ManifestSigner<'a> {
    identity: &'a SigningIdentity,
}

impl<'a> ManifestSigner<'a> {
    #[must_use]
    pub fn new(identity: &'a SigningIdentity) -> Self {
        Self { identity }
    }

    /// Produce the raw DER detached signature over the exact manifest bytes.
    ///
    /// Binary mode keeps OpenSSL from canonicalizing line endings in the
    /// content before digesting, so what is signed is byte-for-byte what
    /// lands in the archive as manifest.json.
    pub fn sign(&self, manifest_bytes: &[u8]) -> PassResult<Vec<u8>> {
        let mut chain = Stack::<X509>::new().map_err(|e| {
            PassError::SigningError(format!("Failed to allocate certificate stack: {e}"))
        })?;
        chain
            .push(self.identity.wwdr_certificate().clone())
            .map_err(|e| {
                PassError::SigningError(format!(
                    "Failed to add the WWDR certificate to the chain: {e}"
                ))
            })?;

        let pkcs7 = Pkcs7::sign(
            self.identity.certificate(),
            self.identity.private_key(),
            &chain,
            manifest_bytes,
            Pkcs7Flags::DETACHED | Pkcs7Flags::BINARY,
        )
        .map_err(|e| PassError::SigningError(format!("PKCS#7 signing failed: {e}")))?;

        let der = pkcs7
            .to_der()
            .map_err(|e| PassError::SigningError(format!("PKCS#7 DER encoding failed: {e}")))?;

        log::debug!("Signed manifest: {} byte detached signature", der.len());
        Ok(der)
    }
}
