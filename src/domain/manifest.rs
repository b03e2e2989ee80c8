//! Manifest construction: one SHA-1 digest per bundled file.
//!
//! The manifest is the object that actually gets signed, so its key set must
//! cover exactly the bundle's file set. PassKit mandates SHA-1 here; the
//! digest identifies content, it carries no security on its own (the PKCS#7
//! signature over the manifest does).

use crate::domain::bundle::{PassBundle, PASS_JSON};
use crate::infra::error::{PassError, PassResult};
use sha1::{Digest, Sha1};
use std::collections::BTreeMap;
use std::fs;

/// Filename → lowercase hex SHA-1 for every file in the bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    entries: BTreeMap<String, String>,
}

impl Manifest {
    /// Build the manifest for a bundle, reading every asset from disk.
    ///
    /// Fails with an IO error if an asset path registered on the bundle can
    /// no longer be read.
    pub fn from_bundle(bundle: &PassBundle) -> PassResult<Self> {
        let mut entries = BTreeMap::new();
        entries.insert(PASS_JSON.to_string(), Self::digest(bundle.pass_json()));

        for (basename, path) in bundle.assets() {
            let contents = fs::read(path).map_err(|e| {
                PassError::IoError(format!(
                    "Failed to read asset {}: {}",
                    path.display(),
                    e
                ))
            })?;
            entries.insert(basename.clone(), Self::digest(&contents));
        }

        log::debug!("Built manifest with {} entries", entries.len());
        Ok(Self { entries })
    }

    /// Lowercase hex SHA-1 of a byte slice
    #[must_use]
    pub fn digest(bytes: &[u8]) -> String {
        let mut hasher = Sha1::new();
        hasher.update(bytes);
        hex::encode(hasher.finalize())
    }

    /// The filename → digest entries
    #[must_use]
    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    /// Serialize as a JSON object
    pub fn to_json(&self) -> PassResult<Vec<u8>> {
        Ok(serde_json::to_vec(&self.entries)?)
    }
}
