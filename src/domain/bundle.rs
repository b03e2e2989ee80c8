//! The unsigned content set for one pass build.

use crate::infra::error::{PassError, PassResult};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Filename of the pass definition inside the archive
pub const PASS_JSON: &str = "pass.json";
/// Filename of the manifest inside the archive
pub const MANIFEST_JSON: &str = "manifest.json";
/// Filename of the detached signature inside the archive
pub const SIGNATURE: &str = "signature";

/// One build's unsigned content: the pass.json bytes plus the asset files
/// to be bundled alongside it. Asset names live in a flat namespace keyed by
/// basename; re-adding a basename replaces the earlier path.
#[derive(Debug, Clone, Default)]
pub struct PassBundle {
    pass_json: Vec<u8>,
    assets: BTreeMap<String, PathBuf>,
}

impl PassBundle {
    #[must_use]
    pub fn new(pass_json: Vec<u8>) -> Self {
        Self {
            pass_json,
            assets: BTreeMap::new(),
        }
    }

    /// The serialized pass definition
    #[must_use]
    pub fn pass_json(&self) -> &[u8] {
        &self.pass_json
    }

    pub fn set_pass_json(&mut self, pass_json: Vec<u8>) {
        self.pass_json = pass_json;
    }

    /// Basename → source path for every bundled asset
    #[must_use]
    pub fn assets(&self) -> &BTreeMap<String, PathBuf> {
        &self.assets
    }

    /// Add an asset file to the bundle, keyed by its basename.
    ///
    /// The file must exist when added; its content is read later, at manifest
    /// time.
    pub fn add_asset<P: AsRef<Path>>(&mut self, path: P) -> PassResult<()> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(PassError::ValidationError(format!(
                "The asset file {} does not exist",
                path.display()
            )));
        }

        let basename = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                PassError::ValidationError(format!(
                    "Asset path {} has no usable filename",
                    path.display()
                ))
            })?;

        self.assets.insert(basename.to_string(), path.to_path_buf());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_assets_keyed_by_basename() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("images/v2");
        fs::create_dir_all(&nested).unwrap();
        let icon = nested.join("icon.png");
        fs::write(&icon, b"png").unwrap();

        let mut bundle = PassBundle::new(b"{}".to_vec());
        bundle.add_asset(&icon).unwrap();

        assert_eq!(bundle.assets().len(), 1);
        assert_eq!(bundle.assets()["icon.png"], icon);
    }

    #[test]
    fn test_missing_asset_rejected_at_add_time() {
        let mut bundle = PassBundle::new(b"{}".to_vec());
        let err = bundle.add_asset("/nonexistent/icon.png").unwrap_err();
        assert!(matches!(err, PassError::ValidationError(_)));
    }

    #[test]
    fn test_duplicate_basename_replaces_path() {
        let temp_dir = TempDir::new().unwrap();
        let first = temp_dir.path().join("a");
        let second = temp_dir.path().join("b");
        fs::create_dir_all(&first).unwrap();
        fs::create_dir_all(&second).unwrap();
        fs::write(first.join("logo.png"), b"old").unwrap();
        fs::write(second.join("logo.png"), b"new").unwrap();

        let mut bundle = PassBundle::new(b"{}".to_vec());
        bundle.add_asset(first.join("logo.png")).unwrap();
        bundle.add_asset(second.join("logo.png")).unwrap();

        assert_eq!(bundle.assets().len(), 1);
        assert_eq!(bundle.assets()["logo.png"], second.join("logo.png"));
    }
}
