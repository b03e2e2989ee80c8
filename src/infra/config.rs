//! Configuration for the pass generator.
//!
//! Mirrors the keys the upstream package reads from its environment: the
//! PKCS#12 certificate store, the WWDR intermediate certificate, the pass type
//! identity issued by Apple, and where finished passes are persisted.

use crate::infra::error::{PassError, PassResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Pass generator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassConfig {
    /// Path to the PKCS#12 certificate store holding the pass ID certificate
    pub certificate_store_path: PathBuf,

    /// Password unlocking the certificate store
    pub certificate_store_password: String,

    /// Path to the Apple WWDR intermediate certificate (PEM)
    pub wwdr_certificate_path: PathBuf,

    /// Pass type identifier, as issued by Apple
    #[serde(default)]
    pub pass_type_identifier: String,

    /// Display name of the organization that signs the pass
    #[serde(default)]
    pub organization_name: String,

    /// Team identifier of the signing organization
    #[serde(default)]
    pub team_identifier: String,

    /// Root directory for finished passes and per-build staging folders
    pub storage_root: PathBuf,

    /// Replace an already-persisted pass with the same identifier
    #[serde(default)]
    pub overwrite_existing: bool,
}

impl PassConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> PassResult<Self> {
        let path = path.as_ref();
        log::info!("Loading pass configuration from: {}", path.display());

        let content = fs::read_to_string(path).map_err(|e| {
            PassError::ConfigurationError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: PassConfig = toml::from_str(&content).map_err(|e| {
            PassError::ConfigurationError(format!("Failed to parse config file: {e}"))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values before any build proceeds
    pub fn validate(&self) -> PassResult<()> {
        if self.certificate_store_path.as_os_str().is_empty() {
            return Err(PassError::ConfigurationError(
                "certificate_store_path must be set".to_string(),
            ));
        }

        if self.wwdr_certificate_path.as_os_str().is_empty() {
            return Err(PassError::ConfigurationError(
                "wwdr_certificate_path must be set".to_string(),
            ));
        }

        if self.storage_root.as_os_str().is_empty() {
            return Err(PassError::ConfigurationError(
                "storage_root must be set".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_config(root: &Path) -> PassConfig {
        PassConfig {
            certificate_store_path: root.join("certs/pass.p12"),
            certificate_store_password: "secret".to_string(),
            wwdr_certificate_path: root.join("certs/wwdr.pem"),
            pass_type_identifier: "pass.com.example.demo".to_string(),
            organization_name: "Example Corp".to_string(),
            team_identifier: "AB12CD34EF".to_string(),
            storage_root: root.join("passes"),
            overwrite_existing: false,
        }
    }

    #[test]
    fn test_config_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let config = sample_config(temp_dir.path());

        let toml_str = toml::to_string(&config).unwrap();
        let config_path = temp_dir.path().join("passgenerator.toml");
        fs::write(&config_path, toml_str).unwrap();

        let loaded = PassConfig::from_file(&config_path).unwrap();
        assert_eq!(loaded.certificate_store_password, "secret");
        assert_eq!(loaded.pass_type_identifier, "pass.com.example.demo");
        assert!(!loaded.overwrite_existing);
    }

    #[test]
    fn test_missing_file_is_configuration_error() {
        let err = PassConfig::from_file("/nonexistent/passgenerator.toml").unwrap_err();
        assert!(matches!(err, PassError::ConfigurationError(_)));
    }

    #[test]
    fn test_empty_paths_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = sample_config(temp_dir.path());
        config.certificate_store_path = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_optional_keys_default() {
        let toml_str = r#"
            certificate_store_path = "/certs/pass.p12"
            certificate_store_password = "secret"
            wwdr_certificate_path = "/certs/wwdr.pem"
            storage_root = "/var/passes"
        "#;
        let config: PassConfig = toml::from_str(toml_str).unwrap();
        assert!(config.pass_type_identifier.is_empty());
        assert!(!config.overwrite_existing);
    }
}
