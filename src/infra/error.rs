//! Error types for pass bundle generation.
//! One variant per failure class so callers can distinguish the taxonomy.

use thiserror::Error;

/// Result type for pass generation operations
pub type PassResult<T> = Result<T, PassError>;

/// Error taxonomy for the pass build pipeline
#[derive(Error, Debug, miette::Diagnostic)]
pub enum PassError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Credential error: {0}")]
    CredentialError(String),

    #[error("Invalid format: {0}")]
    FormatError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Conflict: {0}")]
    ConflictError(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Signing error: {0}")]
    SigningError(String),

    #[error("Packaging error: {0}")]
    PackagingError(String),
}

impl From<std::io::Error> for PassError {
    fn from(error: std::io::Error) -> Self {
        PassError::IoError(error.to_string())
    }
}

impl From<serde_json::Error> for PassError {
    fn from(error: serde_json::Error) -> Self {
        PassError::FormatError(error.to_string())
    }
}
