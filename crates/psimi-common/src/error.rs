//! Error types for the PSI-MI model

use thiserror::Error;

/// Result type alias for model operations
pub type Result<T> = std::result::Result<T, PsiError>;

/// Errors raised when building or mutating model values would break an invariant.
#[derive(Error, Debug)]
pub enum PsiError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Missing required field: {entity}.{field}")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    #[error("Invalid MI identifier: {0}")]
    InvalidMiIdentifier(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Cannot compute checksum: {0}")]
    Checksum(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PsiError {
    /// Shorthand for a [`PsiError::MissingField`].
    pub fn missing(entity: &'static str, field: &'static str) -> Self {
        PsiError::MissingField { entity, field }
    }
}
