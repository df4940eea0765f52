//! Error types for enrichment
//!
//! Model construction failures stay [`PsiError`]s and pass through unchanged.
//! Everything else here aborts the enrichment of one entity; informational
//! outcomes (additions, overwrites, mismatches) go to listeners instead.

use crate::enrich::fetcher::FetchError;
use psimi_common::PsiError;
use thiserror::Error;

/// Result type alias for enrichment operations
pub type Result<T> = std::result::Result<T, EnrichmentError>;

#[derive(Error, Debug)]
pub enum EnrichmentError {
    /// Target and source disagree on a value that must not be overwritten
    #[error("Enrichment conflict on {field}: {message}")]
    Conflict { field: &'static str, message: String },

    /// The source entity could not be obtained or is unusable
    #[error("Fetching failed: {0}")]
    Fetching(String),

    /// A required collaborator (fetcher, nested enricher) is not configured
    #[error("Enricher not configured: {0}")]
    Configuration(String),

    #[error(transparent)]
    Model(#[from] PsiError),
}

impl EnrichmentError {
    pub fn conflict(field: &'static str, message: impl Into<String>) -> Self {
        EnrichmentError::Conflict {
            field,
            message: message.into(),
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, EnrichmentError::Conflict { .. })
    }
}

impl From<FetchError> for EnrichmentError {
    fn from(err: FetchError) -> Self {
        EnrichmentError::Fetching(err.to_string())
    }
}
