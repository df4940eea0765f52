//! Fetchers: where enrichment sources come from
//!
//! Fetchers are called synchronously and fail fast. Any error aborts the
//! enrichment of the entity being processed; retrying is up to the caller.

use crate::model::Protein;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("No entry found for '{0}'")]
    NotFound(String),

    #[error("{service} failed: {message}")]
    Transport { service: String, message: String },
}

/// Looks proteins up by accession.
pub trait ProteinFetcher: Send + Sync {
    /// Name of the backing service, for reports and logs
    fn service(&self) -> &str;

    fn fetch_by_identifier(&self, identifier: &str) -> Result<Protein, FetchError>;
}

/// In-memory fetcher for tests and offline runs.
#[derive(Debug, Clone, Default)]
pub struct MockProteinFetcher {
    entries: HashMap<String, Protein>,
}

impl MockProteinFetcher {
    pub const SERVICE: &'static str = "Mock Protein Fetcher";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entry(&mut self, identifier: impl Into<String>, protein: Protein) {
        self.entries.insert(identifier.into(), protein);
    }

    pub fn with_entry(mut self, identifier: impl Into<String>, protein: Protein) -> Self {
        self.add_entry(identifier, protein);
        self
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl ProteinFetcher for MockProteinFetcher {
    fn service(&self) -> &str {
        Self::SERVICE
    }

    fn fetch_by_identifier(&self, identifier: &str) -> Result<Protein, FetchError> {
        self.entries
            .get(identifier)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(identifier.to_string()))
    }
}
