//! PSI-MI Core Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! In-memory model of molecular interactions in the PSI-MI standard.
//!
//! # Overview
//!
//! - **Model**: interactors, participants, features and interactions. Derived
//!   single-valued fields (a protein's UniProtKB accession, an interaction's
//!   IMEx id or RIGID) are cached views over observed collections and never
//!   drift from them.
//! - **Comparators**: canonical orderings for every entity kind, in a
//!   default family (lenient, for merging) and an unambiguous family
//!   (strict, behind `PartialEq`/`Hash`).
//! - **Enrichment**: folds freshly fetched entities into curated ones and
//!   reports every change to a listener.
//!
//! # Example
//!
//! ```
//! use psimi_core::model::Protein;
//!
//! let mut protein = Protein::new("p53").unwrap();
//! protein.set_uniprotkb(Some("P04637")).unwrap();
//!
//! assert_eq!(protein.uniprotkb(), Some("P04637"));
//! assert_eq!(protein.core().identifiers().len(), 1);
//! ```

pub mod compare;
pub mod config;
pub mod enrich;
pub mod error;
pub mod model;

// Re-export commonly used types
pub use compare::{Comparator, Family};
pub use config::{EnrichmentConfig, UpdateStrategy};
pub use error::{EnrichmentError, Result};
pub use model::{
    CvTerm, Experiment, Feature, FeatureEvidence, Interaction, InteractionEvidence, Interactor,
    ModelledInteraction, ObservedList, Organism, Participant, ParticipantEvidence, Protein, Range,
    Xref,
};
