//! Enrichment merge engine
//!
//! An enricher folds a source entity (freshly fetched from an external
//! database) into a target entity (curator-owned, authoritative). Collections
//! end up as the union of both sides, minus unmatched target elements when
//! remove mode is on. Scalar fields follow the configured
//! [`UpdateStrategy`](crate::config::UpdateStrategy).
//!
//! Enrichers record what they change in an [`Outcome`] while they hold the
//! target mutably, and replay it to the listener once the pass is over. A
//! conflict stops the pass, but changes made before it are still reported.
//!
//! # Example
//!
//! ```
//! use psimi_core::config::EnrichmentConfig;
//! use psimi_core::enrich::{Enricher, ProteinEnricher, RecordingListener};
//! use psimi_core::model::Protein;
//!
//! let mut target = Protein::new("p53").unwrap();
//! let mut source = Protein::new("p53").unwrap();
//! source.core_mut().set_full_name(Some("Cellular tumor antigen p53".into()));
//!
//! let mut listener = RecordingListener::new();
//! ProteinEnricher::new(EnrichmentConfig::default())
//!     .enrich_with(&mut target, &source, &mut listener)
//!     .unwrap();
//!
//! assert_eq!(target.core().full_name(), Some("Cellular tumor antigen p53"));
//! ```

pub mod experiment;
pub mod feature;
pub mod fetcher;
pub mod interaction;
pub mod listener;
pub mod merge;
pub mod organism;
pub mod participant;
pub mod protein;
pub mod report;

pub use experiment::ExperimentEnricher;
pub use feature::FeatureEnricher;
pub use fetcher::{FetchError, MockProteinFetcher, ProteinFetcher};
pub use interaction::{InteractionEnricher, ParticipantChanges};
pub use listener::{
    CollectionKind, Described, EnrichmentEvent, EnrichmentListener, LoggingListener, NoopListener,
    ParticipantsChangeListener, RecordingListener,
};
pub use merge::Changes;
pub use organism::OrganismEnricher;
pub use participant::ParticipantEnricher;
pub use protein::ProteinEnricher;
pub use report::{EnrichmentStatus, FieldReport};

use crate::error::Result;
use crate::model::{Alias, Annotation, Checksum, Confidence, Parameter, Xref};

/// Everything one enrichment pass changed on its target.
#[derive(Debug, Clone, Default)]
pub struct Outcome {
    pub reports: Vec<FieldReport>,
    pub identifiers: Changes<Xref>,
    pub xrefs: Changes<Xref>,
    pub aliases: Changes<Alias>,
    pub checksums: Changes<Checksum>,
    pub annotations: Changes<Annotation>,
    pub confidences: Changes<Confidence>,
    pub parameters: Changes<Parameter>,
}

impl Outcome {
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
            && self.identifiers.is_empty()
            && self.xrefs.is_empty()
            && self.aliases.is_empty()
            && self.checksums.is_empty()
            && self.annotations.is_empty()
            && self.confidences.is_empty()
            && self.parameters.is_empty()
    }

    pub fn report(&mut self, report: FieldReport) {
        self.reports.push(report);
    }

    /// Replay the recorded changes, removals before additions.
    pub fn notify<T, L>(&self, entity: &T, listener: &mut L)
    where
        T: ?Sized,
        L: EnrichmentListener<T> + ?Sized,
    {
        for x in &self.identifiers.removed {
            listener.on_removed_identifier(entity, x);
        }
        for x in &self.identifiers.added {
            listener.on_added_identifier(entity, x);
        }
        for x in &self.xrefs.removed {
            listener.on_removed_xref(entity, x);
        }
        for x in &self.xrefs.added {
            listener.on_added_xref(entity, x);
        }
        for a in &self.aliases.removed {
            listener.on_removed_alias(entity, a);
        }
        for a in &self.aliases.added {
            listener.on_added_alias(entity, a);
        }
        for c in &self.checksums.removed {
            listener.on_removed_checksum(entity, c);
        }
        for c in &self.checksums.added {
            listener.on_added_checksum(entity, c);
        }
        for a in &self.annotations.removed {
            listener.on_removed_annotation(entity, a);
        }
        for a in &self.annotations.added {
            listener.on_added_annotation(entity, a);
        }
        for c in &self.confidences.removed {
            listener.on_removed_confidence(entity, c);
        }
        for c in &self.confidences.added {
            listener.on_added_confidence(entity, c);
        }
        for p in &self.parameters.removed {
            listener.on_removed_parameter(entity, p);
        }
        for p in &self.parameters.added {
            listener.on_added_parameter(entity, p);
        }
        for report in &self.reports {
            listener.on_report(entity, report);
        }
    }
}

/// Folds a source entity into a target entity of the same kind.
pub trait Enricher<T: ?Sized> {
    /// Merge `source` into `target`, recording every change in `outcome`.
    ///
    /// Returns at the first conflict, leaving earlier changes in place.
    fn merge(&self, target: &mut T, source: &T, outcome: &mut Outcome) -> Result<()>;

    /// [`Enricher::merge`], then replay the outcome and the final status to
    /// `listener`.
    fn enrich_with<L>(&self, target: &mut T, source: &T, listener: &mut L) -> Result<()>
    where
        L: EnrichmentListener<T> + ?Sized,
    {
        let mut outcome = Outcome::default();
        let result = self.merge(target, source, &mut outcome);
        outcome.notify(&*target, listener);
        finish(&*target, listener, result)
    }
}

/// Report the end of a pass and hand the result back.
pub(crate) fn finish<T, L>(entity: &T, listener: &mut L, result: Result<()>) -> Result<()>
where
    T: ?Sized,
    L: EnrichmentListener<T> + ?Sized,
{
    match &result {
        Ok(()) => listener.on_enrichment_complete(entity, EnrichmentStatus::Success, None),
        Err(err) => listener.on_enrichment_error(entity, err),
    }
    result
}
