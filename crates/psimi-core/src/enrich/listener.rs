//! Enrichment listeners
//!
//! Enrichers never mutate silently: every element added to or removed from a
//! collection, every field report and the final outcome go to a listener.
//! Each collection kind has its own trait with no-op defaults, so a listener
//! only implements the callbacks it cares about.
//!
//! Two listeners ship with the crate: [`RecordingListener`] keeps the events
//! for later review (and renders them as JSON), [`LoggingListener`] forwards
//! them to `tracing`.

use super::report::{EnrichmentStatus, FieldReport};
use crate::error::EnrichmentError;
use crate::model::{
    Alias, Annotation, Checksum, Confidence, Experiment, Feature, FeatureEvidence, FeatureLike,
    Interaction, Interactor, Organism, Parameter, Participant, ParticipantEvidence,
    ParticipantLike, Protein, Xref,
};
use serde::Serialize;
use tracing::{debug, info, warn};

macro_rules! collection_listener {
    ($(#[$doc:meta])* $name:ident, $element:ty, $added:ident, $removed:ident) => {
        $(#[$doc])*
        pub trait $name<T: ?Sized> {
            fn $added(&mut self, _entity: &T, _added: &$element) {}
            fn $removed(&mut self, _entity: &T, _removed: &$element) {}
        }
    };
}

collection_listener!(
    /// Cross-references of an entity changed.
    XrefsChangeListener, Xref, on_added_xref, on_removed_xref
);
collection_listener!(
    /// Identifiers (identity cross-references) of an entity changed.
    IdentifiersChangeListener, Xref, on_added_identifier, on_removed_identifier
);
collection_listener!(AliasesChangeListener, Alias, on_added_alias, on_removed_alias);
collection_listener!(ChecksumsChangeListener, Checksum, on_added_checksum, on_removed_checksum);
collection_listener!(
    AnnotationsChangeListener, Annotation, on_added_annotation, on_removed_annotation
);
collection_listener!(
    ConfidencesChangeListener, Confidence, on_added_confidence, on_removed_confidence
);
collection_listener!(ParametersChangeListener, Parameter, on_added_parameter, on_removed_parameter);

/// Participants of an interaction changed.
pub trait ParticipantsChangeListener<T: ?Sized, P: ?Sized> {
    fn on_added_participant(&mut self, _interaction: &T, _added: &P) {}
    fn on_removed_participant(&mut self, _interaction: &T, _removed: &P) {}
}

/// Everything an enricher of `T` reports.
pub trait EnrichmentListener<T: ?Sized>:
    XrefsChangeListener<T>
    + IdentifiersChangeListener<T>
    + AliasesChangeListener<T>
    + ChecksumsChangeListener<T>
    + AnnotationsChangeListener<T>
    + ConfidencesChangeListener<T>
    + ParametersChangeListener<T>
{
    fn on_report(&mut self, _entity: &T, _report: &FieldReport) {}

    fn on_enrichment_complete(
        &mut self,
        _entity: &T,
        _status: EnrichmentStatus,
        _message: Option<&str>,
    ) {
    }

    fn on_enrichment_error(&mut self, _entity: &T, _error: &EnrichmentError) {}
}

// ============================================================================
// Entity descriptions
// ============================================================================

/// A short human-readable label for an entity in events and log lines.
pub trait Described {
    fn describe(&self) -> String;
}

impl Described for Protein {
    fn describe(&self) -> String {
        match self.uniprotkb() {
            Some(accession) => format!("protein {} ({accession})", self.core().short_name()),
            None => format!("protein {}", self.core().short_name()),
        }
    }
}

impl Described for Interactor {
    fn describe(&self) -> String {
        match self.as_protein() {
            Some(protein) => protein.describe(),
            None => format!("{:?} {}", self.kind(), self.short_name()).to_lowercase(),
        }
    }
}

impl Described for Organism {
    fn describe(&self) -> String {
        format!("organism {self}")
    }
}

impl Described for Feature {
    fn describe(&self) -> String {
        match self.short_name() {
            Some(name) => format!("feature {name}"),
            None => format!("feature {}", self.handle()),
        }
    }
}

impl Described for FeatureEvidence {
    fn describe(&self) -> String {
        self.feature().describe()
    }
}

impl<F: FeatureLike> Described for Participant<F> {
    fn describe(&self) -> String {
        format!("participant {}", self.interactor().short_name())
    }
}

impl Described for ParticipantEvidence {
    fn describe(&self) -> String {
        self.participant().describe()
    }
}

impl<P: ParticipantLike> Described for Interaction<P> {
    fn describe(&self) -> String {
        match (self.imex_id(), self.short_name()) {
            (Some(imex), _) => format!("interaction {imex}"),
            (None, Some(name)) => format!("interaction {name}"),
            (None, None) => format!("interaction {}", self.handle()),
        }
    }
}

impl Described for Experiment {
    fn describe(&self) -> String {
        match self.publication() {
            Some(publication) => format!(
                "experiment {} ({publication})",
                self.interaction_detection_method().short_name()
            ),
            None => format!("experiment {}", self.interaction_detection_method().short_name()),
        }
    }
}

// ============================================================================
// Listeners
// ============================================================================

/// Ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

macro_rules! ignore_collections {
    ($listener:ty) => {
        impl<T: ?Sized> XrefsChangeListener<T> for $listener {}
        impl<T: ?Sized> IdentifiersChangeListener<T> for $listener {}
        impl<T: ?Sized> AliasesChangeListener<T> for $listener {}
        impl<T: ?Sized> ChecksumsChangeListener<T> for $listener {}
        impl<T: ?Sized> AnnotationsChangeListener<T> for $listener {}
        impl<T: ?Sized> ConfidencesChangeListener<T> for $listener {}
        impl<T: ?Sized> ParametersChangeListener<T> for $listener {}
    };
}

ignore_collections!(NoopListener);

impl<T: ?Sized, P: ?Sized> ParticipantsChangeListener<T, P> for NoopListener {}
impl<T: ?Sized> EnrichmentListener<T> for NoopListener {}

/// Which collection an added or removed element belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
    Xrefs,
    Identifiers,
    Aliases,
    Checksums,
    Annotations,
    Confidences,
    Parameters,
    Participants,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EnrichmentEvent {
    Added {
        entity: String,
        collection: CollectionKind,
        element: String,
    },
    Removed {
        entity: String,
        collection: CollectionKind,
        element: String,
    },
    Report {
        entity: String,
        report: FieldReport,
    },
    Completed {
        entity: String,
        status: EnrichmentStatus,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    Error {
        entity: String,
        message: String,
    },
}

/// Keeps every event in arrival order.
#[derive(Debug, Clone, Default)]
pub struct RecordingListener {
    events: Vec<EnrichmentEvent>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[EnrichmentEvent] {
        &self.events
    }

    pub fn reports(&self) -> impl Iterator<Item = &FieldReport> {
        self.events.iter().filter_map(|event| match event {
            EnrichmentEvent::Report { report, .. } => Some(report),
            _ => None,
        })
    }

    /// Elements added to `collection`, as displayed.
    pub fn added(&self, collection: CollectionKind) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                EnrichmentEvent::Added {
                    collection: kind,
                    element,
                    ..
                } if *kind == collection => Some(element.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Elements removed from `collection`, as displayed.
    pub fn removed(&self, collection: CollectionKind) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                EnrichmentEvent::Removed {
                    collection: kind,
                    element,
                    ..
                } if *kind == collection => Some(element.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Status of the last completed or failed enrichment.
    pub fn last_status(&self) -> Option<EnrichmentStatus> {
        self.events.iter().rev().find_map(|event| match event {
            EnrichmentEvent::Completed { status, .. } => Some(*status),
            EnrichmentEvent::Error { .. } => Some(EnrichmentStatus::Failed),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn to_json(&self) -> psimi_common::Result<String> {
        Ok(serde_json::to_string_pretty(&self.events)?)
    }

    fn push_change(&mut self, added: bool, entity: String, collection: CollectionKind, element: String) {
        let event = if added {
            EnrichmentEvent::Added {
                entity,
                collection,
                element,
            }
        } else {
            EnrichmentEvent::Removed {
                entity,
                collection,
                element,
            }
        };
        self.events.push(event);
    }
}

/// Forwards every event to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingListener;

macro_rules! forward_collection {
    ($trait_name:ident, $element:ty, $added:ident, $removed:ident, $kind:expr) => {
        impl<T: Described + ?Sized> $trait_name<T> for RecordingListener {
            fn $added(&mut self, entity: &T, added: &$element) {
                self.push_change(true, entity.describe(), $kind, added.to_string());
            }

            fn $removed(&mut self, entity: &T, removed: &$element) {
                self.push_change(false, entity.describe(), $kind, removed.to_string());
            }
        }

        impl<T: Described + ?Sized> $trait_name<T> for LoggingListener {
            fn $added(&mut self, entity: &T, added: &$element) {
                debug!(entity = %entity.describe(), collection = ?$kind, element = %added, "Added");
            }

            fn $removed(&mut self, entity: &T, removed: &$element) {
                debug!(entity = %entity.describe(), collection = ?$kind, element = %removed, "Removed");
            }
        }
    };
}

forward_collection!(XrefsChangeListener, Xref, on_added_xref, on_removed_xref, CollectionKind::Xrefs);
forward_collection!(
    IdentifiersChangeListener,
    Xref,
    on_added_identifier,
    on_removed_identifier,
    CollectionKind::Identifiers
);
forward_collection!(AliasesChangeListener, Alias, on_added_alias, on_removed_alias, CollectionKind::Aliases);
forward_collection!(
    ChecksumsChangeListener,
    Checksum,
    on_added_checksum,
    on_removed_checksum,
    CollectionKind::Checksums
);
forward_collection!(
    AnnotationsChangeListener,
    Annotation,
    on_added_annotation,
    on_removed_annotation,
    CollectionKind::Annotations
);
forward_collection!(
    ConfidencesChangeListener,
    Confidence,
    on_added_confidence,
    on_removed_confidence,
    CollectionKind::Confidences
);
forward_collection!(
    ParametersChangeListener,
    Parameter,
    on_added_parameter,
    on_removed_parameter,
    CollectionKind::Parameters
);

impl<T, P> ParticipantsChangeListener<T, P> for RecordingListener
where
    T: Described + ?Sized,
    P: Described + ?Sized,
{
    fn on_added_participant(&mut self, interaction: &T, added: &P) {
        self.push_change(
            true,
            interaction.describe(),
            CollectionKind::Participants,
            added.describe(),
        );
    }

    fn on_removed_participant(&mut self, interaction: &T, removed: &P) {
        self.push_change(
            false,
            interaction.describe(),
            CollectionKind::Participants,
            removed.describe(),
        );
    }
}

impl<T, P> ParticipantsChangeListener<T, P> for LoggingListener
where
    T: Described + ?Sized,
    P: Described + ?Sized,
{
    fn on_added_participant(&mut self, interaction: &T, added: &P) {
        debug!(entity = %interaction.describe(), participant = %added.describe(), "Added participant");
    }

    fn on_removed_participant(&mut self, interaction: &T, removed: &P) {
        debug!(entity = %interaction.describe(), participant = %removed.describe(), "Removed participant");
    }
}

impl<T: Described + ?Sized> EnrichmentListener<T> for RecordingListener {
    fn on_report(&mut self, entity: &T, report: &FieldReport) {
        self.events.push(EnrichmentEvent::Report {
            entity: entity.describe(),
            report: report.clone(),
        });
    }

    fn on_enrichment_complete(&mut self, entity: &T, status: EnrichmentStatus, message: Option<&str>) {
        self.events.push(EnrichmentEvent::Completed {
            entity: entity.describe(),
            status,
            message: message.map(str::to_string),
        });
    }

    fn on_enrichment_error(&mut self, entity: &T, error: &EnrichmentError) {
        self.events.push(EnrichmentEvent::Error {
            entity: entity.describe(),
            message: error.to_string(),
        });
    }
}

impl<T: Described + ?Sized> EnrichmentListener<T> for LoggingListener {
    fn on_report(&mut self, entity: &T, report: &FieldReport) {
        match report {
            FieldReport::Mismatch { .. } => warn!(entity = %entity.describe(), %report, "Field mismatch"),
            _ => debug!(entity = %entity.describe(), %report, "Field updated"),
        }
    }

    fn on_enrichment_complete(&mut self, entity: &T, status: EnrichmentStatus, message: Option<&str>) {
        info!(entity = %entity.describe(), ?status, message = message.unwrap_or(""), "Enrichment complete");
    }

    fn on_enrichment_error(&mut self, entity: &T, error: &EnrichmentError) {
        warn!(entity = %entity.describe(), error = %error, "Enrichment failed");
    }
}
