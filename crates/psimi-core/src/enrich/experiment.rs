//! Experiment enrichment

use super::merge::{merge_annotations, merge_confidences, merge_xrefs};
use super::{Enricher, FieldReport, Outcome};
use crate::compare::terms::{DEFAULT_CV_TERM, DEFAULT_ORGANISM, DEFAULT_PUBLICATION};
use crate::compare::Comparator;
use crate::config::{EnrichmentConfig, UpdateStrategy};
use crate::error::Result;
use crate::model::Experiment;
use std::fmt::Display;

/// Takes over the fetched detection method, publication and host organism
/// whenever they differ from the target's, then merges annotations.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExperimentEnricher {
    config: EnrichmentConfig,
}

impl ExperimentEnricher {
    pub fn new(config: EnrichmentConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EnrichmentConfig {
        &self.config
    }

    fn differs(&self, field: &str, current: Option<String>, fetched: &impl Display, outcome: &mut Outcome) -> bool {
        let fetched = fetched.to_string();
        let report = if self.config.strategy == UpdateStrategy::Mismatch {
            FieldReport::mismatch(field, current.as_deref(), Some(&fetched))
        } else {
            FieldReport::overwrite(field, current.as_deref(), Some(&fetched))
        };
        outcome.report(report);
        self.config.strategy != UpdateStrategy::Mismatch
    }
}

impl Enricher<Experiment> for ExperimentEnricher {
    fn merge(&self, target: &mut Experiment, source: &Experiment, outcome: &mut Outcome) -> Result<()> {
        let method = source.interaction_detection_method();
        if !DEFAULT_CV_TERM.are_equal(target.interaction_detection_method(), method) {
            let current = Some(target.interaction_detection_method().to_string());
            if self.differs("Interaction detection method", current, method, outcome) {
                target.set_interaction_detection_method(method.clone());
            }
        }

        if let Some(publication) = source.publication() {
            let same = target
                .publication()
                .is_some_and(|current| DEFAULT_PUBLICATION.are_equal(current, publication));
            if !same {
                let current = target.publication().map(ToString::to_string);
                if self.differs("Publication", current, publication, outcome) {
                    target.set_publication(Some(publication.clone()));
                }
            }
        }

        if let Some(organism) = source.host_organism() {
            let same = target
                .host_organism()
                .is_some_and(|current| DEFAULT_ORGANISM.are_equal(current, organism));
            if !same {
                let current = target.host_organism().map(ToString::to_string);
                if self.differs("Host organism", current, organism, outcome) {
                    target.set_host_organism(Some(organism.clone()));
                }
            }
        }

        if self.config.strategy == UpdateStrategy::Mismatch {
            return Ok(());
        }

        let remove = self.config.remove_unmatched;
        outcome.xrefs = merge_xrefs(target.xrefs_mut(), source.xrefs(), remove);
        outcome.annotations = merge_annotations(target.annotations_mut(), source.annotations(), remove);
        outcome.confidences = merge_confidences(target.confidences_mut(), source.confidences(), remove);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::enrich::{CollectionKind, RecordingListener};
    use crate::model::{Annotation, CvTerm, Organism, Publication};

    fn two_hybrid() -> CvTerm {
        CvTerm::with_mi("two hybrid", "MI:0018").unwrap()
    }

    fn fetched() -> Experiment {
        let mut experiment = Experiment::new(two_hybrid());
        experiment.set_publication(Some(Publication::with_pubmed("10831611")));
        experiment.set_host_organism(Some(Organism::named(4932, "yeast", "Saccharomyces cerevisiae")));
        experiment
            .annotations_mut()
            .push(Annotation::new(CvTerm::new("comment").unwrap(), Some("bait fused to LexA".into())));
        experiment
    }

    #[test]
    fn test_replaces_differing_fields() {
        let mut target = Experiment::new(CvTerm::with_mi("pull down", "MI:0096").unwrap());
        target.set_publication(Some(Publication::with_pubmed("1")));
        let mut listener = RecordingListener::new();

        ExperimentEnricher::default()
            .enrich_with(&mut target, &fetched(), &mut listener)
            .unwrap();

        assert_eq!(target.interaction_detection_method().short_name(), "two hybrid");
        assert_eq!(target.publication().and_then(Publication::pubmed_id), Some("10831611"));
        assert_eq!(target.host_organism().map(Organism::tax_id), Some(4932));
        assert_eq!(listener.reports().count(), 3);
        assert_eq!(listener.added(CollectionKind::Annotations).len(), 1);
    }

    #[test]
    fn test_equal_experiment_is_untouched() {
        let mut target = fetched();
        let mut outcome = Outcome::default();

        ExperimentEnricher::default().merge(&mut target, &fetched(), &mut outcome).unwrap();

        assert!(outcome.is_empty());
    }

    #[test]
    fn test_mismatch_strategy_only_reports() {
        let mut target = Experiment::new(CvTerm::with_mi("pull down", "MI:0096").unwrap());
        let enricher = ExperimentEnricher::new(EnrichmentConfig::default().with_strategy(UpdateStrategy::Mismatch));
        let mut outcome = Outcome::default();

        enricher.merge(&mut target, &fetched(), &mut outcome).unwrap();

        assert_eq!(target.interaction_detection_method().short_name(), "pull down");
        assert!(target.publication().is_none());
        assert_eq!(outcome.reports.len(), 3);
        assert!(target.annotations().is_empty());
    }
}
