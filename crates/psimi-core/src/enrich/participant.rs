//! Participant enrichment

use super::merge::{merge_aliases, merge_annotations, merge_confidences, merge_parameters, merge_xrefs};
use super::{Enricher, FeatureEnricher, FieldReport, Outcome, ProteinEnricher};
use crate::config::{EnrichmentConfig, UpdateStrategy};
use crate::error::Result;
use crate::model::{FeatureEvidence, FeatureLike, Participant, ParticipantEvidence};
use tracing::debug;

/// Merges participant annotations and, through the nested enrichers, the
/// participant's protein and features.
///
/// When the protein's sequence changes, the ranges of every feature are
/// remapped onto the new sequence.
#[derive(Debug, Clone, Default)]
pub struct ParticipantEnricher {
    config: EnrichmentConfig,
    protein: Option<ProteinEnricher>,
    feature: FeatureEnricher,
}

impl ParticipantEnricher {
    pub fn new(config: EnrichmentConfig) -> Self {
        Self {
            config,
            protein: None,
            feature: FeatureEnricher::new(config),
        }
    }

    pub fn with_protein_enricher(mut self, protein: ProteinEnricher) -> Self {
        self.protein = Some(protein);
        self
    }

    pub fn with_feature_enricher(mut self, feature: FeatureEnricher) -> Self {
        self.feature = feature;
        self
    }

    pub fn config(&self) -> &EnrichmentConfig {
        &self.config
    }

    fn merge_interactor<F>(
        &self,
        target: &mut Participant<F>,
        source: &Participant<F>,
        outcome: &mut Outcome,
    ) -> Result<()>
    where
        F: FeatureLike,
    {
        let Some(protein_enricher) = &self.protein else {
            return Ok(());
        };
        let (Some(protein), Some(fetched)) = (
            target.interactor_mut().as_protein_mut(),
            source.interactor().as_protein(),
        ) else {
            return Ok(());
        };

        let old_sequence = protein.sequence().map(str::to_string);
        protein_enricher.merge(protein, fetched, outcome)?;
        let new_sequence = protein.sequence().map(str::to_string);

        for feature in target.features_mut() {
            let mut remapped = Outcome::default();
            self.feature.remap_ranges(
                feature.feature_mut(),
                old_sequence.as_deref(),
                new_sequence.as_deref(),
                &mut remapped,
            );
            outcome.reports.append(&mut remapped.reports);
        }
        Ok(())
    }

    fn merge_features<F>(
        &self,
        target: &mut Participant<F>,
        source: &Participant<F>,
        outcome: &mut Outcome,
    ) -> Result<()>
    where
        F: FeatureLike,
        FeatureEnricher: Enricher<F>,
    {
        for feature in target.features_mut() {
            let handle = feature.feature().handle();
            let Some(fetched) = source.features().iter().find(|f| f.feature().handle() == handle) else {
                continue;
            };
            let mut merged = Outcome::default();
            <FeatureEnricher as Enricher<F>>::merge(&self.feature, feature, fetched, &mut merged)?;
            outcome.reports.append(&mut merged.reports);
        }
        Ok(())
    }
}

impl<F> Enricher<Participant<F>> for ParticipantEnricher
where
    F: FeatureLike,
    FeatureEnricher: Enricher<F>,
{
    fn merge(&self, target: &mut Participant<F>, source: &Participant<F>, outcome: &mut Outcome) -> Result<()> {
        self.merge_interactor(target, source, outcome)?;
        self.merge_features(target, source, outcome)?;

        if self.config.strategy == UpdateStrategy::Mismatch {
            if let Some(fetched) = source.stoichiometry() {
                if target.stoichiometry() != Some(fetched) {
                    let current = target.stoichiometry().map(|s| s.to_string());
                    outcome.report(FieldReport::mismatch(
                        "Stoichiometry",
                        current.as_deref(),
                        Some(&fetched.to_string()),
                    ));
                }
            }
            return Ok(());
        }

        let remove = self.config.remove_unmatched;
        outcome.xrefs = merge_xrefs(target.xrefs_mut(), source.xrefs(), remove);
        outcome.aliases = merge_aliases(target.aliases_mut(), source.aliases(), remove);
        outcome.annotations = merge_annotations(target.annotations_mut(), source.annotations(), remove);

        if target.stoichiometry().is_none() {
            if let Some(stoichiometry) = source.stoichiometry() {
                debug!(stoichiometry, "Filling participant stoichiometry");
                target.set_stoichiometry(Some(stoichiometry));
                outcome.report(FieldReport::addition("Stoichiometry", stoichiometry.to_string()));
            }
        }
        Ok(())
    }
}

impl Enricher<ParticipantEvidence> for ParticipantEnricher {
    fn merge(
        &self,
        target: &mut ParticipantEvidence,
        source: &ParticipantEvidence,
        outcome: &mut Outcome,
    ) -> Result<()> {
        use crate::model::ParticipantLike;

        Enricher::<Participant<FeatureEvidence>>::merge(self, target.participant_mut(), source.participant(), outcome)?;
        if self.config.strategy == UpdateStrategy::Mismatch {
            return Ok(());
        }

        let remove = self.config.remove_unmatched;
        outcome.confidences = merge_confidences(target.confidences_mut(), source.confidences(), remove);
        outcome.parameters = merge_parameters(target.parameters_mut(), source.parameters(), remove);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::enrich::OrganismEnricher;
    use crate::model::{
        Confidence, CvTerm, Feature, ModelledParticipant, Parameter, ParameterValue, Protein, Range, Xref,
    };
    use psimi_common::vocabulary;

    fn protein(sequence: &str) -> Protein {
        let mut protein = Protein::new("p53").unwrap();
        protein.set_sequence(Some(sequence.to_string()));
        protein
    }

    #[test]
    fn test_fills_stoichiometry_and_merges_xrefs() {
        let mut target: ModelledParticipant = Participant::new(Protein::new("p53").unwrap());
        let mut source: ModelledParticipant = Participant::new(Protein::new("p53").unwrap());
        source.set_stoichiometry(Some(2));
        source
            .xrefs_mut()
            .push(Xref::identity(vocabulary::INTERPRO, "IPR002117").unwrap());
        let mut outcome = Outcome::default();

        ParticipantEnricher::default().merge(&mut target, &source, &mut outcome).unwrap();

        assert_eq!(target.stoichiometry(), Some(2));
        assert_eq!(target.xrefs().len(), 1);
        assert_eq!(outcome.xrefs.added.len(), 1);
    }

    #[test]
    fn test_sequence_change_remaps_feature_ranges() {
        let mut target: ModelledParticipant = Participant::new(protein("MAAAKLLL"));
        let mut feature = Feature::new();
        feature.add_range(Range::certain(5, 8).unwrap());
        target.add_feature(feature);
        let source: ModelledParticipant = Participant::new(protein("MAAAGGKLLL"));

        let overwrite = EnrichmentConfig::default().with_strategy(UpdateStrategy::Overwrite);
        let enricher = ParticipantEnricher::new(EnrichmentConfig::default()).with_protein_enricher(
            ProteinEnricher::new(overwrite).with_organism_enricher(OrganismEnricher::new(overwrite)),
        );
        let mut outcome = Outcome::default();
        enricher.merge(&mut target, &source, &mut outcome).unwrap();

        let range = &target.features()[0].ranges()[0];
        assert_eq!((range.start().start(), range.end().end()), (7, 10));
        assert!(outcome.reports.iter().any(|r| r.field() == "Range"));
        assert!(outcome.reports.iter().any(|r| r.field() == "Sequence"));
    }

    #[test]
    fn test_evidence_merges_confidences_and_parameters() {
        let mut target = ParticipantEvidence::new(Protein::new("p53").unwrap());
        let mut source = ParticipantEvidence::new(Protein::new("p53").unwrap());
        source
            .confidences_mut()
            .push(Confidence::new(CvTerm::new("author-score").unwrap(), "high").unwrap());
        source.parameters_mut().push(Parameter::new(
            CvTerm::with_mi("kd", "MI:0646").unwrap(),
            ParameterValue::scientific(3.0, 10, -9),
        ));
        let mut outcome = Outcome::default();

        ParticipantEnricher::default().merge(&mut target, &source, &mut outcome).unwrap();

        assert_eq!(target.confidences().len(), 1);
        assert_eq!(target.parameters().len(), 1);
        assert_eq!(outcome.parameters.added.len(), 1);
    }

    #[test]
    fn test_mismatch_reports_stoichiometry() {
        let mut target: ModelledParticipant = Participant::new(Protein::new("p53").unwrap());
        target.set_stoichiometry(Some(1));
        let mut source = target.clone();
        source.set_stoichiometry(Some(3));
        let enricher = ParticipantEnricher::new(EnrichmentConfig::default().with_strategy(UpdateStrategy::Mismatch));
        let mut outcome = Outcome::default();

        enricher.merge(&mut target, &source, &mut outcome).unwrap();

        assert_eq!(target.stoichiometry(), Some(1));
        assert_eq!(outcome.reports, vec![FieldReport::mismatch("Stoichiometry", Some("1"), Some("3"))]);
    }
}
