//! Organism enrichment

use super::{Enricher, FieldReport, Outcome};
use crate::config::{EnrichmentConfig, UpdateStrategy};
use crate::error::{EnrichmentError, Result};
use crate::model::organism::{TAXID_IN_SILICO, TAXID_UNKNOWN};
use crate::model::Organism;
use tracing::debug;

/// Fills taxonomy id and names of an organism from a fetched one.
///
/// An unknown target (taxid -3) adopts the fetched taxid. Names are only
/// taken over when both sides then agree on the taxid.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrganismEnricher {
    config: EnrichmentConfig,
}

impl OrganismEnricher {
    pub fn new(config: EnrichmentConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EnrichmentConfig {
        &self.config
    }

    fn merge_names(&self, target: &mut Organism, source: &Organism, outcome: &mut Outcome) {
        let overwrite = self.config.strategy == UpdateStrategy::Overwrite;

        if let Some(name) = source.scientific_name() {
            match target.scientific_name() {
                None => {
                    target.set_scientific_name(Some(name.to_string()));
                    outcome.report(FieldReport::addition("Scientific name", name));
                }
                Some(old) if overwrite && old != name => {
                    let old = old.to_string();
                    target.set_scientific_name(Some(name.to_string()));
                    outcome.report(FieldReport::overwrite("Scientific name", Some(&old), Some(name)));
                }
                _ => {}
            }
        }

        if let Some(name) = source.common_name() {
            match target.common_name() {
                None => {
                    target.set_common_name(Some(name.to_string()));
                    outcome.report(FieldReport::addition("Common name", name));
                }
                Some(old) if overwrite && old != name => {
                    let old = old.to_string();
                    target.set_common_name(Some(name.to_string()));
                    outcome.report(FieldReport::overwrite("Common name", Some(&old), Some(name)));
                }
                _ => {}
            }
        }
    }

    fn report_mismatches(target: &Organism, source: &Organism, outcome: &mut Outcome) {
        if target.tax_id() != source.tax_id() {
            outcome.report(FieldReport::mismatch(
                "Taxid",
                Some(&target.tax_id().to_string()),
                Some(&source.tax_id().to_string()),
            ));
        }
        if source.scientific_name().is_some() && target.scientific_name() != source.scientific_name() {
            outcome.report(FieldReport::mismatch(
                "Scientific name",
                target.scientific_name(),
                source.scientific_name(),
            ));
        }
        if source.common_name().is_some() && target.common_name() != source.common_name() {
            outcome.report(FieldReport::mismatch("Common name", target.common_name(), source.common_name()));
        }
    }
}

impl Enricher<Organism> for OrganismEnricher {
    fn merge(&self, target: &mut Organism, source: &Organism, outcome: &mut Outcome) -> Result<()> {
        if source.tax_id() < TAXID_IN_SILICO {
            return Err(EnrichmentError::Fetching(format!(
                "fetched organism has an invalid taxid {}",
                source.tax_id()
            )));
        }

        if self.config.strategy == UpdateStrategy::Mismatch {
            Self::report_mismatches(target, source, outcome);
            return Ok(());
        }

        if target.tax_id() == TAXID_UNKNOWN && source.tax_id() != TAXID_UNKNOWN {
            debug!(taxid = source.tax_id(), "Adopting fetched taxid for unknown organism");
            target.set_tax_id(source.tax_id());
            outcome.report(FieldReport::addition("Taxid", source.tax_id().to_string()));
        }

        if target.tax_id() == source.tax_id() {
            self.merge_names(target, source, outcome);
        }

        Ok(())
    }
}
