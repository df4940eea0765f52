//! Protein enrichment
//!
//! The protein pass, in order:
//!
//! 1. scalar fields (full name, UniProtKB accession, sequence) per strategy
//! 2. identifiers, aliases and cross-references merged as collections
//! 3. the organism, through the nested [`OrganismEnricher`]
//! 4. the CRC64 checksum, which must agree with the fetched one
//! 5. the ROGID, recomputed from sequence and taxid and checked against any
//!    existing one
//!
//! Steps 4 and 5 raise conflicts instead of overwriting.

use super::fetcher::ProteinFetcher;
use super::merge::{merge_aliases, merge_xrefs};
use super::{finish, Enricher, EnrichmentListener, FieldReport, Outcome, OrganismEnricher};
use crate::config::{EnrichmentConfig, UpdateStrategy};
use crate::error::{EnrichmentError, Result};
use crate::model::{Checksum, Organism, Protein};
use psimi_common::checksum;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

#[derive(Clone, Default)]
pub struct ProteinEnricher {
    config: EnrichmentConfig,
    fetcher: Option<Arc<dyn ProteinFetcher>>,
    organism_enricher: Option<OrganismEnricher>,
}

impl std::fmt::Debug for ProteinEnricher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProteinEnricher")
            .field("config", &self.config)
            .field("fetcher", &self.fetcher.as_ref().map(|fetcher| fetcher.service()))
            .field("organism_enricher", &self.organism_enricher)
            .finish()
    }
}

impl ProteinEnricher {
    pub fn new(config: EnrichmentConfig) -> Self {
        Self {
            config,
            fetcher: None,
            organism_enricher: None,
        }
    }

    pub fn with_fetcher(mut self, fetcher: impl ProteinFetcher + 'static) -> Self {
        self.fetcher = Some(Arc::new(fetcher));
        self
    }

    pub fn with_shared_fetcher(mut self, fetcher: Arc<dyn ProteinFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    pub fn with_organism_enricher(mut self, organism_enricher: OrganismEnricher) -> Self {
        self.organism_enricher = Some(organism_enricher);
        self
    }

    pub fn config(&self) -> &EnrichmentConfig {
        &self.config
    }

    pub fn fetcher(&self) -> Option<&dyn ProteinFetcher> {
        self.fetcher.as_deref()
    }

    /// Fetch the entry for the target's UniProtKB accession.
    pub fn fetch(&self, target: &Protein) -> Result<Protein> {
        let fetcher = self
            .fetcher
            .as_ref()
            .ok_or_else(|| EnrichmentError::Fetching("no protein fetcher configured".to_string()))?;
        let accession = target.uniprotkb().ok_or_else(|| {
            EnrichmentError::Fetching(format!(
                "{} has no UniProtKB accession to query",
                target.core().short_name()
            ))
        })?;

        debug!(accession, service = fetcher.service(), "Fetching protein");
        Ok(fetcher.fetch_by_identifier(accession)?)
    }

    /// Fetch the target's entry and merge it in.
    #[instrument(skip_all, fields(protein = %target.core().short_name(), strategy = %self.config.strategy))]
    pub fn enrich<L>(&self, target: &mut Protein, listener: &mut L) -> Result<()>
    where
        L: EnrichmentListener<Protein> + ?Sized,
    {
        match self.fetch(target) {
            Ok(source) => {
                let result = self.enrich_with(target, &source, listener);
                if result.is_ok() {
                    info!("Protein enriched");
                }
                result
            }
            Err(err) => {
                warn!(error = %err, "Protein could not be fetched");
                finish(&*target, listener, Err(err))
            }
        }
    }

    fn run_addition(&self, target: &mut Protein, source: &Protein, outcome: &mut Outcome) -> Result<()> {
        let remove = self.config.remove_unmatched;

        if target.core().full_name().is_none() {
            if let Some(full_name) = source.core().full_name() {
                target.core_mut().set_full_name(Some(full_name.to_string()));
                outcome.report(FieldReport::addition("Full name", full_name));
            }
        }

        if target.uniprotkb().is_none() {
            if let Some(accession) = source.uniprotkb() {
                target.set_uniprotkb(Some(accession))?;
                outcome.report(FieldReport::addition("uniprotKb AC", accession));
            }
        }

        if target.sequence().is_none() {
            if let Some(sequence) = source.sequence() {
                target.set_sequence(Some(sequence.to_string()));
                outcome.report(FieldReport::addition("Sequence", sequence));
            }
        }

        outcome.identifiers = merge_xrefs(
            target.core_mut().identifiers_mut(),
            source.core().identifiers().as_slice(),
            remove,
        );
        outcome.aliases = merge_aliases(
            target.core_mut().aliases_mut(),
            source.core().aliases().as_slice(),
            remove,
        );
        outcome.xrefs = merge_xrefs(target.core_mut().xrefs_mut(), source.core().xrefs(), remove);

        if let Some(fetched) = source.core().organism() {
            self.enrich_organism(target, fetched, outcome)?;
        }

        self.check_crc64(target, source, outcome)?;
        self.check_rogid(target, outcome)
    }

    fn enrich_organism(&self, target: &mut Protein, fetched: &Organism, outcome: &mut Outcome) -> Result<()> {
        let organism_enricher = self.organism_enricher.as_ref().ok_or_else(|| {
            EnrichmentError::Configuration("an organism enricher is required to merge organisms".to_string())
        })?;

        let mut organism = target.core().organism().cloned().unwrap_or_else(Organism::unknown);
        let result = organism_enricher.merge(&mut organism, fetched, outcome);
        target.core_mut().set_organism(Some(organism));
        result
    }

    fn check_crc64(&self, target: &mut Protein, source: &Protein, outcome: &mut Outcome) -> Result<()> {
        let mut fetched = source.crc64s();
        let Some(crc64) = fetched.next() else {
            return Ok(());
        };
        if fetched.next().is_some() {
            return Err(EnrichmentError::Fetching(
                "fetched protein carries more than one CRC64 checksum".to_string(),
            ));
        }

        let mut present = false;
        for existing in target.crc64s() {
            if existing.value() != crc64.value() {
                warn!(
                    existing = existing.value(),
                    fetched = crc64.value(),
                    "CRC64 checksum conflicts with fetched entry"
                );
                return Err(EnrichmentError::conflict(
                    "CRC64",
                    format!(
                        "target has {} but the fetched protein has {}",
                        existing.value(),
                        crc64.value()
                    ),
                ));
            }
            present = true;
        }

        if !present {
            target.core_mut().checksums_mut().push(crc64.clone());
            outcome.checksums.added.push(crc64.clone());
            outcome.report(FieldReport::addition("CRC64", crc64.value()));
        }
        Ok(())
    }

    fn check_rogid(&self, target: &mut Protein, outcome: &mut Outcome) -> Result<()> {
        let tax_id = target.core().organism().map(Organism::tax_id);
        let sequence = target.sequence().map(str::to_string);

        match (tax_id, sequence) {
            (Some(tax_id), Some(sequence)) if tax_id > 0 => match checksum::rogid(&sequence, tax_id) {
                Ok(rogid) => match target.rogid() {
                    None => {
                        target.set_rogid(Some(&rogid))?;
                        if let Some(added) = target.core().checksums().iter().find(|c| c.value() == rogid) {
                            outcome.checksums.added.push(added.clone());
                        }
                        outcome.report(FieldReport::addition("RogID", rogid));
                        Ok(())
                    }
                    Some(existing) if existing != rogid => Err(EnrichmentError::conflict(
                        "RogID",
                        format!("target has {existing} but sequence and taxid give {rogid}"),
                    )),
                    Some(_) => Ok(()),
                },
                Err(err) => {
                    debug!(error = %err, "ROGID could not be computed");
                    outcome.report(FieldReport::mismatch("RogID", target.rogid(), None));
                    Ok(())
                }
            },
            _ => match target.rogid() {
                None => Ok(()),
                Some(_) => {
                    let reason = match (tax_id, target.sequence()) {
                        (None, _) => "organism is missing".to_string(),
                        (Some(tax_id), _) if tax_id <= 0 => format!("organism taxid {tax_id} is not a real taxon"),
                        _ => "no sequence is provided".to_string(),
                    };
                    Err(EnrichmentError::conflict(
                        "RogID",
                        format!("existing ROGID cannot be confirmed: {reason}"),
                    ))
                }
            },
        }
    }

    fn run_overwrite(&self, target: &mut Protein, source: &Protein, outcome: &mut Outcome) -> Result<()> {
        let short_name = source.core().short_name();
        if !target.core().short_name().eq_ignore_ascii_case(short_name) {
            let old = target.core().short_name().to_string();
            target.core_mut().set_short_name(short_name)?;
            outcome.report(FieldReport::overwrite("ShortName", Some(&old), Some(short_name)));
        }

        if let Some(full_name) = source.core().full_name() {
            if !eq_ignore_case(target.core().full_name(), full_name) {
                let old = target.core().full_name().map(str::to_string);
                target.core_mut().set_full_name(Some(full_name.to_string()));
                outcome.report(FieldReport::overwrite("FullName", old.as_deref(), Some(full_name)));
            }
        }

        if let Some(accession) = source.uniprotkb() {
            if !eq_ignore_case(target.uniprotkb(), accession) {
                let old = target.uniprotkb().map(str::to_string);
                target.set_uniprotkb(Some(accession))?;
                outcome.report(FieldReport::overwrite("UniprotKB AC", old.as_deref(), Some(accession)));
            }
        }

        if let Some(sequence) = source.sequence() {
            if !eq_ignore_case(target.sequence(), sequence) {
                let old = target.sequence().map(str::to_string);
                target.set_sequence(Some(sequence.to_string()));
                outcome.report(FieldReport::overwrite("Sequence", old.as_deref(), Some(sequence)));
            }
        }

        Ok(())
    }

    fn run_mismatch(target: &Protein, source: &Protein, outcome: &mut Outcome) {
        let short_name = source.core().short_name();
        if !target.core().short_name().eq_ignore_ascii_case(short_name) {
            outcome.report(FieldReport::mismatch(
                "ShortName",
                Some(target.core().short_name()),
                Some(short_name),
            ));
        }

        let fields = [
            ("FullName", target.core().full_name(), source.core().full_name()),
            ("UniprotKB AC", target.uniprotkb(), source.uniprotkb()),
            ("Sequence", target.sequence(), source.sequence()),
        ];
        for (field, ours, theirs) in fields {
            if let Some(theirs) = theirs {
                if !eq_ignore_case(ours, theirs) {
                    outcome.report(FieldReport::mismatch(field, ours, Some(theirs)));
                }
            }
        }
    }
}

fn eq_ignore_case(ours: Option<&str>, theirs: &str) -> bool {
    ours.is_some_and(|ours| ours.eq_ignore_ascii_case(theirs))
}

impl Enricher<Protein> for ProteinEnricher {
    fn merge(&self, target: &mut Protein, source: &Protein, outcome: &mut Outcome) -> Result<()> {
        match self.config.strategy {
            UpdateStrategy::Addition => self.run_addition(target, source, outcome),
            UpdateStrategy::Overwrite => {
                self.run_overwrite(target, source, outcome)?;
                self.run_addition(target, source, outcome)
            }
            UpdateStrategy::Mismatch => {
                Self::run_mismatch(target, source, outcome);
                Ok(())
            }
        }
    }
}

/// Checksums of `protein` computed by `method`.
pub fn checksums_of<'a>(protein: &'a Protein, method: psimi_common::Term) -> impl Iterator<Item = &'a Checksum> {
    protein
        .core()
        .checksums()
        .iter()
        .filter(move |checksum| checksum.is_method(method))
}

/// Whether `protein` carries a checksum of `method` with `value`.
pub fn has_checksum(protein: &Protein, method: psimi_common::Term, value: &str) -> bool {
    checksums_of(protein, method).any(|checksum| checksum.value() == value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::enrich::{MockProteinFetcher, RecordingListener};
    use psimi_common::vocabulary;

    const SEQUENCE: &str = "MEEPQSDPSVEPPLSQETFSDLWKLLPENNVLSPLPSQAMDDLMLSPDDIEQWFTEDPGP";

    fn fetched() -> Protein {
        let mut protein = Protein::new("P53_HUMAN").unwrap();
        protein.core_mut().set_full_name(Some("Cellular tumor antigen p53".into()));
        protein.set_uniprotkb(Some("P04637")).unwrap();
        protein.set_sequence(Some(SEQUENCE.to_string()));
        protein.core_mut().set_organism(Some(Organism::named(9606, "human", "Homo sapiens")));
        protein
    }

    fn enricher(strategy: UpdateStrategy) -> ProteinEnricher {
        ProteinEnricher::new(EnrichmentConfig::default().with_strategy(strategy))
            .with_organism_enricher(OrganismEnricher::default())
    }

    #[test]
    fn test_addition_fills_missing_fields_and_rogid() {
        let mut target = Protein::new("p53").unwrap();
        let mut outcome = Outcome::default();

        enricher(UpdateStrategy::Addition)
            .merge(&mut target, &fetched(), &mut outcome)
            .unwrap();

        assert_eq!(target.core().short_name(), "p53");
        assert_eq!(target.uniprotkb(), Some("P04637"));
        assert_eq!(target.sequence(), Some(SEQUENCE));
        assert_eq!(target.core().organism().map(Organism::tax_id), Some(9606));
        assert_eq!(
            target.rogid().map(str::to_string),
            Some(checksum::rogid(SEQUENCE, 9606).unwrap())
        );
        let fields: Vec<&str> = outcome.reports.iter().map(FieldReport::field).collect();
        assert!(fields.contains(&"Full name"));
        assert!(fields.contains(&"RogID"));
    }

    #[test]
    fn test_missing_organism_enricher_is_configuration_error() {
        let mut target = Protein::new("p53").unwrap();
        let result = ProteinEnricher::default().merge(&mut target, &fetched(), &mut Outcome::default());

        assert!(matches!(result, Err(EnrichmentError::Configuration(_))));
    }

    #[test]
    fn test_multiple_fetched_crc64_is_fetching_error() {
        let mut source = Protein::new("p53").unwrap();
        for value in ["AAAA", "BBBB"] {
            source
                .core_mut()
                .checksums_mut()
                .push(Checksum::new(vocabulary::CRC64.into(), value).unwrap());
        }
        let mut target = Protein::new("p53").unwrap();

        let result = enricher(UpdateStrategy::Addition).merge(&mut target, &source, &mut Outcome::default());

        assert!(matches!(result, Err(EnrichmentError::Fetching(_))));
        assert!(!has_checksum(&target, vocabulary::CRC64, "AAAA"));
    }

    #[test]
    fn test_unconfirmable_rogid_is_conflict() {
        let mut target = Protein::new("p53").unwrap();
        target.set_rogid(Some("someRogid9606")).unwrap();

        let result = enricher(UpdateStrategy::Addition).merge(
            &mut target,
            &Protein::new("p53").unwrap(),
            &mut Outcome::default(),
        );

        assert!(result.unwrap_err().is_conflict());
    }

    #[test]
    fn test_wrong_rogid_is_conflict() {
        let mut target = Protein::new("p53").unwrap();
        target.set_rogid(Some("notTheRightOne9606")).unwrap();

        let result = enricher(UpdateStrategy::Addition).merge(&mut target, &fetched(), &mut Outcome::default());

        assert!(result.unwrap_err().is_conflict());
        assert_eq!(target.rogid(), Some("notTheRightOne9606"));
    }

    #[test]
    fn test_overwrite_replaces_and_reports() {
        let mut target = Protein::new("p53").unwrap();
        target.core_mut().set_full_name(Some("old name".into()));
        let mut outcome = Outcome::default();

        enricher(UpdateStrategy::Overwrite)
            .merge(&mut target, &fetched(), &mut outcome)
            .unwrap();

        assert_eq!(target.core().short_name(), "P53_HUMAN");
        assert_eq!(target.core().full_name(), Some("Cellular tumor antigen p53"));
        assert!(outcome
            .reports
            .contains(&FieldReport::overwrite("FullName", Some("old name"), Some("Cellular tumor antigen p53"))));
        assert!(outcome
            .reports
            .contains(&FieldReport::overwrite("ShortName", Some("p53"), Some("P53_HUMAN"))));
    }

    #[test]
    fn test_mismatch_leaves_target_untouched() {
        let mut target = Protein::new("p53").unwrap();
        let mut outcome = Outcome::default();

        enricher(UpdateStrategy::Mismatch)
            .merge(&mut target, &fetched(), &mut outcome)
            .unwrap();

        assert!(target.core().full_name().is_none());
        assert!(target.uniprotkb().is_none());
        assert_eq!(outcome.reports.len(), 4);
    }

    #[test]
    fn test_enrich_through_fetcher() {
        let fetcher = MockProteinFetcher::new().with_entry("P04637", fetched());
        let enricher = enricher(UpdateStrategy::Addition).with_fetcher(fetcher);

        let mut target = Protein::new("p53").unwrap();
        target.set_uniprotkb(Some("P04637")).unwrap();
        let mut listener = RecordingListener::new();
        enricher.enrich(&mut target, &mut listener).unwrap();
        assert_eq!(target.sequence(), Some(SEQUENCE));

        let mut unknown = Protein::new("mdm2").unwrap();
        unknown.set_uniprotkb(Some("Q00987")).unwrap();
        let err = enricher.enrich(&mut unknown, &mut listener).unwrap_err();
        assert!(matches!(err, EnrichmentError::Fetching(_)));

        let mut unqueryable = Protein::new("orphan").unwrap();
        assert!(enricher.enrich(&mut unqueryable, &mut listener).is_err());
    }
}
