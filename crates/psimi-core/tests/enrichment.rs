//! End-to-end enrichment scenarios

use proptest::prelude::*;
use psimi_common::vocabulary;
use psimi_core::enrich::merge::{merge_aliases, merge_xrefs};
use psimi_core::enrich::{
    CollectionKind, EnrichmentStatus, Enricher, FieldReport, MockProteinFetcher, OrganismEnricher, ProteinEnricher,
    RecordingListener,
};
use psimi_core::model::{Alias, Checksum, Organism, Protein, Xref};
use psimi_core::{EnrichmentConfig, EnrichmentError, UpdateStrategy};

fn crc64(value: &str) -> Checksum {
    Checksum::new(vocabulary::CRC64.into(), value).unwrap()
}

fn p53_entry() -> Protein {
    let mut protein = Protein::new("P53_HUMAN").unwrap();
    protein
        .core_mut()
        .set_full_name(Some("Cellular tumor antigen p53".into()));
    protein.set_uniprotkb(Some("P04637")).unwrap();
    protein
        .core_mut()
        .aliases_mut()
        .push(Alias::typed(vocabulary::GENE_NAME.into(), "TP53").unwrap());
    protein
        .core_mut()
        .set_organism(Some(Organism::named(9606, "human", "Homo sapiens")));
    protein
}

fn enricher() -> ProteinEnricher {
    ProteinEnricher::new(EnrichmentConfig::default()).with_organism_enricher(OrganismEnricher::default())
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn test_full_name_addition_then_noop() {
    let mut target = Protein::new("p53").unwrap();
    let mut source = Protein::new("p53").unwrap();
    source
        .core_mut()
        .set_full_name(Some("Cellular tumor antigen p53".into()));
    let enricher = ProteinEnricher::new(EnrichmentConfig::default());

    let mut listener = RecordingListener::new();
    enricher.enrich_with(&mut target, &source, &mut listener).unwrap();

    assert_eq!(target.core().full_name(), Some("Cellular tumor antigen p53"));
    let reports: Vec<&FieldReport> = listener.reports().collect();
    assert_eq!(
        reports,
        vec![&FieldReport::addition("Full name", "Cellular tumor antigen p53")]
    );
    assert_eq!(listener.last_status(), Some(EnrichmentStatus::Success));

    let mut again = RecordingListener::new();
    enricher.enrich_with(&mut target, &source, &mut again).unwrap();
    assert_eq!(again.reports().count(), 0);
    assert_eq!(target.core().full_name(), Some("Cellular tumor antigen p53"));
}

#[test]
fn test_crc64_conflict_keeps_target_value() {
    let mut target = Protein::new("p53").unwrap();
    target.core_mut().checksums_mut().push(crc64("AAAA"));
    let mut source = Protein::new("p53").unwrap();
    source.core_mut().checksums_mut().push(crc64("BBBB"));

    let mut listener = RecordingListener::new();
    let err = enricher().enrich_with(&mut target, &source, &mut listener).unwrap_err();

    assert!(matches!(err, EnrichmentError::Conflict { field: "CRC64", .. }));
    let values: Vec<&str> = target.crc64s().map(Checksum::value).collect();
    assert_eq!(values, vec!["AAAA"]);
    assert_eq!(listener.last_status(), Some(EnrichmentStatus::Failed));
}

#[test]
fn test_conflict_still_reports_earlier_changes() {
    let mut target = Protein::new("p53").unwrap();
    target.core_mut().checksums_mut().push(crc64("AAAA"));
    let mut source = p53_entry();
    source.core_mut().checksums_mut().push(crc64("BBBB"));

    let mut listener = RecordingListener::new();
    assert!(enricher().enrich_with(&mut target, &source, &mut listener).is_err());

    assert_eq!(target.uniprotkb(), Some("P04637"));
    assert!(listener.reports().any(|r| r.field() == "Full name"));
    assert_eq!(listener.added(CollectionKind::Aliases).len(), 1);
}

#[test]
fn test_fetch_and_enrich_fills_organism_and_identifiers() {
    let fetcher = MockProteinFetcher::new().with_entry("P04637", p53_entry());
    let enricher = enricher().with_fetcher(fetcher);
    let mut target = Protein::new("p53").unwrap();
    target.set_uniprotkb(Some("P04637")).unwrap();

    let mut listener = RecordingListener::new();
    enricher.enrich(&mut target, &mut listener).unwrap();

    let organism = target.core().organism().unwrap();
    assert_eq!(organism.tax_id(), 9606);
    assert_eq!(organism.scientific_name(), Some("Homo sapiens"));
    assert_eq!(target.gene_name(), Some("TP53"));
    assert!(listener.added(CollectionKind::Identifiers).is_empty());

    let json = listener.to_json().unwrap();
    assert!(json.contains("\"event\": \"completed\""));
}

#[test]
fn test_remove_mode_drops_unmatched_identifiers() {
    let mut target = Protein::new("p53").unwrap();
    target.set_uniprotkb(Some("Q00000")).unwrap();
    let enricher = ProteinEnricher::new(EnrichmentConfig::default().with_remove_unmatched(true))
        .with_organism_enricher(OrganismEnricher::default());

    let mut listener = RecordingListener::new();
    enricher.enrich_with(&mut target, &p53_entry(), &mut listener).unwrap();

    assert_eq!(target.uniprotkb(), Some("P04637"));
    assert_eq!(target.core().identifiers().len(), 1);
    assert_eq!(listener.removed(CollectionKind::Identifiers), vec!["uniprotkb:Q00000(identity)"]);
}

#[test]
fn test_config_from_lookup_drives_strategy() {
    let config = EnrichmentConfig::from_lookup(|key| match key {
        "PSIMI_ENRICHMENT_STRATEGY" => Some("mismatch".to_string()),
        _ => None,
    })
    .unwrap();
    assert_eq!(config.strategy, UpdateStrategy::Mismatch);

    let mut target = Protein::new("p53").unwrap();
    let mut listener = RecordingListener::new();
    ProteinEnricher::new(config)
        .enrich_with(&mut target, &p53_entry(), &mut listener)
        .unwrap();

    assert!(target.core().full_name().is_none());
    assert!(listener.reports().all(|r| matches!(r, FieldReport::Mismatch { .. })));
}

// ============================================================================
// PROPERTIES
// ============================================================================

fn accessions() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[OPQ][0-9][A-Z0-9]{3}[0-9]", 0..8)
}

proptest! {
    #[test]
    fn prop_merging_twice_changes_nothing(
        target in accessions(),
        source in accessions(),
        names in prop::collection::vec("[a-zA-Z0-9]{1,6}", 0..6),
        remove in any::<bool>(),
    ) {
        let mut xrefs: Vec<Xref> = target
            .iter()
            .map(|id| Xref::identity(vocabulary::UNIPROTKB, id.as_str()).unwrap())
            .collect();
        let fetched: Vec<Xref> = source
            .iter()
            .map(|id| Xref::identity(vocabulary::UNIPROTKB, id.as_str()).unwrap())
            .collect();

        merge_xrefs(&mut xrefs, &fetched, remove);
        let snapshot = xrefs.clone();
        let second = merge_xrefs(&mut xrefs, &fetched, remove);
        prop_assert!(second.is_empty());
        prop_assert_eq!(&xrefs, &snapshot);
        for xref in &fetched {
            prop_assert!(xrefs.contains(xref));
        }

        let mut aliases: Vec<Alias> = Vec::new();
        let fetched_aliases: Vec<Alias> = names.iter().map(|n| Alias::new(n.as_str()).unwrap()).collect();
        merge_aliases(&mut aliases, &fetched_aliases, remove);
        prop_assert!(merge_aliases(&mut aliases, &fetched_aliases, remove).is_empty());
    }

    #[test]
    fn prop_protein_enrichment_is_idempotent(full_name in "[A-Za-z ]{1,20}", accession in "P[0-9]{5}") {
        let mut source = Protein::new("entry").unwrap();
        source.core_mut().set_full_name(Some(full_name));
        source.set_uniprotkb(Some(&accession)).unwrap();
        let enricher = ProteinEnricher::new(EnrichmentConfig::default());
        let mut target = Protein::new("p53").unwrap();

        enricher.enrich_with(&mut target, &source, &mut RecordingListener::new()).unwrap();
        let mut listener = RecordingListener::new();
        enricher.enrich_with(&mut target, &source, &mut listener).unwrap();

        prop_assert_eq!(listener.reports().count(), 0);
        prop_assert!(listener.added(CollectionKind::Identifiers).is_empty());
        prop_assert_eq!(target.uniprotkb(), Some(accession.as_str()));
    }
}
