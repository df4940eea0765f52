//! Cached views over observed collections

use proptest::prelude::*;
use psimi_common::vocabulary;
use psimi_core::model::{Checksum, ObservedList, Protein, Rank, Ranked, Xref};

fn uniprot(id: &str) -> Xref {
    Xref::identity(vocabulary::UNIPROTKB, id).unwrap()
}

fn secondary(id: &str) -> Xref {
    Xref::secondary(vocabulary::UNIPROTKB, id).unwrap()
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn test_identity_accession_survives_secondary_addition() {
    let mut protein = Protein::new("p53").unwrap();
    assert_eq!(protein.uniprotkb(), None);

    protein.core_mut().identifiers_mut().push(uniprot("P12345"));
    assert_eq!(protein.uniprotkb(), Some("P12345"));

    protein.core_mut().identifiers_mut().push(secondary("P99999"));
    assert_eq!(protein.uniprotkb(), Some("P12345"));

    let removed = protein.core_mut().identifiers_mut().remove(&uniprot("P12345"));
    assert!(removed.is_some());
    assert_eq!(protein.uniprotkb(), Some("P99999"));
}

#[test]
fn test_setter_replaces_cached_element_only() {
    let mut protein = Protein::new("p53").unwrap();
    protein.core_mut().identifiers_mut().push(uniprot("P04637"));
    protein.core_mut().identifiers_mut().push(secondary("Q15086"));

    protein.set_uniprotkb(Some("P04638")).unwrap();

    assert_eq!(protein.uniprotkb(), Some("P04638"));
    let ids: Vec<&str> = protein.core().identifiers().iter().map(Xref::id).collect();
    assert_eq!(ids, vec!["Q15086", "P04638"]);

    protein.set_uniprotkb(None).unwrap();
    assert_eq!(protein.uniprotkb(), None);
    assert!(protein.core().identifiers().is_empty());
}

#[test]
fn test_clear_nulls_every_view() {
    let mut protein = Protein::new("p53").unwrap();
    protein.set_uniprotkb(Some("P04637")).unwrap();
    protein.set_refseq(Some("NP_000537")).unwrap();
    protein.set_rogid(Some("IZPXYnJCj4F1aDVfrqSitEOEPP44932")).unwrap();

    protein.core_mut().identifiers_mut().clear();

    assert_eq!(protein.uniprotkb(), None);
    assert_eq!(protein.refseq(), None);
    assert!(protein.rogid().is_some());

    protein.core_mut().checksums_mut().clear();
    assert_eq!(protein.rogid(), None);
}

#[test]
fn test_cleared_identifiers_keep_their_views() {
    let mut protein = Protein::new("p53").unwrap();
    protein.set_uniprotkb(Some("P04637")).unwrap();
    protein.core_mut().identifiers_mut().clear();

    protein.core_mut().identifiers_mut().push(uniprot("P12345"));
    assert_eq!(protein.uniprotkb(), Some("P12345"));
}

#[test]
fn test_plain_checksum_backs_rogid() {
    let mut protein = Protein::new("p53").unwrap();
    protein
        .core_mut()
        .checksums_mut()
        .push(Checksum::new(vocabulary::CRC64.into(), "5D6F26E4F4F1A35C").unwrap());
    assert_eq!(protein.rogid(), None);

    protein
        .core_mut()
        .checksums_mut()
        .push(Checksum::new(vocabulary::ROGID.into(), "abc9606").unwrap());
    assert_eq!(protein.rogid(), Some("abc9606"));
}

// ============================================================================
// PROPERTIES
// ============================================================================

#[derive(Debug, Clone)]
enum Op {
    Push { uniprot: bool, rank: Rank, id: u8 },
    Remove(usize),
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    let rank = prop_oneof![Just(Rank::Identity), Just(Rank::Plain), Just(Rank::Secondary)];
    prop_oneof![
        6 => (any::<bool>(), rank, 0u8..8).prop_map(|(uniprot, rank, id)| Op::Push { uniprot, rank, id }),
        3 => (0usize..16).prop_map(Op::Remove),
        1 => Just(Op::Clear),
    ]
}

fn xref(uniprot: bool, rank: Rank, id: u8) -> Xref {
    let database = if uniprot {
        vocabulary::UNIPROTKB
    } else {
        vocabulary::REFSEQ
    };
    let id = format!("P{id:05}");
    match rank {
        Rank::Identity => Xref::identity(database, id).unwrap(),
        Rank::Secondary => Xref::secondary(database, id).unwrap(),
        Rank::Plain => Xref::new(database.into(), id).unwrap(),
    }
}

fn is_uniprot(xref: &Xref) -> bool {
    xref.is_from(vocabulary::UNIPROTKB)
}

/// Highest rank wins, earliest on ties.
fn expected(items: &[Xref]) -> Option<&Xref> {
    let mut best: Option<&Xref> = None;
    for item in items.iter().filter(|x| is_uniprot(x)) {
        match best {
            Some(current) if current.rank() >= item.rank() => {}
            _ => best = Some(item),
        }
    }
    best
}

proptest! {
    #[test]
    fn prop_cached_view_tracks_best_candidate(ops in prop::collection::vec(op(), 0..40)) {
        let mut list: ObservedList<Xref> = ObservedList::with_views(&[is_uniprot]);

        for op in ops {
            match op {
                Op::Push { uniprot, rank, id } => list.push(xref(uniprot, rank, id)),
                Op::Remove(index) => {
                    let len = list.len();
                    prop_assert_eq!(list.remove_at(index).is_some(), index < len);
                }
                Op::Clear => list.clear(),
            }

            let cached = list.cached(0);
            let wanted = expected(list.as_slice());
            prop_assert_eq!(cached.map(Xref::id), wanted.map(Xref::id));
            prop_assert_eq!(cached.map(Xref::rank), wanted.map(Xref::rank));
            if let Some(cached) = cached {
                prop_assert!(list.iter().any(|x| std::ptr::eq(x, cached)));
            }
        }
    }

    #[test]
    fn prop_protein_accession_is_always_present(ids in prop::collection::vec((0u8..6, any::<bool>()), 1..20)) {
        let mut protein = Protein::new("p53").unwrap();

        for (id, remove) in ids {
            let accession = format!("P{id:05}");
            if remove {
                protein.core_mut().identifiers_mut().remove(&uniprot(&accession));
            } else {
                protein.core_mut().identifiers_mut().push(uniprot(&accession));
            }

            match protein.uniprotkb() {
                Some(current) => prop_assert!(protein.core().identifiers().iter().any(|x| x.id() == current)),
                None => prop_assert!(protein.core().identifiers().iter().all(|x| !is_uniprot(x))),
            }
        }
    }
}
