//! Interactor comparators.
//!
//! [`InteractorComparator`] orders interactors by kind first (bioactive
//! entity, protein, gene, nucleic acid, complex, interactor set, other) and
//! then with the kind-specific rules when both sides share a kind.
//!
//! In the default family the kind-specific rules are ladders: the first
//! primary identifier both sides carry decides, and the shared interactor
//! fields are the fallback. In the unambiguous family every identifier is
//! compared in turn, with absent values last, before the shared fields.
//!
//! The `exact` variants also compare organisms.

use super::participant::ParticipantComparator;
use super::terms::{
    CvTermComparator, IdentifierComparator, OrganismComparator, UNAMBIGUOUS_CHECKSUM,
    UNAMBIGUOUS_XREF,
};
use super::{compare_collections, compare_if_both, compare_options, compare_shared, Comparator, Family};
use crate::model::{
    BioactiveEntity, Complex, Gene, Interactor, InteractorCore, InteractorSet, NucleicAcid,
    Protein,
};
use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, Copy)]
pub struct InteractorComparator {
    family: Family,
    exact: bool,
    descend_into_complexes: bool,
}

pub const DEFAULT_INTERACTOR: InteractorComparator =
    InteractorComparator::new(Family::Default, false);
pub const DEFAULT_EXACT_INTERACTOR: InteractorComparator =
    InteractorComparator::new(Family::Default, true);
pub const UNAMBIGUOUS_INTERACTOR: InteractorComparator =
    InteractorComparator::new(Family::Unambiguous, false);
pub const UNAMBIGUOUS_EXACT_INTERACTOR: InteractorComparator =
    InteractorComparator::new(Family::Unambiguous, true);

impl InteractorComparator {
    pub const fn new(family: Family, exact: bool) -> Self {
        Self {
            family,
            exact,
            descend_into_complexes: true,
        }
    }

    /// Compare complexes on their own fields only, ignoring their components.
    pub const fn without_complex_components(mut self) -> Self {
        self.descend_into_complexes = false;
        self
    }

    pub const fn family(&self) -> Family {
        self.family
    }

    pub fn is_exact(&self) -> bool {
        self.exact
    }

    fn cv_term(&self) -> CvTermComparator {
        CvTermComparator::new(self.family)
    }

    fn organism(&self) -> OrganismComparator {
        OrganismComparator::new(self.family)
    }

    fn compare_organisms(&self, a: &InteractorCore, b: &InteractorCore) -> Ordering {
        if self.exact {
            self.organism().compare_opt(a.organism(), b.organism())
        } else {
            Ordering::Equal
        }
    }

    fn compare_ids(&self, a: Option<&str>, b: Option<&str>) -> Ordering {
        compare_options(a, b, |x, y| self.family.compare_str(x, y))
    }

    /// Run a ladder of primary identifiers.
    ///
    /// Default family: the first rung both sides have decides, else `fallback`.
    /// Unambiguous family: every rung in turn, then `fallback`.
    fn ladder(
        &self,
        rungs: &[(Option<&str>, Option<&str>)],
        fallback: impl FnOnce() -> Ordering,
    ) -> Ordering {
        match self.family {
            Family::Default => {
                for (a, b) in rungs {
                    if let Some(c) = compare_if_both(*a, *b, |x, y| self.family.compare_str(x, y)) {
                        return c;
                    }
                }
                fallback()
            }
            Family::Unambiguous => {
                for (a, b) in rungs {
                    let c = self.compare_ids(*a, *b);
                    if c != Ordering::Equal {
                        return c;
                    }
                }
                fallback()
            }
        }
    }
}

impl Comparator<InteractorCore> for InteractorComparator {
    /// The fields every interactor kind shares.
    fn compare(&self, a: &InteractorCore, b: &InteractorCore) -> Ordering {
        let comp = self.cv_term().compare(a.interactor_type(), b.interactor_type());
        if comp != Ordering::Equal {
            return comp;
        }

        match self.family {
            Family::Default => {
                let ids = if !a.identifiers().is_empty() && !b.identifiers().is_empty() {
                    compare_shared(
                        a.identifiers(),
                        b.identifiers(),
                        &IdentifierComparator::new(self.family),
                    )
                } else {
                    super::compare_ignore_case(a.short_name(), b.short_name())
                };
                ids.then_with(|| self.compare_organisms(a, b))
            }
            Family::Unambiguous => {
                compare_collections(a.identifiers(), b.identifiers(), &UNAMBIGUOUS_XREF)
                    .then_with(|| {
                        compare_collections(a.checksums(), b.checksums(), &UNAMBIGUOUS_CHECKSUM)
                    })
                    .then_with(|| a.short_name().cmp(b.short_name()))
                    .then_with(|| self.compare_organisms(a, b))
            }
        }
    }
}

impl Comparator<Protein> for InteractorComparator {
    fn compare(&self, a: &Protein, b: &Protein) -> Ordering {
        let identifiers = [
            (a.uniprotkb(), b.uniprotkb()),
            (a.refseq(), b.refseq()),
            (a.rogid(), b.rogid()),
        ];
        match self.family {
            Family::Default => {
                for (x, y) in identifiers {
                    if let Some(c) = compare_if_both(x, y, Ord::cmp) {
                        return c;
                    }
                }
                if let Some(c) = compare_if_both(a.gene_name(), b.gene_name(), super::compare_ignore_case) {
                    return c.then_with(|| self.compare_organisms(a.core(), b.core()));
                }
                if let Some(c) = compare_if_both(a.sequence(), b.sequence(), Ord::cmp) {
                    return c.then_with(|| self.compare_organisms(a.core(), b.core()));
                }
                self.compare(a.core(), b.core())
            }
            Family::Unambiguous => self.ladder(
                &[
                    identifiers[0],
                    identifiers[1],
                    identifiers[2],
                    (a.gene_name(), b.gene_name()),
                    (a.sequence(), b.sequence()),
                ],
                || self.compare(a.core(), b.core()),
            ),
        }
    }
}

impl Comparator<Gene> for InteractorComparator {
    fn compare(&self, a: &Gene, b: &Gene) -> Ordering {
        let comp = self.compare(a.core(), b.core());
        if comp != Ordering::Equal {
            return comp;
        }
        self.ladder(
            &[
                (a.ensembl(), b.ensembl()),
                (a.ensembl_genomes(), b.ensembl_genomes()),
                (a.entrez_gene_id(), b.entrez_gene_id()),
                (a.refseq(), b.refseq()),
            ],
            || Ordering::Equal,
        )
    }
}

impl Comparator<NucleicAcid> for InteractorComparator {
    fn compare(&self, a: &NucleicAcid, b: &NucleicAcid) -> Ordering {
        self.ladder(
            &[
                (a.ddbj_embl_genbank(), b.ddbj_embl_genbank()),
                (a.refseq(), b.refseq()),
            ],
            || self.compare(a.core(), b.core()),
        )
    }
}

impl Comparator<BioactiveEntity> for InteractorComparator {
    fn compare(&self, a: &BioactiveEntity, b: &BioactiveEntity) -> Ordering {
        self.ladder(
            &[
                (a.chebi(), b.chebi()),
                (a.smiles(), b.smiles()),
                (a.standard_inchi_key(), b.standard_inchi_key()),
                (a.standard_inchi(), b.standard_inchi()),
            ],
            || self.compare(a.core(), b.core()),
        )
    }
}

impl Comparator<Complex> for InteractorComparator {
    fn compare(&self, a: &Complex, b: &Complex) -> Ordering {
        let comp = self
            .compare(a.core(), b.core())
            .then_with(|| self.cv_term().compare_opt(a.interaction_type(), b.interaction_type()));
        if comp != Ordering::Equal || !self.descend_into_complexes {
            return comp;
        }
        compare_collections(
            a.participants(),
            b.participants(),
            &ParticipantComparator::with_interactor(*self),
        )
    }
}

impl Comparator<InteractorSet> for InteractorComparator {
    fn compare(&self, a: &InteractorSet, b: &InteractorSet) -> Ordering {
        self.compare(a.core(), b.core())
            .then_with(|| compare_collections(a.members(), b.members(), self))
    }
}

impl Comparator<Interactor> for InteractorComparator {
    fn compare(&self, a: &Interactor, b: &Interactor) -> Ordering {
        let comp = a.kind().cmp(&b.kind());
        if comp != Ordering::Equal {
            return comp;
        }
        match (a, b) {
            (Interactor::BioactiveEntity(x), Interactor::BioactiveEntity(y)) => self.compare(x, y),
            (Interactor::Protein(x), Interactor::Protein(y)) => self.compare(x, y),
            (Interactor::Gene(x), Interactor::Gene(y)) => self.compare(x, y),
            (Interactor::NucleicAcid(x), Interactor::NucleicAcid(y)) => self.compare(x, y),
            (Interactor::Complex(x), Interactor::Complex(y)) => self.compare(x, y),
            (Interactor::InteractorSet(x), Interactor::InteractorSet(y)) => self.compare(x, y),
            _ => self.compare(a.core(), b.core()),
        }
    }
}

// ============================================================================
// Equality and hashing
// ============================================================================

/// Hash of the fields the unambiguous exact base comparison inspects.
///
/// Collections are hashed as the wrapping sum of their element hashes so the
/// result does not depend on element order.
pub fn hash_interactor_core<H: Hasher>(core: &InteractorCore, state: &mut H) {
    core.interactor_type().hash(state);
    unordered_hash(core.identifiers()).hash(state);
    unordered_hash(core.checksums()).hash(state);
    core.short_name().hash(state);
    core.organism().hash(state);
}

pub(crate) fn unordered_hash<'a, T: Hash + 'a>(items: impl IntoIterator<Item = &'a T>) -> u64 {
    items.into_iter().fold(0u64, |acc, item| {
        let mut hasher = DefaultHasher::new();
        item.hash(&mut hasher);
        acc.wrapping_add(hasher.finish())
    })
}

macro_rules! unambiguous_equality {
    ($($ty:ty),* $(,)?) => {
        $(
            impl PartialEq for $ty {
                fn eq(&self, other: &Self) -> bool {
                    UNAMBIGUOUS_EXACT_INTERACTOR.are_equal(self, other)
                }
            }

            impl Eq for $ty {}
        )*
    };
}

unambiguous_equality!(
    InteractorCore,
    Protein,
    Gene,
    NucleicAcid,
    BioactiveEntity,
    Complex,
    InteractorSet,
    Interactor,
);

impl Hash for InteractorCore {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_interactor_core(self, state);
    }
}

impl Hash for Protein {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_interactor_core(self.core(), state);
        self.uniprotkb().hash(state);
        self.refseq().hash(state);
        self.rogid().hash(state);
        self.gene_name().hash(state);
        self.sequence().hash(state);
    }
}

impl Hash for Gene {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_interactor_core(self.core(), state);
        self.ensembl().hash(state);
        self.ensembl_genomes().hash(state);
        self.entrez_gene_id().hash(state);
        self.refseq().hash(state);
    }
}

impl Hash for NucleicAcid {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_interactor_core(self.core(), state);
        self.ddbj_embl_genbank().hash(state);
        self.refseq().hash(state);
    }
}

impl Hash for BioactiveEntity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_interactor_core(self.core(), state);
        self.chebi().hash(state);
        self.smiles().hash(state);
        self.standard_inchi_key().hash(state);
        self.standard_inchi().hash(state);
    }
}

impl Hash for Complex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_interactor_core(self.core(), state);
        self.interaction_type().hash(state);
    }
}

impl Hash for InteractorSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_interactor_core(self.core(), state);
        unordered_hash(self.members()).hash(state);
    }
}

impl Hash for Interactor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        match self {
            Interactor::BioactiveEntity(i) => i.hash(state),
            Interactor::Protein(i) => i.hash(state),
            Interactor::Gene(i) => i.hash(state),
            Interactor::NucleicAcid(i) => i.hash(state),
            Interactor::Complex(i) => i.hash(state),
            Interactor::InteractorSet(i) => i.hash(state),
            Interactor::Other(core) => core.hash(state),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{Organism, Xref};
    use psimi_common::vocabulary;

    fn protein(name: &str, uniprot: Option<&str>) -> Protein {
        let mut p = Protein::new(name).unwrap();
        p.set_uniprotkb(uniprot).unwrap();
        p
    }

    #[test]
    fn test_kind_decides_first() {
        let entity: Interactor = BioactiveEntity::new("atp").unwrap().into();
        let prot: Interactor = protein("p53", None).into();
        let gene: Interactor = Gene::new("tp53").unwrap().into();

        assert_eq!(DEFAULT_INTERACTOR.compare(&entity, &prot), Ordering::Less);
        assert_eq!(DEFAULT_INTERACTOR.compare(&gene, &prot), Ordering::Greater);
    }

    #[test]
    fn test_default_protein_uniprotkb_decides() {
        let a = protein("p53", Some("P04637"));
        let b = protein("TP53_HUMAN", Some("P04637"));
        assert!(DEFAULT_INTERACTOR.are_equal(&a, &b));
        assert!(!UNAMBIGUOUS_INTERACTOR.are_equal(&a, &b));
    }

    #[test]
    fn test_default_protein_falls_back_to_short_name() {
        let a = protein("P53", None);
        let b = protein("p53", None);
        let c = protein("mdm2", None);
        assert!(DEFAULT_INTERACTOR.are_equal(&a, &b));
        assert!(!DEFAULT_INTERACTOR.are_equal(&a, &c));
    }

    #[test]
    fn test_exact_comparators_check_organism() {
        let mut a = protein("p53", None);
        let mut b = protein("p53", None);
        a.core_mut().set_organism(Some(Organism::new(9606)));
        b.core_mut().set_organism(Some(Organism::new(10090)));

        assert!(DEFAULT_INTERACTOR.are_equal(&a, &b));
        assert!(!DEFAULT_EXACT_INTERACTOR.are_equal(&a, &b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_gene_compares_base_before_identifiers() {
        let mut a = Gene::new("brca2").unwrap();
        let mut b = Gene::new("BRCA2").unwrap();
        a.set_entrez_gene_id(Some("675")).unwrap();
        b.set_entrez_gene_id(Some("676")).unwrap();

        // identifiers exist on both sides, so the base comparison walks them and finds no match
        assert_ne!(DEFAULT_INTERACTOR.compare(&a, &b), Ordering::Equal);

        b.set_entrez_gene_id(Some("675")).unwrap();
        assert!(DEFAULT_INTERACTOR.are_equal(&a, &b));
    }

    #[test]
    fn test_shared_identifier_makes_default_base_equal() {
        let mut a = InteractorCore::new("x", vocabulary::UNKNOWN_INTERACTOR.into()).unwrap();
        let mut b = InteractorCore::new("y", vocabulary::UNKNOWN_INTERACTOR.into()).unwrap();
        a.identifiers_mut()
            .push(Xref::new(vocabulary::CHEBI.into(), "CHEBI:1").unwrap());
        a.identifiers_mut()
            .push(Xref::new(vocabulary::REFSEQ.into(), "NP_1").unwrap());
        b.identifiers_mut()
            .push(Xref::identity(vocabulary::REFSEQ, "NP_1").unwrap());

        assert!(DEFAULT_INTERACTOR.are_equal(&a, &b));
        assert!(!UNAMBIGUOUS_INTERACTOR.are_equal(&a, &b));
    }

    #[test]
    fn test_equal_interactors_hash_alike() {
        use std::collections::HashSet;

        let mut a = protein("p53", Some("P04637"));
        let mut b = protein("p53", Some("P04637"));
        a.set_rogid(Some("x9606")).unwrap();
        b.set_rogid(Some("x9606")).unwrap();

        let mut set = HashSet::new();
        set.insert(Interactor::from(a));
        assert!(!set.insert(Interactor::from(b)));
    }

    #[test]
    fn test_complex_components_can_be_skipped() {
        use crate::model::Participant;

        let mut a = Complex::new("mcm").unwrap();
        let b = Complex::new("mcm").unwrap();
        a.add_participant(Participant::new(protein("mcm2", None)));

        assert_eq!(DEFAULT_INTERACTOR.compare(&a, &b), Ordering::Greater);
        assert!(DEFAULT_INTERACTOR
            .without_complex_components()
            .are_equal(&a, &b));
    }
}
