//! Comparators for value types: terms, cross-references, checksums...

use super::{compare_collections, compare_options, compare_shared, Comparator, Family};
use crate::model::{
    Alias, Annotation, Checksum, Confidence, CvTerm, Organism, Parameter, Publication, Xref,
};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

// ============================================================================
// CvTerm
// ============================================================================

/// Terms with an MI identifier are identified by it, others by short name.
#[derive(Debug, Clone, Copy)]
pub struct CvTermComparator {
    family: Family,
}

pub const DEFAULT_CV_TERM: CvTermComparator = CvTermComparator::new(Family::Default);
pub const UNAMBIGUOUS_CV_TERM: CvTermComparator = CvTermComparator::new(Family::Unambiguous);

impl CvTermComparator {
    pub const fn new(family: Family) -> Self {
        Self { family }
    }

    pub fn family(&self) -> Family {
        self.family
    }
}

impl Comparator<CvTerm> for CvTermComparator {
    fn compare(&self, a: &CvTerm, b: &CvTerm) -> Ordering {
        match self.family {
            // A missing MI on either side falls back to the short name.
            Family::Default => match (a.mi_identifier(), b.mi_identifier()) {
                (Some(x), Some(y)) => x.cmp(y),
                _ => super::compare_ignore_case(a.short_name(), b.short_name()),
            },
            Family::Unambiguous => match (a.mi_identifier(), b.mi_identifier()) {
                (Some(x), Some(y)) => x.cmp(y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => super::compare_ignore_case(a.short_name(), b.short_name()),
            },
        }
    }
}

fn lowercase(s: &str) -> String {
    s.to_ascii_lowercase()
}

impl PartialEq for CvTerm {
    fn eq(&self, other: &Self) -> bool {
        UNAMBIGUOUS_CV_TERM.are_equal(self, other)
    }
}

impl Eq for CvTerm {}

impl Hash for CvTerm {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.mi_identifier() {
            Some(mi) => mi.hash(state),
            None => lowercase(self.short_name()).hash(state),
        }
    }
}

// ============================================================================
// Xref
// ============================================================================

/// Database, then id, then qualifier.
#[derive(Debug, Clone, Copy)]
pub struct XrefComparator {
    family: Family,
    database: CvTermComparator,
}

pub const DEFAULT_XREF: XrefComparator = XrefComparator::new(Family::Default);
pub const UNAMBIGUOUS_XREF: XrefComparator = XrefComparator::new(Family::Unambiguous);

impl XrefComparator {
    pub const fn new(family: Family) -> Self {
        Self::with_parts(family, CvTermComparator::new(family))
    }

    pub const fn with_parts(family: Family, database: CvTermComparator) -> Self {
        Self { family, database }
    }
}

impl Comparator<Xref> for XrefComparator {
    fn compare(&self, a: &Xref, b: &Xref) -> Ordering {
        self.database
            .compare(a.database(), b.database())
            .then_with(|| self.family.compare_str(a.id(), b.id()))
            .then_with(|| self.database.compare_opt(a.qualifier(), b.qualifier()))
    }
}

impl PartialEq for Xref {
    fn eq(&self, other: &Self) -> bool {
        UNAMBIGUOUS_XREF.are_equal(self, other)
    }
}

impl Eq for Xref {}

impl Hash for Xref {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.database().hash(state);
        self.id().hash(state);
        self.qualifier().hash(state);
    }
}

/// Database and id only; qualifiers are ignored.
#[derive(Debug, Clone, Copy)]
pub struct IdentifierComparator {
    family: Family,
    database: CvTermComparator,
}

pub const DEFAULT_IDENTIFIER: IdentifierComparator = IdentifierComparator::new(Family::Default);
pub const UNAMBIGUOUS_IDENTIFIER: IdentifierComparator =
    IdentifierComparator::new(Family::Unambiguous);

impl IdentifierComparator {
    pub const fn new(family: Family) -> Self {
        Self {
            family,
            database: CvTermComparator::new(family),
        }
    }
}

impl Comparator<Xref> for IdentifierComparator {
    fn compare(&self, a: &Xref, b: &Xref) -> Ordering {
        self.database
            .compare(a.database(), b.database())
            .then_with(|| self.family.compare_str(a.id(), b.id()))
    }
}

// ============================================================================
// Alias, checksum, annotation, confidence
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct AliasComparator {
    family: Family,
    cv_term: CvTermComparator,
}

pub const DEFAULT_ALIAS: AliasComparator = AliasComparator::new(Family::Default);
pub const UNAMBIGUOUS_ALIAS: AliasComparator = AliasComparator::new(Family::Unambiguous);

impl AliasComparator {
    pub const fn new(family: Family) -> Self {
        Self {
            family,
            cv_term: CvTermComparator::new(family),
        }
    }
}

impl Comparator<Alias> for AliasComparator {
    fn compare(&self, a: &Alias, b: &Alias) -> Ordering {
        self.cv_term
            .compare_opt(a.alias_type(), b.alias_type())
            .then_with(|| self.family.compare_str(a.name(), b.name()))
    }
}

impl PartialEq for Alias {
    fn eq(&self, other: &Self) -> bool {
        UNAMBIGUOUS_ALIAS.are_equal(self, other)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ChecksumComparator {
    method: CvTermComparator,
}

pub const DEFAULT_CHECKSUM: ChecksumComparator = ChecksumComparator::new(Family::Default);
pub const UNAMBIGUOUS_CHECKSUM: ChecksumComparator = ChecksumComparator::new(Family::Unambiguous);

impl ChecksumComparator {
    pub const fn new(family: Family) -> Self {
        Self {
            method: CvTermComparator::new(family),
        }
    }
}

impl Comparator<Checksum> for ChecksumComparator {
    /// Checksum values are always compared exactly.
    fn compare(&self, a: &Checksum, b: &Checksum) -> Ordering {
        self.method
            .compare(a.method(), b.method())
            .then_with(|| a.value().cmp(b.value()))
    }
}

impl PartialEq for Checksum {
    fn eq(&self, other: &Self) -> bool {
        UNAMBIGUOUS_CHECKSUM.are_equal(self, other)
    }
}

impl Eq for Checksum {}

impl Hash for Checksum {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.method().hash(state);
        self.value().hash(state);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AnnotationComparator {
    family: Family,
    topic: CvTermComparator,
}

pub const DEFAULT_ANNOTATION: AnnotationComparator = AnnotationComparator::new(Family::Default);
pub const UNAMBIGUOUS_ANNOTATION: AnnotationComparator =
    AnnotationComparator::new(Family::Unambiguous);

impl AnnotationComparator {
    pub const fn new(family: Family) -> Self {
        Self {
            family,
            topic: CvTermComparator::new(family),
        }
    }
}

impl Comparator<Annotation> for AnnotationComparator {
    fn compare(&self, a: &Annotation, b: &Annotation) -> Ordering {
        self.topic
            .compare(a.topic(), b.topic())
            .then_with(|| compare_options(a.value(), b.value(), |x, y| self.family.compare_str(x, y)))
    }
}

impl PartialEq for Annotation {
    fn eq(&self, other: &Self) -> bool {
        UNAMBIGUOUS_ANNOTATION.are_equal(self, other)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ConfidenceComparator {
    confidence_type: CvTermComparator,
}

pub const DEFAULT_CONFIDENCE: ConfidenceComparator = ConfidenceComparator::new(Family::Default);
pub const UNAMBIGUOUS_CONFIDENCE: ConfidenceComparator =
    ConfidenceComparator::new(Family::Unambiguous);

impl ConfidenceComparator {
    pub const fn new(family: Family) -> Self {
        Self {
            confidence_type: CvTermComparator::new(family),
        }
    }
}

impl Comparator<Confidence> for ConfidenceComparator {
    fn compare(&self, a: &Confidence, b: &Confidence) -> Ordering {
        self.confidence_type
            .compare(a.confidence_type(), b.confidence_type())
            .then_with(|| a.value().cmp(b.value()))
    }
}

impl PartialEq for Confidence {
    fn eq(&self, other: &Self) -> bool {
        UNAMBIGUOUS_CONFIDENCE.are_equal(self, other)
    }
}

// ============================================================================
// Parameter
// ============================================================================

/// Type, value (factor, base, exponent), uncertainty, then unit.
#[derive(Debug, Clone, Copy)]
pub struct ParameterComparator {
    cv_term: CvTermComparator,
}

pub const DEFAULT_PARAMETER: ParameterComparator = ParameterComparator::new(Family::Default);
pub const UNAMBIGUOUS_PARAMETER: ParameterComparator =
    ParameterComparator::new(Family::Unambiguous);

impl ParameterComparator {
    pub const fn new(family: Family) -> Self {
        Self {
            cv_term: CvTermComparator::new(family),
        }
    }
}

impl Comparator<Parameter> for ParameterComparator {
    fn compare(&self, a: &Parameter, b: &Parameter) -> Ordering {
        let (va, vb) = (a.value(), b.value());
        self.cv_term
            .compare(a.parameter_type(), b.parameter_type())
            .then_with(|| va.factor.total_cmp(&vb.factor))
            .then_with(|| va.base.cmp(&vb.base))
            .then_with(|| va.exponent.cmp(&vb.exponent))
            .then_with(|| {
                compare_options(
                    a.uncertainty().as_ref(),
                    b.uncertainty().as_ref(),
                    f64::total_cmp,
                )
            })
            .then_with(|| self.cv_term.compare_opt(a.unit(), b.unit()))
    }
}

impl PartialEq for Parameter {
    fn eq(&self, other: &Self) -> bool {
        UNAMBIGUOUS_PARAMETER.are_equal(self, other)
    }
}

// ============================================================================
// Organism
// ============================================================================

/// Taxid; the unambiguous family also compares cell type, tissue and compartment.
#[derive(Debug, Clone, Copy)]
pub struct OrganismComparator {
    family: Family,
    cv_term: CvTermComparator,
}

pub const DEFAULT_ORGANISM: OrganismComparator = OrganismComparator::new(Family::Default);
pub const UNAMBIGUOUS_ORGANISM: OrganismComparator = OrganismComparator::new(Family::Unambiguous);

impl OrganismComparator {
    pub const fn new(family: Family) -> Self {
        Self {
            family,
            cv_term: CvTermComparator::new(family),
        }
    }
}

impl Comparator<Organism> for OrganismComparator {
    fn compare(&self, a: &Organism, b: &Organism) -> Ordering {
        let by_taxid = a.tax_id().cmp(&b.tax_id());
        match self.family {
            Family::Default => by_taxid,
            Family::Unambiguous => by_taxid
                .then_with(|| self.cv_term.compare_opt(a.cell_type(), b.cell_type()))
                .then_with(|| self.cv_term.compare_opt(a.tissue(), b.tissue()))
                .then_with(|| self.cv_term.compare_opt(a.compartment(), b.compartment())),
        }
    }
}

impl PartialEq for Organism {
    fn eq(&self, other: &Self) -> bool {
        UNAMBIGUOUS_ORGANISM.are_equal(self, other)
    }
}

impl Hash for Organism {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tax_id().hash(state);
        self.cell_type().hash(state);
        self.tissue().hash(state);
        self.compartment().hash(state);
    }
}

// ============================================================================
// Publication
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct PublicationComparator {
    family: Family,
    identifier: IdentifierComparator,
}

pub const DEFAULT_PUBLICATION: PublicationComparator = PublicationComparator::new(Family::Default);
pub const UNAMBIGUOUS_PUBLICATION: PublicationComparator =
    PublicationComparator::new(Family::Unambiguous);

impl PublicationComparator {
    pub const fn new(family: Family) -> Self {
        Self {
            family,
            identifier: IdentifierComparator::new(family),
        }
    }

    fn compare_details(&self, a: &Publication, b: &Publication) -> Ordering {
        compare_options(a.title(), b.title(), |x, y| self.family.compare_str(x, y))
            .then_with(|| compare_options(a.journal(), b.journal(), |x, y| self.family.compare_str(x, y)))
            .then_with(|| {
                compare_options(
                    a.publication_date().as_ref(),
                    b.publication_date().as_ref(),
                    Ord::cmp,
                )
            })
    }
}

impl Comparator<Publication> for PublicationComparator {
    fn compare(&self, a: &Publication, b: &Publication) -> Ordering {
        match self.family {
            // The first identifier both sides have decides.
            Family::Default => {
                if let (Some(x), Some(y)) = (a.pubmed_id(), b.pubmed_id()) {
                    return x.cmp(y);
                }
                if let (Some(x), Some(y)) = (a.doi(), b.doi()) {
                    return super::compare_ignore_case(x, y);
                }
                if !a.identifiers().is_empty() && !b.identifiers().is_empty() {
                    return compare_shared(a.identifiers(), b.identifiers(), &self.identifier);
                }
                self.compare_details(a, b)
            }
            Family::Unambiguous => compare_options(a.pubmed_id(), b.pubmed_id(), Ord::cmp)
                .then_with(|| compare_options(a.doi(), b.doi(), Ord::cmp))
                .then_with(|| {
                    compare_collections(a.identifiers(), b.identifiers(), &self.identifier)
                })
                .then_with(|| self.compare_details(a, b)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::ParameterValue;
    use psimi_common::vocabulary;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_default_cv_term_prefers_mi() {
        let a = CvTerm::with_mi("protein", "MI:0326").unwrap();
        let b = CvTerm::with_mi("polypeptide", "MI:0326").unwrap();
        let c = CvTerm::new("PROTEIN").unwrap();
        let d = CvTerm::new("protein").unwrap();

        assert!(DEFAULT_CV_TERM.are_equal(&a, &b));
        assert!(DEFAULT_CV_TERM.are_equal(&c, &d));
        assert!(!DEFAULT_CV_TERM.are_equal(&b, &c));
    }

    #[test]
    fn test_default_cv_term_without_mi_matches_by_name() {
        let with_mi = CvTerm::with_mi("uniprotkb", "MI:0486").unwrap();
        let plain = CvTerm::new("UniProtKB").unwrap();
        let other = CvTerm::new("refseq").unwrap();

        assert!(DEFAULT_CV_TERM.are_equal(&with_mi, &plain));
        assert!(DEFAULT_CV_TERM.are_equal(&plain, &with_mi));
        assert!(!DEFAULT_CV_TERM.are_equal(&with_mi, &other));
        assert!(!UNAMBIGUOUS_CV_TERM.are_equal(&with_mi, &plain));

        let typed = Xref::new(with_mi, "P12345").unwrap();
        let untyped = Xref::new(plain, "P12345").unwrap();
        assert!(DEFAULT_XREF.are_equal(&typed, &untyped));
    }

    #[test]
    fn test_unambiguous_cv_term_puts_mi_terms_first() {
        let with_mi = CvTerm::with_mi("protein", "MI:0326").unwrap();
        let without = CvTerm::new("protein").unwrap();
        assert_eq!(UNAMBIGUOUS_CV_TERM.compare(&with_mi, &without), Ordering::Less);
        assert_eq!(UNAMBIGUOUS_CV_TERM.compare(&without, &with_mi), Ordering::Greater);
    }

    #[test]
    fn test_cv_term_equality_and_hash() {
        let a = CvTerm::new("Gene Name").unwrap();
        let b = CvTerm::new("gene name").unwrap();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_xref_families() {
        let a = Xref::identity(vocabulary::UNIPROTKB, "p12345").unwrap();
        let b = Xref::identity(vocabulary::UNIPROTKB, "P12345").unwrap();
        let c = Xref::secondary(vocabulary::UNIPROTKB, "P12345").unwrap();

        assert!(DEFAULT_XREF.are_equal(&a, &b));
        assert!(!UNAMBIGUOUS_XREF.are_equal(&a, &b));
        assert!(!DEFAULT_XREF.are_equal(&b, &c));
        assert!(DEFAULT_IDENTIFIER.are_equal(&b, &c));
    }

    #[test]
    fn test_xref_without_qualifier_sorts_after() {
        let qualified = Xref::identity(vocabulary::UNIPROTKB, "P12345").unwrap();
        let plain = Xref::new(vocabulary::UNIPROTKB.into(), "P12345").unwrap();
        assert_eq!(DEFAULT_XREF.compare(&qualified, &plain), Ordering::Less);
    }

    #[test]
    fn test_organism_families() {
        let mut a = Organism::new(9606);
        let b = Organism::new(9606);
        a.set_tissue(Some(CvTerm::new("liver").unwrap()));

        assert!(DEFAULT_ORGANISM.are_equal(&a, &b));
        assert!(!UNAMBIGUOUS_ORGANISM.are_equal(&a, &b));
        assert_eq!(UNAMBIGUOUS_ORGANISM.compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_parameter_compares_values() {
        let kd = CvTerm::new("kd").unwrap();
        let a = Parameter::new(kd.clone(), ParameterValue::scientific(1.5, 10, -9));
        let b = Parameter::new(kd.clone(), ParameterValue::scientific(1.5, 10, -9));
        let c = Parameter::new(kd, ParameterValue::scientific(2.0, 10, -9));

        assert_eq!(a, b);
        assert_eq!(DEFAULT_PARAMETER.compare(&a, &c), Ordering::Less);
    }

    #[test]
    fn test_default_publication_pubmed_decides() {
        let mut a = Publication::with_pubmed("123");
        let mut b = Publication::with_pubmed("123");
        a.set_title(Some("one".into()));
        b.set_title(Some("two".into()));

        assert!(DEFAULT_PUBLICATION.are_equal(&a, &b));
        assert!(!UNAMBIGUOUS_PUBLICATION.are_equal(&a, &b));
    }
}
