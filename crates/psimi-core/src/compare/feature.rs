//! Feature comparators

use super::interactor::unordered_hash;
use super::range::RangeComparator;
use super::terms::{CvTermComparator, IdentifierComparator};
use super::{compare_collections, compare_shared, Comparator, Family};
use crate::model::{Feature, FeatureEvidence};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Type, interaction effect, interaction dependency, identifiers, then ranges.
///
/// Identifiers: two InterPro accessions compare as strings. Otherwise, when
/// both sides have identifiers, they are equal as soon as one is shared.
/// Ranges compare as collections. Feature evidence adds detection methods.
#[derive(Debug, Clone, Copy)]
pub struct FeatureComparator {
    cv_term: CvTermComparator,
    identifier: IdentifierComparator,
    range: RangeComparator,
}

pub const DEFAULT_FEATURE: FeatureComparator = FeatureComparator::new(Family::Default);
pub const UNAMBIGUOUS_FEATURE: FeatureComparator = FeatureComparator::new(Family::Unambiguous);

impl FeatureComparator {
    pub const fn new(family: Family) -> Self {
        Self::with_parts(
            CvTermComparator::new(family),
            IdentifierComparator::new(family),
            RangeComparator::new(family),
        )
    }

    pub const fn with_parts(
        cv_term: CvTermComparator,
        identifier: IdentifierComparator,
        range: RangeComparator,
    ) -> Self {
        Self {
            cv_term,
            identifier,
            range,
        }
    }

    fn compare_identifiers(&self, a: &Feature, b: &Feature) -> Ordering {
        if let (Some(x), Some(y)) = (a.interpro(), b.interpro()) {
            return x.cmp(y);
        }
        if !a.identifiers().is_empty() && !b.identifiers().is_empty() {
            return compare_shared(a.identifiers(), b.identifiers(), &self.identifier);
        }
        Ordering::Equal
    }
}

impl Comparator<Feature> for FeatureComparator {
    fn compare(&self, a: &Feature, b: &Feature) -> Ordering {
        self.cv_term
            .compare_opt(a.feature_type(), b.feature_type())
            .then_with(|| {
                self.cv_term
                    .compare_opt(a.interaction_effect(), b.interaction_effect())
            })
            .then_with(|| {
                self.cv_term
                    .compare_opt(a.interaction_dependency(), b.interaction_dependency())
            })
            .then_with(|| self.compare_identifiers(a, b))
            .then_with(|| compare_collections(a.ranges(), b.ranges(), &self.range))
    }
}

impl Comparator<FeatureEvidence> for FeatureComparator {
    fn compare(&self, a: &FeatureEvidence, b: &FeatureEvidence) -> Ordering {
        use crate::model::FeatureLike;

        self.compare(a.feature(), b.feature()).then_with(|| {
            compare_collections(a.detection_methods(), b.detection_methods(), &self.cv_term)
        })
    }
}

impl PartialEq for Feature {
    fn eq(&self, other: &Self) -> bool {
        UNAMBIGUOUS_FEATURE.are_equal(self, other)
    }
}

impl Hash for Feature {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.feature_type().hash(state);
        self.interaction_effect().hash(state);
        self.interaction_dependency().hash(state);
        unordered_hash(self.ranges()).hash(state);
    }
}

impl PartialEq for FeatureEvidence {
    fn eq(&self, other: &Self) -> bool {
        UNAMBIGUOUS_FEATURE.are_equal(self, other)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{CvTerm, FeatureLike, Range, Xref};
    use psimi_common::vocabulary;

    fn binding_site() -> CvTerm {
        CvTerm::with_mi("binding-associated region", "MI:0117").unwrap()
    }

    fn feature(ranges: &[(i64, i64)]) -> Feature {
        let mut feature = Feature::with_type(binding_site());
        for &(start, end) in ranges {
            feature.add_range(Range::certain(start, end).unwrap());
        }
        feature
    }

    #[test]
    fn test_same_type_and_range_are_equal() {
        let a = feature(&[(1, 10)]);
        let b = feature(&[(1, 10)]);
        assert_eq!(DEFAULT_FEATURE.compare(&a, &b), Ordering::Equal);
    }

    #[test]
    fn test_range_order_is_irrelevant_but_length_counts() {
        let a = feature(&[(20, 30), (1, 10)]);
        let b = feature(&[(1, 10), (20, 30)]);
        let c = feature(&[(1, 10)]);

        assert!(DEFAULT_FEATURE.are_equal(&a, &b));
        assert_eq!(DEFAULT_FEATURE.compare(&c, &a), Ordering::Less);
    }

    #[test]
    fn test_untyped_feature_sorts_after() {
        let typed = feature(&[]);
        let untyped = Feature::new();
        assert_eq!(DEFAULT_FEATURE.compare(&typed, &untyped), Ordering::Less);
        assert_eq!(DEFAULT_FEATURE.compare(&untyped, &typed), Ordering::Greater);
    }

    #[test]
    fn test_interpro_decides_when_both_set() {
        let mut a = feature(&[]);
        let mut b = feature(&[]);
        a.set_interpro(Some("IPR000001")).unwrap();
        b.set_interpro(Some("IPR000002")).unwrap();
        assert_eq!(DEFAULT_FEATURE.compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_one_shared_identifier_is_enough() {
        let mut a = feature(&[]);
        let mut b = feature(&[]);
        a.identifiers_mut()
            .push(Xref::new(vocabulary::INTERPRO.into(), "IPR000001").unwrap());
        a.identifiers_mut()
            .push(Xref::new(CvTerm::new("pfam").unwrap(), "PF00001").unwrap());
        b.identifiers_mut()
            .push(Xref::new(CvTerm::new("pfam").unwrap(), "PF00001").unwrap());

        assert!(DEFAULT_FEATURE.are_equal(&a, &b));
    }

    #[test]
    fn test_evidence_compares_detection_methods() {
        let mut a = FeatureEvidence::new(feature(&[(1, 10)]));
        let b = FeatureEvidence::new(feature(&[(1, 10)]));
        assert!(DEFAULT_FEATURE.are_equal(&a, &b));

        a.detection_methods_mut()
            .push(CvTerm::with_mi("western blot", "MI:0113").unwrap());
        assert!(!DEFAULT_FEATURE.are_equal(&a, &b));
        assert_eq!(a.feature().ranges().len(), 1);
    }
}
