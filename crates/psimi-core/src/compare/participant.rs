//! Participant comparators

use super::feature::FeatureComparator;
use super::interactor::InteractorComparator;
use super::terms::{CvTermComparator, OrganismComparator};
use super::{compare_collections, compare_options, Comparator, Family};
use crate::model::{FeatureLike, Participant, ParticipantEvidence, ParticipantLike};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Interactor, biological role, stoichiometry (absent last), then features.
///
/// Evidence participants then compare experimental role, identification
/// methods and the organism the interactor was expressed in.
#[derive(Debug, Clone, Copy)]
pub struct ParticipantComparator {
    interactor: InteractorComparator,
    cv_term: CvTermComparator,
    organism: OrganismComparator,
    feature: FeatureComparator,
}

pub const DEFAULT_PARTICIPANT: ParticipantComparator =
    ParticipantComparator::with_interactor(InteractorComparator::new(Family::Default, false));
pub const DEFAULT_EXACT_PARTICIPANT: ParticipantComparator =
    ParticipantComparator::with_interactor(InteractorComparator::new(Family::Default, true));
pub const UNAMBIGUOUS_PARTICIPANT: ParticipantComparator =
    ParticipantComparator::with_interactor(InteractorComparator::new(Family::Unambiguous, false));
pub const UNAMBIGUOUS_EXACT_PARTICIPANT: ParticipantComparator =
    ParticipantComparator::with_interactor(InteractorComparator::new(Family::Unambiguous, true));

impl ParticipantComparator {
    /// Parts of the same family as `interactor`.
    pub const fn with_interactor(interactor: InteractorComparator) -> Self {
        let family = interactor.family();
        Self::with_parts(
            interactor,
            CvTermComparator::new(family),
            OrganismComparator::new(family),
            FeatureComparator::new(family),
        )
    }

    pub const fn with_parts(
        interactor: InteractorComparator,
        cv_term: CvTermComparator,
        organism: OrganismComparator,
        feature: FeatureComparator,
    ) -> Self {
        Self {
            interactor,
            cv_term,
            organism,
            feature,
        }
    }

    pub fn interactor(&self) -> &InteractorComparator {
        &self.interactor
    }
}

impl<F> Comparator<Participant<F>> for ParticipantComparator
where
    F: FeatureLike,
    FeatureComparator: Comparator<F>,
{
    fn compare(&self, a: &Participant<F>, b: &Participant<F>) -> Ordering {
        self.interactor
            .compare(a.interactor(), b.interactor())
            .then_with(|| self.cv_term.compare(a.biological_role(), b.biological_role()))
            .then_with(|| {
                compare_options(
                    a.stoichiometry().as_ref(),
                    b.stoichiometry().as_ref(),
                    Ord::cmp,
                )
            })
            .then_with(|| compare_collections(a.features(), b.features(), &self.feature))
    }
}

impl Comparator<ParticipantEvidence> for ParticipantComparator {
    fn compare(&self, a: &ParticipantEvidence, b: &ParticipantEvidence) -> Ordering {
        self.compare(a.participant(), b.participant())
            .then_with(|| {
                self.cv_term
                    .compare(a.experimental_role(), b.experimental_role())
            })
            .then_with(|| {
                compare_collections(
                    a.identification_methods(),
                    b.identification_methods(),
                    &self.cv_term,
                )
            })
            .then_with(|| self.organism.compare_opt(a.expressed_in(), b.expressed_in()))
    }
}

impl<F> PartialEq for Participant<F>
where
    F: FeatureLike,
    FeatureComparator: Comparator<F>,
{
    fn eq(&self, other: &Self) -> bool {
        UNAMBIGUOUS_EXACT_PARTICIPANT.are_equal(self, other)
    }
}

impl<F: FeatureLike> Hash for Participant<F> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.interactor().hash(state);
        self.biological_role().hash(state);
        self.stoichiometry().hash(state);
    }
}

impl PartialEq for ParticipantEvidence {
    fn eq(&self, other: &Self) -> bool {
        UNAMBIGUOUS_EXACT_PARTICIPANT.are_equal(self, other)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{CvTerm, Feature, ModelledParticipant, Protein, Range};

    fn participant(name: &str) -> ModelledParticipant {
        Participant::new(Protein::new(name).unwrap())
    }

    #[test]
    fn test_stoichiometry_absent_sorts_last() {
        let mut a = participant("p53");
        let b = participant("p53");
        a.set_stoichiometry(Some(2));

        assert_eq!(DEFAULT_PARTICIPANT.compare(&a, &b), Ordering::Less);
        assert_eq!(DEFAULT_PARTICIPANT.compare(&b, &a), Ordering::Greater);

        let mut c = participant("p53");
        c.set_stoichiometry(Some(1));
        assert_eq!(DEFAULT_PARTICIPANT.compare(&c, &a), Ordering::Less);
    }

    #[test]
    fn test_biological_role_after_interactor() {
        let mut a = participant("p53");
        let b = participant("p53");
        a.set_biological_role(Some(CvTerm::with_mi("enzyme", "MI:0501").unwrap()));

        assert_ne!(DEFAULT_PARTICIPANT.compare(&a, &b), Ordering::Equal);
        assert_eq!(
            DEFAULT_PARTICIPANT.compare(&participant("a"), &a),
            Ordering::Less
        );
    }

    #[test]
    fn test_features_compared_as_collection() {
        let mut a = participant("p53");
        let mut b = participant("p53");
        let mut feature = Feature::new();
        feature.add_range(Range::certain(1, 10).unwrap());
        a.add_feature(feature.clone());
        assert!(!DEFAULT_PARTICIPANT.are_equal(&a, &b));

        b.add_feature(feature);
        assert!(DEFAULT_PARTICIPANT.are_equal(&a, &b));
        assert_eq!(a, b);
    }

    #[test]
    fn test_evidence_compares_experimental_role() {
        let mut a = ParticipantEvidence::new(Protein::new("p53").unwrap());
        let b = ParticipantEvidence::new(Protein::new("p53").unwrap());
        assert!(DEFAULT_PARTICIPANT.are_equal(&a, &b));

        a.set_experimental_role(Some(CvTerm::with_mi("bait", "MI:0496").unwrap()));
        assert!(!DEFAULT_PARTICIPANT.are_equal(&a, &b));
    }
}
