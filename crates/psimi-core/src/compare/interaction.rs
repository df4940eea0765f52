//! Interaction comparators

use super::interactor::{unordered_hash, InteractorComparator};
use super::participant::ParticipantComparator;
use super::terms::CvTermComparator;
use super::{compare_collections, compare_options, Comparator, Family};
use crate::model::{
    AllostericEffector, AllostericInteraction, CooperativeInteraction, Interaction,
    ModelledInteraction, ParticipantEvidence, ParticipantLike, Source,
};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Participants (as a collection), interaction type, then the negative flag.
///
/// Modelled interactions then compare their source; cooperative and
/// allosteric interactions compare their own fields first and fall back to
/// the modelled comparison.
#[derive(Debug, Clone, Copy)]
pub struct InteractionComparator {
    family: Family,
    participant: ParticipantComparator,
    cv_term: CvTermComparator,
}

pub const DEFAULT_INTERACTION: InteractionComparator = InteractionComparator::new(Family::Default);
pub const UNAMBIGUOUS_INTERACTION: InteractionComparator =
    InteractionComparator::new(Family::Unambiguous);

impl InteractionComparator {
    pub const fn new(family: Family) -> Self {
        Self::with_parts(
            family,
            ParticipantComparator::with_interactor(InteractorComparator::new(family, false)),
            CvTermComparator::new(family),
        )
    }

    pub const fn with_parts(
        family: Family,
        participant: ParticipantComparator,
        cv_term: CvTermComparator,
    ) -> Self {
        Self {
            family,
            participant,
            cv_term,
        }
    }

    /// The same comparator, also ordering on created then updated dates.
    pub const fn curated(self) -> CuratedInteractionComparator {
        CuratedInteractionComparator { base: self }
    }

    fn compare_sources(&self, a: Option<&Source>, b: Option<&Source>) -> Ordering {
        compare_options(a, b, |x, y| {
            self.cv_term.compare(x.term(), y.term()).then_with(|| {
                compare_options(x.url(), y.url(), |u, v| self.family.compare_str(u, v))
            })
        })
    }

    fn compare_effectors(&self, a: &AllostericEffector, b: &AllostericEffector) -> Ordering {
        match (a, b) {
            (AllostericEffector::Molecule(x), AllostericEffector::Molecule(y)) => {
                self.participant.compare(x, y)
            }
            (AllostericEffector::FeatureModification(x), AllostericEffector::FeatureModification(y)) => {
                super::feature::FeatureComparator::new(self.family).compare(x, y)
            }
            (AllostericEffector::Molecule(_), AllostericEffector::FeatureModification(_)) => {
                Ordering::Less
            }
            (AllostericEffector::FeatureModification(_), AllostericEffector::Molecule(_)) => {
                Ordering::Greater
            }
        }
    }
}

impl<P> Comparator<Interaction<P>> for InteractionComparator
where
    P: ParticipantLike,
    ParticipantComparator: Comparator<P>,
{
    fn compare(&self, a: &Interaction<P>, b: &Interaction<P>) -> Ordering {
        compare_collections(a.participants(), b.participants(), &self.participant)
            .then_with(|| {
                self.cv_term
                    .compare_opt(a.interaction_type(), b.interaction_type())
            })
            .then_with(|| a.is_negative().cmp(&b.is_negative()))
    }
}

impl Comparator<ModelledInteraction> for InteractionComparator {
    fn compare(&self, a: &ModelledInteraction, b: &ModelledInteraction) -> Ordering {
        self.compare(a.interaction(), b.interaction())
            .then_with(|| self.compare_sources(a.source(), b.source()))
    }
}

impl Comparator<CooperativeInteraction> for InteractionComparator {
    fn compare(&self, a: &CooperativeInteraction, b: &CooperativeInteraction) -> Ordering {
        self.cv_term
            .compare(a.mechanism(), b.mechanism())
            .then_with(|| self.cv_term.compare(a.effect_outcome(), b.effect_outcome()))
            .then_with(|| self.cv_term.compare(a.response(), b.response()))
            .then_with(|| {
                compare_collections(
                    a.affected_interactions(),
                    b.affected_interactions(),
                    self,
                )
            })
            .then_with(|| self.compare(a.modelled(), b.modelled()))
    }
}

impl Comparator<AllostericInteraction> for InteractionComparator {
    fn compare(&self, a: &AllostericInteraction, b: &AllostericInteraction) -> Ordering {
        self.cv_term
            .compare_opt(a.allosteric_mechanism(), b.allosteric_mechanism())
            .then_with(|| self.cv_term.compare_opt(a.allostery_type(), b.allostery_type()))
            .then_with(|| {
                self.participant
                    .compare(a.allosteric_molecule(), b.allosteric_molecule())
            })
            .then_with(|| self.compare_effectors(a.allosteric_effector(), b.allosteric_effector()))
            .then_with(|| self.compare(a.cooperative(), b.cooperative()))
    }
}

/// Interaction comparison followed by created and updated dates, absent last.
#[derive(Debug, Clone, Copy)]
pub struct CuratedInteractionComparator {
    base: InteractionComparator,
}

pub const DEFAULT_CURATED_INTERACTION: CuratedInteractionComparator = DEFAULT_INTERACTION.curated();
pub const UNAMBIGUOUS_CURATED_INTERACTION: CuratedInteractionComparator =
    UNAMBIGUOUS_INTERACTION.curated();

impl<P> Comparator<Interaction<P>> for CuratedInteractionComparator
where
    P: ParticipantLike,
    ParticipantComparator: Comparator<P>,
{
    fn compare(&self, a: &Interaction<P>, b: &Interaction<P>) -> Ordering {
        self.base
            .compare(a, b)
            .then_with(|| {
                compare_options(a.created_date().as_ref(), b.created_date().as_ref(), Ord::cmp)
            })
            .then_with(|| {
                compare_options(a.updated_date().as_ref(), b.updated_date().as_ref(), Ord::cmp)
            })
    }
}

// ============================================================================
// Equality and hashing
// ============================================================================

impl<P> PartialEq for Interaction<P>
where
    P: ParticipantLike,
    ParticipantComparator: Comparator<P>,
{
    fn eq(&self, other: &Self) -> bool {
        UNAMBIGUOUS_INTERACTION.are_equal(self, other)
    }
}

impl<P: ParticipantLike + Hash> Hash for Interaction<P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        unordered_hash(self.participants()).hash(state);
        self.interaction_type().hash(state);
        self.is_negative().hash(state);
    }
}

impl Hash for ParticipantEvidence {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.participant().hash(state);
        self.experimental_role().hash(state);
    }
}

impl PartialEq for ModelledInteraction {
    fn eq(&self, other: &Self) -> bool {
        UNAMBIGUOUS_INTERACTION.are_equal(self, other)
    }
}

impl PartialEq for CooperativeInteraction {
    fn eq(&self, other: &Self) -> bool {
        UNAMBIGUOUS_INTERACTION.are_equal(self, other)
    }
}

impl PartialEq for AllostericInteraction {
    fn eq(&self, other: &Self) -> bool {
        UNAMBIGUOUS_INTERACTION.are_equal(self, other)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{CvTerm, Feature, InteractionEvidence, ModelledParticipant, Participant, Protein};
    use chrono::{TimeZone, Utc};

    fn evidence(names: &[&str]) -> InteractionEvidence {
        let mut interaction = Interaction::new();
        for name in names {
            interaction.add_participant(ParticipantEvidence::new(Protein::new(*name).unwrap()));
        }
        interaction
    }

    fn term(name: &str) -> CvTerm {
        CvTerm::new(name).unwrap()
    }

    #[test]
    fn test_participant_order_is_irrelevant() {
        let a = evidence(&["p53", "mdm2"]);
        let b = evidence(&["mdm2", "p53"]);
        assert!(DEFAULT_INTERACTION.are_equal(&a, &b));
        assert_eq!(a, b);
    }

    #[test]
    fn test_positive_sorts_before_negative() {
        let a = evidence(&["p53"]);
        let mut b = evidence(&["p53"]);
        b.set_negative(true);
        assert_eq!(DEFAULT_INTERACTION.compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_type_compared_after_participants() {
        let mut a = evidence(&["p53"]);
        let b = evidence(&["p53"]);
        a.set_interaction_type(Some(CvTerm::with_mi("association", "MI:0914").unwrap()))
            .unwrap();
        assert_eq!(DEFAULT_INTERACTION.compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_curated_dates_absent_last() {
        let mut a = evidence(&["p53"]);
        let b = evidence(&["p53"]);
        a.set_created_date(Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()));

        assert!(DEFAULT_INTERACTION.are_equal(&a, &b));
        assert_eq!(DEFAULT_CURATED_INTERACTION.compare(&a, &b), Ordering::Less);
    }

    fn cooperative(mechanism: &str) -> CooperativeInteraction {
        CooperativeInteraction::new(term(mechanism), term("positive effect"), term("binding"))
    }

    #[test]
    fn test_cooperative_mechanism_first() {
        let a = cooperative("allostery");
        let b = cooperative("pre-assembly");
        assert_eq!(DEFAULT_INTERACTION.compare(&a, &b), Ordering::Less);
        assert_eq!(a, cooperative("allostery"));
    }

    #[test]
    fn test_allosteric_molecule_effector_before_ptm() {
        let molecule: ModelledParticipant = Participant::new(Protein::new("enzyme").unwrap());
        let by_molecule = AllostericInteraction::new(
            cooperative("allostery"),
            molecule.clone(),
            AllostericEffector::Molecule(Participant::new(Protein::new("effector").unwrap())),
        );
        let by_ptm = AllostericInteraction::new(
            cooperative("allostery"),
            molecule,
            AllostericEffector::FeatureModification(Feature::with_type(term("phosphorylation"))),
        );

        assert_eq!(DEFAULT_INTERACTION.compare(&by_molecule, &by_ptm), Ordering::Less);
        assert_eq!(DEFAULT_INTERACTION.compare(&by_ptm, &by_molecule), Ordering::Greater);
    }
}
