//! Participants: an interactor in the context of one interaction.

use super::attributes::{Alias, Annotation, Confidence, Parameter};
use super::cv_term::CvTerm;
use super::feature::{Feature, FeatureEvidence, FeatureLike};
use super::handle::{InteractionHandle, ParticipantHandle};
use super::interactor::Interactor;
use super::organism::Organism;
use super::xref::Xref;
use psimi_common::vocabulary;

#[derive(Debug, Clone)]
pub struct Participant<F> {
    handle: ParticipantHandle,
    interactor: Interactor,
    biological_role: CvTerm,
    stoichiometry: Option<u32>,
    features: Vec<F>,
    xrefs: Vec<Xref>,
    annotations: Vec<Annotation>,
    aliases: Vec<Alias>,
    interaction: Option<InteractionHandle>,
}

/// A participant of a predicted or curated model.
pub type ModelledParticipant = Participant<Feature>;

impl<F: FeatureLike> Participant<F> {
    /// A participant with the "unspecified role" biological role.
    pub fn new(interactor: impl Into<Interactor>) -> Self {
        Self::with_role(interactor, vocabulary::UNSPECIFIED_ROLE.into())
    }

    pub fn with_role(interactor: impl Into<Interactor>, biological_role: CvTerm) -> Self {
        Self {
            handle: ParticipantHandle::new(),
            interactor: interactor.into(),
            biological_role,
            stoichiometry: None,
            features: Vec::new(),
            xrefs: Vec::new(),
            annotations: Vec::new(),
            aliases: Vec::new(),
            interaction: None,
        }
    }

    pub fn handle(&self) -> ParticipantHandle {
        self.handle
    }

    pub fn interactor(&self) -> &Interactor {
        &self.interactor
    }

    pub fn interactor_mut(&mut self) -> &mut Interactor {
        &mut self.interactor
    }

    pub fn set_interactor(&mut self, interactor: impl Into<Interactor>) {
        self.interactor = interactor.into();
    }

    pub fn biological_role(&self) -> &CvTerm {
        &self.biological_role
    }

    /// `None` restores the unspecified role.
    pub fn set_biological_role(&mut self, role: Option<CvTerm>) {
        self.biological_role = role.unwrap_or_else(|| vocabulary::UNSPECIFIED_ROLE.into());
    }

    pub fn stoichiometry(&self) -> Option<u32> {
        self.stoichiometry
    }

    pub fn set_stoichiometry(&mut self, stoichiometry: Option<u32>) {
        self.stoichiometry = stoichiometry;
    }

    pub fn features(&self) -> &[F] {
        &self.features
    }

    pub fn features_mut(&mut self) -> &mut [F] {
        &mut self.features
    }

    /// Attach a feature; it now points back at this participant.
    pub fn add_feature(&mut self, mut feature: F) {
        feature.feature_mut().set_participant(Some(self.handle));
        self.features.push(feature);
    }

    /// Detach the feature at `index`, clearing its back-reference.
    pub fn remove_feature(&mut self, index: usize) -> Option<F> {
        if index >= self.features.len() {
            return None;
        }
        let mut feature = self.features.remove(index);
        feature.feature_mut().set_participant(None);
        Some(feature)
    }

    pub fn xrefs(&self) -> &[Xref] {
        &self.xrefs
    }

    pub fn xrefs_mut(&mut self) -> &mut Vec<Xref> {
        &mut self.xrefs
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn annotations_mut(&mut self) -> &mut Vec<Annotation> {
        &mut self.annotations
    }

    pub fn aliases(&self) -> &[Alias] {
        &self.aliases
    }

    pub fn aliases_mut(&mut self) -> &mut Vec<Alias> {
        &mut self.aliases
    }

    /// The interaction owning this participant, if attached.
    pub fn interaction(&self) -> Option<InteractionHandle> {
        self.interaction
    }

    pub(crate) fn set_interaction(&mut self, interaction: Option<InteractionHandle>) {
        self.interaction = interaction;
    }
}

/// An experimentally observed participant.
#[derive(Debug, Clone)]
pub struct ParticipantEvidence {
    participant: Participant<FeatureEvidence>,
    experimental_role: CvTerm,
    identification_methods: Vec<CvTerm>,
    expressed_in: Option<Organism>,
    experimental_preparations: Vec<CvTerm>,
    confidences: Vec<Confidence>,
    parameters: Vec<Parameter>,
}

impl ParticipantEvidence {
    pub fn new(interactor: impl Into<Interactor>) -> Self {
        Self {
            participant: Participant::new(interactor),
            experimental_role: vocabulary::UNSPECIFIED_ROLE.into(),
            identification_methods: Vec::new(),
            expressed_in: None,
            experimental_preparations: Vec::new(),
            confidences: Vec::new(),
            parameters: Vec::new(),
        }
    }

    pub fn experimental_role(&self) -> &CvTerm {
        &self.experimental_role
    }

    /// `None` restores the unspecified role.
    pub fn set_experimental_role(&mut self, role: Option<CvTerm>) {
        self.experimental_role = role.unwrap_or_else(|| vocabulary::UNSPECIFIED_ROLE.into());
    }

    pub fn identification_methods(&self) -> &[CvTerm] {
        &self.identification_methods
    }

    pub fn identification_methods_mut(&mut self) -> &mut Vec<CvTerm> {
        &mut self.identification_methods
    }

    pub fn expressed_in(&self) -> Option<&Organism> {
        self.expressed_in.as_ref()
    }

    pub fn set_expressed_in(&mut self, organism: Option<Organism>) {
        self.expressed_in = organism;
    }

    pub fn experimental_preparations(&self) -> &[CvTerm] {
        &self.experimental_preparations
    }

    pub fn experimental_preparations_mut(&mut self) -> &mut Vec<CvTerm> {
        &mut self.experimental_preparations
    }

    pub fn confidences(&self) -> &[Confidence] {
        &self.confidences
    }

    pub fn confidences_mut(&mut self) -> &mut Vec<Confidence> {
        &mut self.confidences
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn parameters_mut(&mut self) -> &mut Vec<Parameter> {
        &mut self.parameters
    }
}

/// Access to the shared participant fields of any participant kind.
pub trait ParticipantLike {
    type Feature: FeatureLike;

    fn participant(&self) -> &Participant<Self::Feature>;
    fn participant_mut(&mut self) -> &mut Participant<Self::Feature>;

    fn handle(&self) -> ParticipantHandle {
        self.participant().handle()
    }
}

impl<F: FeatureLike> ParticipantLike for Participant<F> {
    type Feature = F;

    fn participant(&self) -> &Participant<F> {
        self
    }

    fn participant_mut(&mut self) -> &mut Participant<F> {
        self
    }
}

impl ParticipantLike for ParticipantEvidence {
    type Feature = FeatureEvidence;

    fn participant(&self) -> &Participant<FeatureEvidence> {
        &self.participant
    }

    fn participant_mut(&mut self) -> &mut Participant<FeatureEvidence> {
        &mut self.participant
    }
}
