//! Interactions and their modelled, cooperative and allosteric refinements.
//!
//! An [`Interaction`] exclusively owns its participants. Each participant
//! holds the owning interaction's [`InteractionHandle`] as a non-owning
//! back-reference, set on [`Interaction::add_participant`] and cleared on
//! removal.

use super::attributes::{Annotation, Checksum, Confidence};
use super::cv_term::CvTerm;
use super::experiment::Experiment;
use super::feature::ModelledFeature;
use super::handle::{InteractionHandle, ParticipantHandle};
use super::interaction_type::InteractionTypeRefs;
use super::observed::ObservedList;
use super::participant::{ModelledParticipant, ParticipantEvidence, ParticipantLike};
use super::xref::Xref;
use chrono::{DateTime, Utc};
use psimi_common::{checksum, vocabulary, Result};
use serde::Serialize;

fn is_imex_primary(xref: &Xref) -> bool {
    xref.is_from(vocabulary::IMEX) && xref.has_qualifier(vocabulary::IMEX_PRIMARY)
}

fn is_rigid(checksum: &Checksum) -> bool {
    checksum.is_method(vocabulary::RIGID)
}

#[derive(Debug, Clone)]
pub struct Interaction<P> {
    handle: InteractionHandle,
    short_name: Option<String>,
    identifiers: Vec<Xref>,
    xrefs: ObservedList<Xref>,
    checksums: ObservedList<Checksum>,
    annotations: Vec<Annotation>,
    confidences: Vec<Confidence>,
    participants: Vec<P>,
    negative: bool,
    created_date: Option<DateTime<Utc>>,
    updated_date: Option<DateTime<Utc>>,
    types: InteractionTypeRefs,
}

/// An experimentally observed interaction.
pub type InteractionEvidence = Interaction<ParticipantEvidence>;

impl<P: ParticipantLike> Interaction<P> {
    const IMEX: usize = 0;
    const RIGID: usize = 0;

    pub fn new() -> Self {
        Self {
            handle: InteractionHandle::new(),
            short_name: None,
            identifiers: Vec::new(),
            xrefs: ObservedList::with_views(&[is_imex_primary]),
            checksums: ObservedList::with_views(&[is_rigid]),
            annotations: Vec::new(),
            confidences: Vec::new(),
            participants: Vec::new(),
            negative: false,
            created_date: None,
            updated_date: None,
            types: InteractionTypeRefs::new(),
        }
    }

    pub fn with_short_name(short_name: impl Into<String>) -> Self {
        let mut interaction = Self::new();
        interaction.short_name = Some(short_name.into());
        interaction
    }

    pub fn handle(&self) -> InteractionHandle {
        self.handle
    }

    pub fn short_name(&self) -> Option<&str> {
        self.short_name.as_deref()
    }

    pub fn set_short_name(&mut self, short_name: Option<String>) {
        self.short_name = short_name;
    }

    pub fn identifiers(&self) -> &[Xref] {
        &self.identifiers
    }

    pub fn identifiers_mut(&mut self) -> &mut Vec<Xref> {
        &mut self.identifiers
    }

    pub fn xrefs(&self) -> &ObservedList<Xref> {
        &self.xrefs
    }

    pub fn xrefs_mut(&mut self) -> &mut ObservedList<Xref> {
        &mut self.xrefs
    }

    /// The IMEx accession: an imex xref qualified imex-primary.
    pub fn imex_id(&self) -> Option<&str> {
        self.xrefs.cached(Self::IMEX).map(Xref::id)
    }

    /// Replace any existing IMEx primary reference with `imex_id`.
    pub fn assign_imex_id(&mut self, imex_id: &str) -> Result<()> {
        let xref = Xref::with_qualifier(
            vocabulary::IMEX.into(),
            imex_id,
            vocabulary::IMEX_PRIMARY.into(),
        )?;
        self.xrefs.remove_candidates(Self::IMEX);
        self.xrefs.push(xref);
        Ok(())
    }

    pub fn checksums(&self) -> &ObservedList<Checksum> {
        &self.checksums
    }

    pub fn checksums_mut(&mut self) -> &mut ObservedList<Checksum> {
        &mut self.checksums
    }

    pub fn rigid(&self) -> Option<&str> {
        self.checksums.cached(Self::RIGID).map(Checksum::value)
    }

    pub fn set_rigid(&mut self, rigid: Option<&str>) -> Result<()> {
        match rigid {
            Some(value) => {
                let checksum = Checksum::new(vocabulary::RIGID.into(), value)?;
                self.checksums.replace_cached(Self::RIGID, checksum);
            }
            None => {
                self.checksums.remove_candidates(Self::RIGID);
            }
        }
        Ok(())
    }

    /// The RIGID implied by the participants' ROGIDs.
    ///
    /// `None` unless every participant is a protein carrying a ROGID.
    pub fn compute_rigid(&self) -> Result<Option<String>> {
        let rogids: Option<Vec<&str>> = self
            .participants
            .iter()
            .map(|p| {
                p.participant()
                    .interactor()
                    .as_protein()
                    .and_then(|protein| protein.rogid())
            })
            .collect();
        match rogids {
            Some(rogids) if !rogids.is_empty() => Ok(Some(checksum::rigid(rogids.as_slice())?)),
            _ => Ok(None),
        }
    }

    /// Recompute and store the RIGID; returns the stored value.
    pub fn recompute_rigid(&mut self) -> Result<Option<String>> {
        let rigid = self.compute_rigid()?;
        if let Some(value) = &rigid {
            if self.rigid() != Some(value.as_str()) {
                self.set_rigid(Some(value))?;
            }
        }
        Ok(rigid)
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn annotations_mut(&mut self) -> &mut Vec<Annotation> {
        &mut self.annotations
    }

    pub fn confidences(&self) -> &[Confidence] {
        &self.confidences
    }

    pub fn confidences_mut(&mut self) -> &mut Vec<Confidence> {
        &mut self.confidences
    }

    pub fn participants(&self) -> &[P] {
        &self.participants
    }

    pub fn participants_mut(&mut self) -> &mut [P] {
        &mut self.participants
    }

    pub fn participant(&self, handle: ParticipantHandle) -> Option<&P> {
        self.participants.iter().find(|p| p.handle() == handle)
    }

    /// Take ownership of `participant`, pointing it back at this interaction.
    pub fn add_participant(&mut self, mut participant: P) {
        participant
            .participant_mut()
            .set_interaction(Some(self.handle));
        self.participants.push(participant);
    }

    /// Release the participant at `index`, clearing its back-reference.
    pub fn remove_participant(&mut self, index: usize) -> Option<P> {
        if index >= self.participants.len() {
            return None;
        }
        let mut participant = self.participants.remove(index);
        participant.participant_mut().set_interaction(None);
        Some(participant)
    }

    pub fn remove_participant_by_handle(&mut self, handle: ParticipantHandle) -> Option<P> {
        let index = self.participants.iter().position(|p| p.handle() == handle)?;
        self.remove_participant(index)
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn set_negative(&mut self, negative: bool) {
        self.negative = negative;
    }

    pub fn created_date(&self) -> Option<DateTime<Utc>> {
        self.created_date
    }

    pub fn set_created_date(&mut self, date: Option<DateTime<Utc>>) {
        self.created_date = date;
    }

    pub fn updated_date(&self) -> Option<DateTime<Utc>> {
        self.updated_date
    }

    pub fn set_updated_date(&mut self, date: Option<DateTime<Utc>>) {
        self.updated_date = date;
    }

    pub fn interaction_type(&self) -> Option<&CvTerm> {
        self.types.term()
    }

    pub fn set_interaction_type(&mut self, interaction_type: Option<CvTerm>) -> Result<()> {
        self.types.set_type(interaction_type)
    }

    /// The cross-references the interaction type is folded from.
    pub fn types(&self) -> &InteractionTypeRefs {
        &self.types
    }

    pub fn types_mut(&mut self) -> &mut InteractionTypeRefs {
        &mut self.types
    }
}

impl<P: ParticipantLike> Default for Interaction<P> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Modelled interactions
// ============================================================================

/// Where a modelled interaction comes from.
#[derive(Debug, Clone, Serialize)]
pub struct Source {
    term: CvTerm,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

impl Source {
    pub fn new(term: CvTerm, url: Option<String>) -> Self {
        Self { term, url }
    }

    pub fn term(&self) -> &CvTerm {
        &self.term
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

/// A predicted or curated interaction, backed by experiments.
#[derive(Debug, Clone, Default)]
pub struct ModelledInteraction {
    interaction: Interaction<ModelledParticipant>,
    experiments: Vec<Experiment>,
    source: Option<Source>,
}

impl ModelledInteraction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interaction(&self) -> &Interaction<ModelledParticipant> {
        &self.interaction
    }

    pub fn interaction_mut(&mut self) -> &mut Interaction<ModelledParticipant> {
        &mut self.interaction
    }

    pub fn experiments(&self) -> &[Experiment] {
        &self.experiments
    }

    pub fn experiments_mut(&mut self) -> &mut Vec<Experiment> {
        &mut self.experiments
    }

    pub fn source(&self) -> Option<&Source> {
        self.source.as_ref()
    }

    pub fn set_source(&mut self, source: Option<Source>) {
        self.source = source;
    }
}

/// A modelled interaction whose binding changes the outcome of others.
#[derive(Debug, Clone)]
pub struct CooperativeInteraction {
    modelled: ModelledInteraction,
    mechanism: CvTerm,
    effect_outcome: CvTerm,
    response: CvTerm,
    affected_interactions: Vec<ModelledInteraction>,
}

impl CooperativeInteraction {
    pub fn new(mechanism: CvTerm, effect_outcome: CvTerm, response: CvTerm) -> Self {
        Self {
            modelled: ModelledInteraction::new(),
            mechanism,
            effect_outcome,
            response,
            affected_interactions: Vec::new(),
        }
    }

    pub fn modelled(&self) -> &ModelledInteraction {
        &self.modelled
    }

    pub fn modelled_mut(&mut self) -> &mut ModelledInteraction {
        &mut self.modelled
    }

    pub fn mechanism(&self) -> &CvTerm {
        &self.mechanism
    }

    pub fn set_mechanism(&mut self, mechanism: CvTerm) {
        self.mechanism = mechanism;
    }

    pub fn effect_outcome(&self) -> &CvTerm {
        &self.effect_outcome
    }

    pub fn set_effect_outcome(&mut self, outcome: CvTerm) {
        self.effect_outcome = outcome;
    }

    pub fn response(&self) -> &CvTerm {
        &self.response
    }

    pub fn set_response(&mut self, response: CvTerm) {
        self.response = response;
    }

    pub fn affected_interactions(&self) -> &[ModelledInteraction] {
        &self.affected_interactions
    }

    pub fn affected_interactions_mut(&mut self) -> &mut Vec<ModelledInteraction> {
        &mut self.affected_interactions
    }
}

/// What binds the allosteric site.
#[derive(Debug, Clone)]
pub enum AllostericEffector {
    /// A molecule binding the allosteric site.
    Molecule(ModelledParticipant),
    /// A post-translational modification acting as effector.
    FeatureModification(ModelledFeature),
}

#[derive(Debug, Clone)]
pub struct AllostericInteraction {
    cooperative: CooperativeInteraction,
    allosteric_molecule: ModelledParticipant,
    allosteric_effector: AllostericEffector,
    allosteric_mechanism: Option<CvTerm>,
    allostery_type: Option<CvTerm>,
}

impl AllostericInteraction {
    pub fn new(
        cooperative: CooperativeInteraction,
        allosteric_molecule: ModelledParticipant,
        allosteric_effector: AllostericEffector,
    ) -> Self {
        Self {
            cooperative,
            allosteric_molecule,
            allosteric_effector,
            allosteric_mechanism: None,
            allostery_type: None,
        }
    }

    pub fn cooperative(&self) -> &CooperativeInteraction {
        &self.cooperative
    }

    pub fn cooperative_mut(&mut self) -> &mut CooperativeInteraction {
        &mut self.cooperative
    }

    pub fn allosteric_molecule(&self) -> &ModelledParticipant {
        &self.allosteric_molecule
    }

    pub fn set_allosteric_molecule(&mut self, molecule: ModelledParticipant) {
        self.allosteric_molecule = molecule;
    }

    pub fn allosteric_effector(&self) -> &AllostericEffector {
        &self.allosteric_effector
    }

    pub fn set_allosteric_effector(&mut self, effector: AllostericEffector) {
        self.allosteric_effector = effector;
    }

    /// The modification acting as effector, when the effector is one.
    pub fn allosteric_ptm(&self) -> Option<&ModelledFeature> {
        match &self.allosteric_effector {
            AllostericEffector::FeatureModification(feature) => Some(feature),
            AllostericEffector::Molecule(_) => None,
        }
    }

    pub fn allosteric_mechanism(&self) -> Option<&CvTerm> {
        self.allosteric_mechanism.as_ref()
    }

    pub fn set_allosteric_mechanism(&mut self, mechanism: Option<CvTerm>) {
        self.allosteric_mechanism = mechanism;
    }

    pub fn allostery_type(&self) -> Option<&CvTerm> {
        self.allostery_type.as_ref()
    }

    pub fn set_allostery_type(&mut self, allostery_type: Option<CvTerm>) {
        self.allostery_type = allostery_type;
    }
}
