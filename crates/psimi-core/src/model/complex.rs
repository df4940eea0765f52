//! Complexes: interactors made of modelled participants.

use super::cv_term::CvTerm;
use super::handle::InteractionHandle;
use super::interactor::InteractorCore;
use super::participant::ModelledParticipant;
use psimi_common::{vocabulary, Result};

#[derive(Debug, Clone)]
pub struct Complex {
    core: InteractorCore,
    handle: InteractionHandle,
    participants: Vec<ModelledParticipant>,
    interaction_type: Option<CvTerm>,
}

impl Complex {
    pub fn new(short_name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            core: InteractorCore::new(short_name, vocabulary::COMPLEX.into())?,
            handle: InteractionHandle::new(),
            participants: Vec::new(),
            interaction_type: None,
        })
    }

    pub fn core(&self) -> &InteractorCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut InteractorCore {
        &mut self.core
    }

    /// Handle the complex's components point back at.
    pub fn handle(&self) -> InteractionHandle {
        self.handle
    }

    pub fn interaction_type(&self) -> Option<&CvTerm> {
        self.interaction_type.as_ref()
    }

    pub fn set_interaction_type(&mut self, interaction_type: Option<CvTerm>) {
        self.interaction_type = interaction_type;
    }

    pub fn participants(&self) -> &[ModelledParticipant] {
        &self.participants
    }

    pub fn add_participant(&mut self, mut participant: ModelledParticipant) {
        participant.set_interaction(Some(self.handle));
        self.participants.push(participant);
    }

    pub fn remove_participant(&mut self, index: usize) -> Option<ModelledParticipant> {
        if index >= self.participants.len() {
            return None;
        }
        let mut participant = self.participants.remove(index);
        participant.set_interaction(None);
        Some(participant)
    }
}
