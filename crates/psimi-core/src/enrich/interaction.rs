//! Interaction enrichment
//!
//! Interaction-level collections merge like any other entity's. Participants
//! are matched by handle: a participant present on both sides is enriched in
//! place, one only the source has is added as a copy, and in remove mode one
//! only the target has is released (its back-reference cleared). The RIGID
//! is recomputed once participants settled.

use super::merge::{merge_annotations, merge_checksums, merge_confidences, merge_xrefs};
use super::{
    finish, Enricher, EnrichmentListener, FieldReport, Outcome, ParticipantEnricher, ParticipantsChangeListener,
};
use crate::compare::terms::DEFAULT_CV_TERM;
use crate::compare::Comparator;
use crate::config::{EnrichmentConfig, UpdateStrategy};
use crate::error::Result;
use crate::model::{Checksum, Interaction, ParticipantHandle, ParticipantLike};
use psimi_common::vocabulary;
use tracing::{debug, info, instrument};

/// What happened to the participants of one interaction.
#[derive(Debug, Clone)]
pub struct ParticipantChanges<P> {
    pub added: Vec<P>,
    pub removed: Vec<P>,
    /// Per matched participant, what its own enrichment changed.
    pub merged: Vec<(ParticipantHandle, Outcome)>,
}

impl<P> Default for ParticipantChanges<P> {
    fn default() -> Self {
        Self {
            added: Vec::new(),
            removed: Vec::new(),
            merged: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InteractionEnricher {
    config: EnrichmentConfig,
    participant: ParticipantEnricher,
}

impl InteractionEnricher {
    pub fn new(config: EnrichmentConfig) -> Self {
        Self {
            config,
            participant: ParticipantEnricher::new(config),
        }
    }

    pub fn with_participant_enricher(mut self, participant: ParticipantEnricher) -> Self {
        self.participant = participant;
        self
    }

    pub fn config(&self) -> &EnrichmentConfig {
        &self.config
    }

    /// Merge `source` into `target`, recording interaction-level changes in
    /// `outcome` and participant changes in `participants`.
    pub fn merge<P>(
        &self,
        target: &mut Interaction<P>,
        source: &Interaction<P>,
        outcome: &mut Outcome,
        participants: &mut ParticipantChanges<P>,
    ) -> Result<()>
    where
        P: ParticipantLike + Clone,
        ParticipantEnricher: Enricher<P>,
    {
        self.merge_type(target, source, outcome)?;

        if self.config.strategy != UpdateStrategy::Mismatch {
            let remove = self.config.remove_unmatched;
            outcome.identifiers = merge_xrefs(target.identifiers_mut(), source.identifiers(), remove);
            outcome.xrefs = merge_xrefs(target.xrefs_mut(), source.xrefs().as_slice(), remove);
            // The RIGID is derived from participants, never copied.
            let checksums: Vec<Checksum> = source
                .checksums()
                .iter()
                .filter(|c| !c.is_method(vocabulary::RIGID))
                .cloned()
                .collect();
            outcome.checksums = merge_checksums(target.checksums_mut(), &checksums, false);
            outcome.annotations = merge_annotations(target.annotations_mut(), source.annotations(), remove);
            outcome.confidences = merge_confidences(target.confidences_mut(), source.confidences(), remove);
        }

        self.merge_participants(target, source, participants)?;

        if self.config.recompute_rigid && self.config.strategy != UpdateStrategy::Mismatch {
            self.refresh_rigid(target, outcome)?;
        }
        Ok(())
    }

    /// [`InteractionEnricher::merge`], then replay participant and
    /// interaction changes to `listener`.
    #[instrument(skip_all, fields(interaction = %target.handle(), strategy = %self.config.strategy))]
    pub fn enrich_with<P, L>(
        &self,
        target: &mut Interaction<P>,
        source: &Interaction<P>,
        listener: &mut L,
    ) -> Result<()>
    where
        P: ParticipantLike + Clone,
        ParticipantEnricher: Enricher<P>,
        L: EnrichmentListener<Interaction<P>>
            + EnrichmentListener<P>
            + ParticipantsChangeListener<Interaction<P>, P>
            + ?Sized,
    {
        let mut outcome = Outcome::default();
        let mut participants = ParticipantChanges::default();
        let result = self.merge(target, source, &mut outcome, &mut participants);

        for (handle, merged) in &participants.merged {
            if let Some(participant) = target.participant(*handle) {
                merged.notify(participant, listener);
            }
        }
        for removed in &participants.removed {
            listener.on_removed_participant(&*target, removed);
        }
        for added in &participants.added {
            listener.on_added_participant(&*target, added);
        }
        outcome.notify(&*target, listener);

        if result.is_ok() {
            info!(
                added = participants.added.len(),
                removed = participants.removed.len(),
                "Interaction enriched"
            );
        }
        finish(&*target, listener, result)
    }

    fn merge_type<P: ParticipantLike>(
        &self,
        target: &mut Interaction<P>,
        source: &Interaction<P>,
        outcome: &mut Outcome,
    ) -> Result<()> {
        let Some(fetched) = source.interaction_type() else {
            return Ok(());
        };

        match target.interaction_type() {
            None if self.config.strategy == UpdateStrategy::Mismatch => {
                outcome.report(FieldReport::mismatch("Interaction type", None, Some(fetched.short_name())));
            }
            None => {
                target.set_interaction_type(Some(fetched.clone()))?;
                outcome.report(FieldReport::addition("Interaction type", fetched.short_name()));
            }
            Some(current) if !DEFAULT_CV_TERM.are_equal(current, fetched) => {
                let current = current.short_name().to_string();
                match self.config.strategy {
                    UpdateStrategy::Overwrite => {
                        target.set_interaction_type(Some(fetched.clone()))?;
                        outcome.report(FieldReport::overwrite(
                            "Interaction type",
                            Some(&current),
                            Some(fetched.short_name()),
                        ));
                    }
                    UpdateStrategy::Mismatch => {
                        outcome.report(FieldReport::mismatch(
                            "Interaction type",
                            Some(&current),
                            Some(fetched.short_name()),
                        ));
                    }
                    UpdateStrategy::Addition => {}
                }
            }
            Some(_) => {}
        }
        Ok(())
    }

    fn merge_participants<P>(
        &self,
        target: &mut Interaction<P>,
        source: &Interaction<P>,
        changes: &mut ParticipantChanges<P>,
    ) -> Result<()>
    where
        P: ParticipantLike + Clone,
        ParticipantEnricher: Enricher<P>,
    {
        let mutate = self.config.strategy != UpdateStrategy::Mismatch;

        if mutate && self.config.remove_unmatched {
            let unmatched: Vec<ParticipantHandle> = target
                .participants()
                .iter()
                .map(ParticipantLike::handle)
                .filter(|handle| source.participant(*handle).is_none())
                .collect();
            for handle in unmatched {
                if let Some(removed) = target.remove_participant_by_handle(handle) {
                    debug!(participant = %handle, "Removing participant missing from source");
                    changes.removed.push(removed);
                }
            }
        }

        for participant in target.participants_mut() {
            let handle = participant.handle();
            let Some(fetched) = source.participant(handle) else {
                continue;
            };
            let mut merged = Outcome::default();
            let result =
                <ParticipantEnricher as Enricher<P>>::merge(&self.participant, participant, fetched, &mut merged);
            changes.merged.push((handle, merged));
            result?;
        }

        if mutate {
            for fetched in source.participants() {
                if target.participant(fetched.handle()).is_some() {
                    continue;
                }
                target.add_participant(fetched.clone());
                if let Some(added) = target.participant(fetched.handle()) {
                    changes.added.push(added.clone());
                }
            }
        }
        Ok(())
    }

    fn refresh_rigid<P: ParticipantLike>(&self, target: &mut Interaction<P>, outcome: &mut Outcome) -> Result<()> {
        let before = target.rigid().map(str::to_string);
        let Some(after) = target.recompute_rigid()? else {
            return Ok(());
        };

        match before {
            None => {
                outcome.report(FieldReport::addition("RIGID", after.as_str()));
            }
            Some(before) if before != after => {
                outcome
                    .checksums
                    .removed
                    .push(Checksum::new(vocabulary::RIGID.into(), before.as_str())?);
                outcome.report(FieldReport::overwrite("RIGID", Some(&before), Some(&after)));
            }
            Some(_) => return Ok(()),
        }
        outcome
            .checksums
            .added
            .push(Checksum::new(vocabulary::RIGID.into(), after.as_str())?);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::enrich::{CollectionKind, RecordingListener};
    use crate::model::{CvTerm, InteractionEvidence, ParticipantEvidence, Protein, Xref};
    use psimi_common::checksum;

    fn protein(name: &str, rogid: &str) -> Protein {
        let mut protein = Protein::new(name).unwrap();
        protein.set_rogid(Some(rogid)).unwrap();
        protein
    }

    fn imex(id: &str) -> Xref {
        Xref::with_qualifier(vocabulary::IMEX.into(), id, vocabulary::IMEX_PRIMARY.into()).unwrap()
    }

    fn evidence(name: &str, rogid: &str) -> ParticipantEvidence {
        ParticipantEvidence::new(protein(name, rogid))
    }

    #[test]
    fn test_adopts_type_and_merges_xrefs() {
        let mut target: InteractionEvidence = Interaction::with_short_name("p53-mdm2");
        let mut source = target.clone();
        source
            .set_interaction_type(Some(CvTerm::with_mi("physical association", "MI:0915").unwrap()))
            .unwrap();
        source
            .xrefs_mut()
            .push(imex("IM-1234-1"));
        let mut listener = RecordingListener::new();

        InteractionEnricher::default()
            .enrich_with(&mut target, &source, &mut listener)
            .unwrap();

        assert_eq!(
            target.interaction_type().map(CvTerm::short_name),
            Some("physical association")
        );
        assert_eq!(target.imex_id(), Some("IM-1234-1"));
        assert_eq!(listener.added(CollectionKind::Xrefs).len(), 1);
    }

    #[test]
    fn test_adds_participants_and_recomputes_rigid() {
        let mut target: InteractionEvidence = Interaction::new();
        target.add_participant(evidence("p53", "rogidA9606"));
        let mut source = target.clone();
        source.participants_mut()[0].participant_mut().set_stoichiometry(Some(1));
        source.add_participant(evidence("mdm2", "rogidB9606"));
        let mut listener = RecordingListener::new();

        InteractionEnricher::default()
            .enrich_with(&mut target, &source, &mut listener)
            .unwrap();

        assert_eq!(target.participants().len(), 2);
        assert_eq!(target.participants()[0].participant().stoichiometry(), Some(1));
        assert_eq!(
            target.participants()[1].participant().interaction(),
            Some(target.handle())
        );
        assert_eq!(
            target.rigid().map(str::to_string),
            Some(checksum::rigid(&["rogidA9606", "rogidB9606"]).unwrap())
        );
        assert_eq!(listener.added(CollectionKind::Participants), vec!["participant mdm2"]);
        let fields: Vec<&str> = listener.reports().map(FieldReport::field).collect();
        assert!(fields.contains(&"Stoichiometry"));
        assert!(fields.contains(&"RIGID"));
    }

    #[test]
    fn test_remove_mode_releases_unmatched_participants() {
        let mut target: InteractionEvidence = Interaction::new();
        target.add_participant(evidence("p53", "rogidA9606"));
        let source = target.clone();
        target.add_participant(evidence("mdm2", "rogidB9606"));
        let enricher = InteractionEnricher::new(EnrichmentConfig::default().with_remove_unmatched(true));
        let mut outcome = Outcome::default();
        let mut changes = ParticipantChanges::default();

        enricher.merge(&mut target, &source, &mut outcome, &mut changes).unwrap();

        assert_eq!(target.participants().len(), 1);
        assert_eq!(changes.removed.len(), 1);
        assert_eq!(changes.removed[0].participant().interaction(), None);
    }

    #[test]
    fn test_rigid_left_alone_when_disabled() {
        let mut target: InteractionEvidence = Interaction::new();
        let mut source = target.clone();
        source.add_participant(evidence("p53", "rogidA9606"));
        let enricher = InteractionEnricher::new(EnrichmentConfig::default().with_recompute_rigid(false));

        enricher
            .merge(&mut target, &source, &mut Outcome::default(), &mut ParticipantChanges::default())
            .unwrap();

        assert_eq!(target.participants().len(), 1);
        assert!(target.rigid().is_none());
    }
}
