//! Entity model
//!
//! Value types (terms, cross-references, checksums...) and the entity kinds
//! built from them. Derived single-valued fields are cached views over
//! [`observed::ObservedList`]s.

pub mod attributes;
pub mod complex;
pub mod cv_term;
pub mod experiment;
pub mod feature;
pub mod handle;
pub mod interaction;
pub mod interaction_type;
pub mod interactor;
pub mod observed;
pub mod organism;
pub mod participant;
pub mod range;
pub mod xref;

pub use attributes::{Alias, Annotation, Checksum, Confidence, Parameter, ParameterValue};
pub use complex::Complex;
pub use cv_term::CvTerm;
pub use experiment::{Experiment, Publication};
pub use feature::{Feature, FeatureEvidence, FeatureLike, ModelledFeature};
pub use handle::{FeatureHandle, InteractionHandle, ParticipantHandle};
pub use interaction::{
    AllostericEffector, AllostericInteraction, CooperativeInteraction, Interaction,
    InteractionEvidence, ModelledInteraction, Source,
};
pub use interaction_type::{InteractionTypeRefs, TypeReference};
pub use interactor::{
    BioactiveEntity, Gene, Interactor, InteractorCore, InteractorKind, InteractorSet,
    NucleicAcid, Protein,
};
pub use observed::{ObservedList, Rank, Ranked};
pub use organism::Organism;
pub use participant::{ModelledParticipant, Participant, ParticipantEvidence, ParticipantLike};
pub use range::{Position, Range};
pub use xref::Xref;
