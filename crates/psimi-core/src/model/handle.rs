//! Non-owning handles linking children back to their owner

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

handle!(
    /// Identifies an interaction; participants point back at it.
    InteractionHandle
);
handle!(
    /// Identifies a participant; features point back at it.
    ParticipantHandle
);
handle!(
    /// Identifies a feature, e.g. as a binding site of another feature.
    FeatureHandle
);
