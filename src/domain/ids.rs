use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::ValidationError;

macro_rules! entity_id {
    ($name:ident, $label:literal) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn parse(id: &str) -> Result<Self, ValidationError> {
                let parsed = Uuid::try_parse(id.trim()).map_err(|e| {
                    ValidationError::new(format!(
                        "Invalid {} ID: {e}",
                        $label
                    ))
                })?;
                Ok(Self(parsed))
            }

            pub fn new(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl AsRef<Uuid> for $name {
            fn as_ref(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(MemberId, "member");
entity_id!(ProjectId, "project");
entity_id!(TaskId, "task");
entity_id!(SprintId, "sprint");
