use serde::{de::DeserializeOwned, Serialize};
use std::{fmt::Display, hash::Hash};
use uuid::Uuid;

use super::{ValidationError, ValidationErrors};

/// A record type served by the permission-less CRUD routes.
///
/// Records carry no references that other entities rely on, so they can be
/// replaced or removed without any integrity checks. The serialized form is
/// both the wire shape and the stored shape.
pub trait Record:
    Clone + Send + Sync + Serialize + DeserializeOwned + 'static
{
    type Id: Copy
        + Eq
        + Hash
        + Default
        + Display
        + AsRef<Uuid>
        + Send
        + Sync
        + Serialize
        + DeserializeOwned;

    /// Request body accepted by create and update.
    type Input: DeserializeOwned + Send + 'static;

    /// Storage namespace.
    const COLLECTION: &'static str;

    /// Human name used in messages, e.g. "Sprint not found".
    const DISPLAY_NAME: &'static str;

    fn id(&self) -> Self::Id;

    fn parse_id(raw: &str) -> Result<Self::Id, ValidationError>;

    fn from_input(
        id: Self::Id,
        input: Self::Input,
    ) -> Result<Self, ValidationErrors>;
}
