//! Shared identity type and the record-to-declaration link.

use crate::schema::EntityDescriptor;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Generated primary key of any entity record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(Uuid);

impl EntityId {
    /// Produces a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }
}

impl Display for EntityId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for EntityId {
    type Err = uuid::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value).map(Self)
    }
}

/// A record type backed by one declared table.
pub trait Entity: Sized {
    fn descriptor() -> &'static EntityDescriptor;

    fn id(&self) -> Option<EntityId>;

    /// Sets the primary key. Called by the store when it generates identity.
    fn assign_id(&mut self, id: EntityId);
}

#[cfg(test)]
mod tests {
    use super::EntityId;

    #[test]
    fn display_and_parse_agree() {
        let id = EntityId::generate();
        let parsed: EntityId = id.to_string().parse().expect("id should parse");
        assert_eq!(parsed, id);
    }

    #[test]
    fn generated_ids_differ() {
        assert_ne!(EntityId::generate(), EntityId::generate());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("not-a-uuid".parse::<EntityId>().is_err());
    }
}
