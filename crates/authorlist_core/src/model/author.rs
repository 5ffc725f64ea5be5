//! Author record.

use super::entity::{Entity, EntityId};
use crate::schema::entities::AUTHOR;
use crate::schema::EntityDescriptor;
use serde::{Deserialize, Serialize};

pub const SEED_AUTHOR_NAME: &str = "Chuck Norris";
pub const SEED_AUTHOR_BIRTHDATE: &str = "10-03-1940";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: Option<EntityId>,
    pub name: String,
    /// Free-form date text as entered, e.g. `10-03-1940`.
    pub birthdate: String,
}

impl Author {
    /// Creates an unsaved author.
    pub fn new(name: impl Into<String>, birthdate: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            birthdate: birthdate.into(),
        }
    }

    /// The record inserted when the author table is empty.
    pub fn default_seed() -> Self {
        Self::new(SEED_AUTHOR_NAME, SEED_AUTHOR_BIRTHDATE)
    }

    pub fn is_default_seed(&self) -> bool {
        self.name == SEED_AUTHOR_NAME && self.birthdate == SEED_AUTHOR_BIRTHDATE
    }
}

impl Entity for Author {
    fn descriptor() -> &'static EntityDescriptor {
        &AUTHOR
    }

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }
}

#[cfg(test)]
mod tests {
    use super::Author;

    #[test]
    fn default_seed_is_unsaved_chuck_norris() {
        let seed = Author::default_seed();
        assert!(seed.id.is_none());
        assert_eq!(seed.name, "Chuck Norris");
        assert_eq!(seed.birthdate, "10-03-1940");
        assert!(seed.is_default_seed());
        assert!(!Author::new("Ada Lovelace", "12-10-1815").is_default_seed());
    }
}
