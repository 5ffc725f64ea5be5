//! Category and Post records. Only identity is declared for now.

use super::entity::{Entity, EntityId};
use crate::schema::entities::{CATEGORY, POST};
use crate::schema::EntityDescriptor;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Option<EntityId>,
}

impl Category {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Entity for Category {
    fn descriptor() -> &'static EntityDescriptor {
        &CATEGORY
    }

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Option<EntityId>,
}

impl Post {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Entity for Post {
    fn descriptor() -> &'static EntityDescriptor {
        &POST
    }

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }
}
