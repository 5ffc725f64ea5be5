//! User and UserPreference records.
//!
//! # Invariants
//! - `User.user_preference` is the owning side of a one-to-one link and
//!   holds only the referenced id; loading the target is the caller's job.
//! - A UserPreference is referenced by at most one User.

use super::entity::{Entity, EntityId};
use crate::schema::entities::{USER, USER_PREFERENCE};
use crate::schema::EntityDescriptor;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Option<EntityId>,
    /// External auth provider subject, when linked.
    pub eauth_id: Option<Uuid>,
    pub user_preference: Option<EntityId>,
}

impl User {
    pub fn new(eauth_id: Option<Uuid>) -> Self {
        Self {
            id: None,
            eauth_id,
            user_preference: None,
        }
    }

    /// Links this user to a saved preference record.
    pub fn with_preference(mut self, preference: &UserPreference) -> Self {
        self.user_preference = preference.id;
        self
    }
}

impl Entity for User {
    fn descriptor() -> &'static EntityDescriptor {
        &USER
    }

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreference {
    pub id: Option<EntityId>,
}

impl UserPreference {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Entity for UserPreference {
    fn descriptor() -> &'static EntityDescriptor {
        &USER_PREFERENCE
    }

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }
}
