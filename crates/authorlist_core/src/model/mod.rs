//! Typed records for the declared entities.
//!
//! # Responsibility
//! - Give each declared entity an owned, serializable record type.
//! - Link every record type to its static declaration.
//!
//! # Invariants
//! - `id == None` means the record has never been saved.
//! - Records read back from a store always carry an id.

pub mod author;
pub mod content;
pub mod entity;
pub mod user;

pub use author::{Author, SEED_AUTHOR_BIRTHDATE, SEED_AUTHOR_NAME};
pub use content::{Category, Post};
pub use entity::{Entity, EntityId};
pub use user::{User, UserPreference};
