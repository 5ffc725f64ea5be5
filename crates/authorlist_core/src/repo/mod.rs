//! Repository contracts and SQLite implementation for declared entities.
//!
//! # Responsibility
//! - Provide find/save access per entity type.
//! - Keep SQL and row mapping inside the persistence boundary.
//!
//! # Invariants
//! - Repositories only exist for entities registered with their store.
//! - Read paths reject invalid persisted identifiers instead of masking them.

pub mod entity_repo;
pub mod mapping;

pub use entity_repo::{EntityRepository, RepoError, RepoResult, SqliteEntityRepository};
pub use mapping::RowMapping;
