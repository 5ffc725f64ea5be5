//! Core of the author list app: local store, entity declarations and the
//! startup bootstrap that seeds a default author.

pub mod bootstrap;
pub mod config;
pub mod db;
pub mod display;
pub mod logging;
pub mod model;
pub mod repo;
pub mod schema;

pub use bootstrap::{BootstrapError, BootstrapPhase, BootstrapSession};
pub use config::{LogKind, StoreConfig, StoreType};
pub use db::{DbError, DbResult, Store};
pub use display::{AuthorListView, AuthorTile};
pub use logging::{init_logging, logging_status};
pub use model::{Author, Category, Entity, EntityId, Post, User, UserPreference};
pub use repo::{EntityRepository, RepoError, RepoResult, RowMapping, SqliteEntityRepository};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
