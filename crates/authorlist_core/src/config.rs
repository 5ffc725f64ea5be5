//! Store configuration.
//!
//! # Responsibility
//! - Describe how a local store is opened: where, which schemas, which
//!   diagnostics.
//! - Provide the fixed configuration the author list screen uses.
//!
//! # Invariants
//! - `database` is a bare identifier, never a path.
//! - Every name in `entities` resolves to a built-in declaration, once.

use crate::db::{DbError, DbResult};
use crate::schema::entities::{builtin, default_entity_names};
use crate::schema::{EntityDescriptor, SchemaRegistry};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Location keyword that resolves to `base_dir` itself.
pub const DEFAULT_LOCATION: &str = "default";
/// Database identifier used by the author list screen.
pub const APP_DATABASE: &str = "test";

const DATABASE_FILE_EXTENSION: &str = "sqlite3";

/// Backend variant of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StoreType {
    /// On-device SQLite file.
    MobileLocal,
    /// Private in-memory SQLite database.
    Memory,
}

/// Diagnostic categories a store emits on top of the log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Error,
    Query,
    Schema,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    pub store_type: StoreType,
    pub database: String,
    /// `"default"` or a directory, relative paths resolve under `base_dir`.
    pub location: String,
    /// Host-provided data directory.
    pub base_dir: PathBuf,
    #[serde(default)]
    pub logging: Vec<LogKind>,
    /// Create missing tables on open.
    #[serde(default)]
    pub synchronize: bool,
    #[serde(default = "default_entity_names")]
    pub entities: Vec<String>,
}

impl StoreConfig {
    /// Fixed configuration of the author list screen.
    pub fn app(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            store_type: StoreType::MobileLocal,
            database: APP_DATABASE.to_string(),
            location: DEFAULT_LOCATION.to_string(),
            base_dir: base_dir.into(),
            logging: vec![LogKind::Error, LogKind::Query, LogKind::Schema],
            synchronize: true,
            entities: default_entity_names(),
        }
    }

    /// Same schema and diagnostics as [`StoreConfig::app`], kept in memory.
    pub fn in_memory() -> Self {
        Self {
            store_type: StoreType::Memory,
            ..Self::app(PathBuf::new())
        }
    }

    /// Parses and validates a JSON configuration document.
    pub fn from_json(raw: &str) -> DbResult<Self> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|err| DbError::InvalidConfig(format!("malformed store config: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DbResult<()> {
        let database = self.database.trim();
        if database.is_empty() {
            return Err(DbError::InvalidConfig(
                "database identifier cannot be empty".to_string(),
            ));
        }
        if database.contains(['/', '\\']) || database == "." || database == ".." {
            return Err(DbError::InvalidConfig(format!(
                "database identifier `{database}` must not be a path"
            )));
        }
        if self.store_type == StoreType::MobileLocal && self.location.trim().is_empty() {
            return Err(DbError::InvalidConfig("location cannot be empty".to_string()));
        }
        self.registry()?;
        Ok(())
    }

    /// Resolves `entities` to built-in declarations.
    pub fn descriptors(&self) -> DbResult<Vec<&'static EntityDescriptor>> {
        let mut descriptors: Vec<&'static EntityDescriptor> = Vec::with_capacity(self.entities.len());
        for name in &self.entities {
            let descriptor = builtin(name.trim()).ok_or_else(|| {
                DbError::InvalidConfig(format!("unknown entity `{name}` in store config"))
            })?;
            descriptors.push(descriptor);
        }
        Ok(descriptors)
    }

    /// Builds the schema registry for the configured entities.
    pub fn registry(&self) -> DbResult<SchemaRegistry> {
        Ok(SchemaRegistry::from_descriptors(self.descriptors()?)?)
    }

    /// Directory holding the database file.
    pub fn storage_dir(&self) -> PathBuf {
        let location = self.location.trim();
        if location == DEFAULT_LOCATION {
            self.base_dir.clone()
        } else {
            self.base_dir.join(location)
        }
    }

    /// Full database file path, `None` for in-memory stores.
    pub fn database_path(&self) -> Option<PathBuf> {
        match self.store_type {
            StoreType::MobileLocal => Some(self.storage_dir().join(format!(
                "{}.{DATABASE_FILE_EXTENSION}",
                self.database.trim()
            ))),
            StoreType::Memory => None,
        }
    }

    pub fn logs(&self, kind: LogKind) -> bool {
        self.logging.contains(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::{LogKind, StoreConfig, StoreType};
    use crate::db::DbError;
    use std::path::PathBuf;

    #[test]
    fn app_config_matches_screen_defaults() {
        let config = StoreConfig::app("/data/app");
        assert_eq!(config.store_type, StoreType::MobileLocal);
        assert_eq!(config.database, "test");
        assert_eq!(config.location, "default");
        assert!(config.synchronize);
        assert!(config.logs(LogKind::Query));
        assert_eq!(
            config.entities,
            vec!["Author", "Category", "Post", "User", "UserPreference"]
        );
        assert_eq!(
            config.database_path(),
            Some(PathBuf::from("/data/app/test.sqlite3"))
        );
        config.validate().expect("config should validate");
    }

    #[test]
    fn custom_location_resolves_under_base_dir() {
        let mut config = StoreConfig::app("/data/app");
        config.location = "databases".to_string();
        assert_eq!(
            config.database_path(),
            Some(PathBuf::from("/data/app/databases/test.sqlite3"))
        );
    }

    #[test]
    fn in_memory_config_has_no_path() {
        assert_eq!(StoreConfig::in_memory().database_path(), None);
    }

    #[test]
    fn from_json_reads_camel_case_document() {
        let config = StoreConfig::from_json(
            r#"{
                "storeType": "mobile-local",
                "database": "test",
                "location": "default",
                "baseDir": "/data/app",
                "logging": ["error", "schema"],
                "synchronize": true
            }"#,
        )
        .expect("config should parse");
        assert!(config.logs(LogKind::Schema));
        assert!(!config.logs(LogKind::Query));
        assert_eq!(config.entities.len(), 5);
    }

    #[test]
    fn validate_rejects_path_like_database() {
        let mut config = StoreConfig::app("/data/app");
        config.database = "../escape".to_string();
        assert!(matches!(config.validate(), Err(DbError::InvalidConfig(_))));
    }

    #[test]
    fn validate_rejects_unknown_entity() {
        let mut config = StoreConfig::app("/data/app");
        config.entities.push("Comment".to_string());
        let err = config.validate().expect_err("config should be rejected");
        assert!(err.to_string().contains("Comment"));
    }

    #[test]
    fn duplicate_entity_fails_registry_build() {
        let mut config = StoreConfig::app("/data/app");
        config.entities.push("Author".to_string());
        assert!(matches!(config.registry(), Err(DbError::Schema(_))));
    }
}
