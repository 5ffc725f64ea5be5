//! Local SQLite store bootstrap and schema synchronization.
//!
//! # Responsibility
//! - Open and configure SQLite connections from a `StoreConfig`.
//! - Create missing entity tables when synchronization is enabled.
//!
//! # Invariants
//! - Core code must not read/write entity data before the store is open.
//! - Synchronization only creates tables; it never alters or drops them.

use crate::schema::SchemaError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod sync;

pub use open::Store;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    Io(std::io::Error),
    InvalidConfig(String),
    Schema(SchemaError),
    SchemaMismatch {
        table: &'static str,
        missing_column: &'static str,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
            Self::InvalidConfig(message) => write!(f, "invalid store config: {message}"),
            Self::Schema(err) => write!(f, "{err}"),
            Self::SchemaMismatch {
                table,
                missing_column,
            } => write!(
                f,
                "existing table `{table}` is missing declared column `{missing_column}`"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Schema(err) => Some(err),
            Self::InvalidConfig(_) | Self::SchemaMismatch { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<std::io::Error> for DbError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<SchemaError> for DbError {
    fn from(value: SchemaError) -> Self {
        Self::Schema(value)
    }
}

impl DbError {
    /// Stable code used in diagnostic log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "db_sqlite_error",
            Self::Io(_) => "db_io_error",
            Self::InvalidConfig(_) => "db_invalid_config",
            Self::Schema(_) => "db_schema_invalid",
            Self::SchemaMismatch { .. } => "db_schema_mismatch",
        }
    }
}
