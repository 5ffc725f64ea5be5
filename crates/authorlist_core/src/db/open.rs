//! Store handle: connection bootstrap for a configured local database.
//!
//! # Responsibility
//! - Open file-backed or in-memory SQLite connections from `StoreConfig`.
//! - Configure connection pragmas required by entity relations.
//! - Synchronize the schema before returning a usable handle.
//!
//! # Invariants
//! - Returned stores have `foreign_keys=ON`.
//! - Returned stores with `synchronize` set have every registered table.

use super::sync::synchronize_schema;
use super::{DbError, DbResult};
use crate::config::{LogKind, StoreConfig, StoreType};
use crate::schema::SchemaRegistry;
use log::{debug, info, warn};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open connection plus the schema it was opened with.
#[derive(Debug)]
pub struct Store {
    conn: Connection,
    registry: SchemaRegistry,
    logging: Vec<LogKind>,
    path: Option<PathBuf>,
}

impl Store {
    /// Opens the store described by `config`.
    ///
    /// # Side effects
    /// - Creates the storage directory when missing.
    /// - Creates missing tables when `config.synchronize` is set.
    /// - Emits `db_open` logging events with duration and status. Failures
    ///   are logged at warn; the caller owns the error-level report.
    pub fn open(config: &StoreConfig) -> DbResult<Self> {
        let started_at = Instant::now();
        let mode = mode_label(config.store_type);
        info!(
            "event=db_open module=db status=start mode={} database={}",
            mode, config.database
        );

        match open_inner(config) {
            Ok(store) => {
                info!(
                    "event=db_open module=db status=ok mode={} duration_ms={}",
                    mode,
                    started_at.elapsed().as_millis()
                );
                Ok(store)
            }
            Err(err) => {
                if config.logs(LogKind::Error) {
                    warn!(
                        "event=db_open module=db status=error mode={} duration_ms={} error_code={} error={}",
                        mode,
                        started_at.elapsed().as_millis(),
                        err.code(),
                        err
                    );
                }
                Err(err)
            }
        }
    }

    /// Opens a private in-memory store with the schema of `config`.
    pub fn open_in_memory(config: &StoreConfig) -> DbResult<Self> {
        let memory = StoreConfig {
            store_type: StoreType::Memory,
            ..config.clone()
        };
        Self::open(&memory)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Database file path, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn logs(&self, kind: LogKind) -> bool {
        self.logging.contains(&kind)
    }

    /// Emits a statement trace when query logging is enabled.
    pub(crate) fn trace_query(&self, sql: &str) {
        if self.logs(LogKind::Query) {
            debug!("event=db_query module=repo sql={}", sql.replace('\n', " "));
        }
    }

    /// Closes the connection, reporting any close failure.
    pub fn close(self) -> DbResult<()> {
        self.conn.close().map_err(|(_, err)| DbError::Sqlite(err))?;
        info!("event=db_close module=db status=ok");
        Ok(())
    }
}

fn open_inner(config: &StoreConfig) -> DbResult<Store> {
    config.validate()?;
    let registry = config.registry()?;

    let path = config.database_path();
    let mut conn = match &path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            Connection::open(path)?
        }
        None => Connection::open_in_memory()?,
    };

    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;

    if config.synchronize {
        let created = synchronize_schema(&mut conn, &registry, config.logs(LogKind::Schema))?;
        if config.logs(LogKind::Schema) {
            info!(
                "event=schema_sync module=db status=ok created_tables={}",
                created.len()
            );
        }
    }

    Ok(Store {
        conn,
        registry,
        logging: config.logging.clone(),
        path,
    })
}

fn mode_label(store_type: StoreType) -> &'static str {
    match store_type {
        StoreType::MobileLocal => "file",
        StoreType::Memory => "memory",
    }
}
