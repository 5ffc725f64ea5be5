//! Bootstrap session state machine.

use crate::config::StoreConfig;
use crate::db::{DbError, Store};
use crate::model::Author;
use crate::repo::{EntityRepository, RepoError};
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapPhase {
    Disconnected,
    Connecting,
    Connected,
    Seeding,
    Ready,
    Failed,
}

impl BootstrapPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Seeding => "seeding",
            Self::Ready => "ready",
            Self::Failed => "failed",
        }
    }
}

impl Display for BootstrapPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub enum BootstrapError {
    /// The store could not be opened.
    Connection(DbError),
    /// Loading authors failed on an open store.
    Query(RepoError),
    /// Inserting the default author failed.
    Seed(RepoError),
    /// An earlier connect failed; the session does not retry.
    SessionFailed,
}

impl BootstrapError {
    /// Stable code used in diagnostic log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Connection(_) => "connection_failed",
            Self::Query(_) => "author_query_failed",
            Self::Seed(_) => "seed_insert_failed",
            Self::SessionFailed => "session_failed",
        }
    }
}

impl Display for BootstrapError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connection(err) => write!(f, "failed to open local store: {err}"),
            Self::Query(err) => write!(f, "failed to load authors: {err}"),
            Self::Seed(err) => write!(f, "failed to insert default author: {err}"),
            Self::SessionFailed => write!(f, "session failed to connect earlier"),
        }
    }
}

impl Error for BootstrapError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Connection(err) => Some(err),
            Self::Query(err) | Self::Seed(err) => Some(err),
            Self::SessionFailed => None,
        }
    }
}

/// Current phase plus every phase entered, oldest first.
#[derive(Debug)]
struct PhaseTracker {
    current: BootstrapPhase,
    history: Vec<BootstrapPhase>,
}

impl PhaseTracker {
    fn new() -> Self {
        Self {
            current: BootstrapPhase::Disconnected,
            history: vec![BootstrapPhase::Disconnected],
        }
    }

    fn enter(&mut self, next: BootstrapPhase) {
        debug!(
            "event=bootstrap_phase module=bootstrap from={} to={}",
            self.current, next
        );
        self.current = next;
        self.history.push(next);
    }
}

/// Owns the store handle and author snapshot for one screen session.
pub struct BootstrapSession {
    config: StoreConfig,
    store: Option<Store>,
    tracker: PhaseTracker,
    authors: Vec<Author>,
    last_error: Option<String>,
}

impl BootstrapSession {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            store: None,
            tracker: PhaseTracker::new(),
            authors: Vec::new(),
            last_error: None,
        }
    }

    /// Session over the fixed app store rooted at `base_dir`.
    pub fn for_app(base_dir: impl Into<PathBuf>) -> Self {
        Self::new(StoreConfig::app(base_dir))
    }

    /// Runs the procedure and returns the snapshot to display.
    ///
    /// Never fails: errors are logged and the snapshot is left empty.
    pub fn bootstrap(&mut self) -> &[Author] {
        if let Err(err) = self.try_bootstrap() {
            if !matches!(err, BootstrapError::SessionFailed) {
                error!(
                    "event={} module=bootstrap status=error error_code={} error={}",
                    event_name(&err),
                    err.code(),
                    err
                );
            }
        }
        &self.authors
    }

    /// Runs the procedure, propagating failures to the caller.
    ///
    /// # Errors
    /// - `Connection` when the store cannot be opened; the session is then
    ///   `Failed` for good.
    /// - `Query`/`Seed` when the open store rejects a read or the seed
    ///   insert; the session stays `Connected` and the next call retries.
    /// - `SessionFailed` on any call after a failed connect.
    pub fn try_bootstrap(&mut self) -> Result<&[Author], BootstrapError> {
        if self.tracker.current == BootstrapPhase::Failed {
            return Err(BootstrapError::SessionFailed);
        }

        if self.store.is_none() {
            self.tracker.enter(BootstrapPhase::Connecting);
            match Store::open(&self.config) {
                Ok(store) => {
                    self.store = Some(store);
                    self.tracker.enter(BootstrapPhase::Connected);
                }
                Err(err) => {
                    self.authors.clear();
                    self.last_error = Some(err.to_string());
                    self.tracker.enter(BootstrapPhase::Failed);
                    return Err(BootstrapError::Connection(err));
                }
            }
        }

        let Some(store) = self.store.as_ref() else {
            return Err(BootstrapError::SessionFailed);
        };

        match load_with_seed(store, &mut self.tracker) {
            Ok(authors) => {
                info!(
                    "event=bootstrap module=bootstrap status=ok authors={}",
                    authors.len()
                );
                self.authors = authors;
                self.last_error = None;
                self.tracker.enter(BootstrapPhase::Ready);
                Ok(&self.authors)
            }
            Err(err) => {
                self.authors.clear();
                self.last_error = Some(err.to_string());
                self.tracker.enter(BootstrapPhase::Connected);
                Err(err)
            }
        }
    }

    pub fn phase(&self) -> BootstrapPhase {
        self.tracker.current
    }

    /// Every phase entered so far, starting with `Disconnected`.
    pub fn history(&self) -> &[BootstrapPhase] {
        &self.tracker.history
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    /// Message of the most recent failure, cleared on success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn store(&self) -> Option<&Store> {
        self.store.as_ref()
    }

    /// Releases the store handle.
    pub fn shutdown(self) -> Result<(), DbError> {
        info!(
            "event=bootstrap_shutdown module=bootstrap phase={}",
            self.tracker.current
        );
        match self.store {
            Some(store) => store.close(),
            None => Ok(()),
        }
    }
}

fn load_with_seed(
    store: &Store,
    tracker: &mut PhaseTracker,
) -> Result<Vec<Author>, BootstrapError> {
    let repo = store
        .repository::<Author>()
        .map_err(BootstrapError::Query)?;
    let authors = repo.find_all().map_err(BootstrapError::Query)?;
    if !authors.is_empty() {
        return Ok(authors);
    }

    tracker.enter(BootstrapPhase::Seeding);
    let inserted = repo
        .insert_if_empty(Author::default_seed())
        .map_err(BootstrapError::Seed)?;
    info!(
        "event=bootstrap_seed module=bootstrap status=ok inserted={}",
        inserted.is_some()
    );

    repo.find_all().map_err(BootstrapError::Query)
}

fn event_name(err: &BootstrapError) -> &'static str {
    match err {
        BootstrapError::Connection(_) => "bootstrap_connect",
        BootstrapError::Query(_) => "bootstrap_query",
        BootstrapError::Seed(_) => "bootstrap_seed",
        BootstrapError::SessionFailed => "bootstrap",
    }
}
