//! FFI use-case API for the mobile author list screen.
//!
//! # Responsibility
//! - Expose the author list bootstrap to Dart via FRB.
//! - Own the one process-wide bootstrap session.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - At most one session exists; it is bound to the first `db_dir` used.

use authorlist_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AuthorListView, BootstrapPhase, BootstrapSession,
};
use log::warn;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

static SESSION: OnceLock<Mutex<Option<BootstrapSession>>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
/// - Idempotent for the same `level + log_dir`; conflicting calls fail.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One author tile as shown by the host list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorItem {
    /// Stable record id, used as the list key.
    pub id: String,
    pub name: String,
    pub birthdate: String,
}

/// Result envelope for `authors_bootstrap`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorListResponse {
    /// `true` when the session reached `ready`.
    pub ok: bool,
    /// Bootstrap phase after the call (`ready`, `failed`, ...).
    pub phase: String,
    /// Screen title.
    pub title: String,
    /// Author tiles in store order; empty on failure.
    pub items: Vec<AuthorItem>,
    /// Human-readable diagnostics for the host.
    pub message: String,
}

/// Runs the author list bootstrap for the store under `db_dir`.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - First call opens the store; later calls reuse it.
/// - A different `db_dir` while a session is alive is rejected.
/// - Never panics; failures return `ok=false` and an empty list.
#[flutter_rust_bridge::frb(sync)]
pub fn authors_bootstrap(db_dir: String) -> AuthorListResponse {
    let db_dir = db_dir.trim();
    if db_dir.is_empty() {
        return failure_response(BootstrapPhase::Disconnected, "db_dir cannot be empty");
    }

    let mut guard = match session_slot().lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };

    let session = guard.get_or_insert_with(|| BootstrapSession::for_app(PathBuf::from(db_dir)));

    if session.config().base_dir.as_path() != Path::new(db_dir) {
        warn!("event=authors_bootstrap module=ffi status=rejected reason=db_dir_mismatch");
        return failure_response(
            session.phase(),
            format!(
                "session already bound to `{}`",
                session.config().base_dir.display()
            ),
        );
    }

    let view = AuthorListView::from_authors(session.bootstrap());
    let phase = session.phase();
    let items = view
        .tiles
        .into_iter()
        .map(|tile| AuthorItem {
            id: tile.key,
            name: tile.name,
            birthdate: tile.birthdate,
        })
        .collect::<Vec<_>>();

    let message = match session.last_error() {
        Some(err) => format!("authors_bootstrap failed: {err}"),
        None => format!("Loaded {} author(s).", items.len()),
    };

    AuthorListResponse {
        ok: phase == BootstrapPhase::Ready,
        phase: phase.as_str().to_string(),
        title: view.title.to_string(),
        items,
        message,
    }
}

/// Closes the process-wide session, if any.
///
/// # FFI contract
/// - Sync call.
/// - Returns empty string on success (including "no session") and an error
///   message when closing the store fails.
#[flutter_rust_bridge::frb(sync)]
pub fn authors_shutdown() -> String {
    let mut guard = match session_slot().lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    match guard.take() {
        Some(session) => match session.shutdown() {
            Ok(()) => String::new(),
            Err(err) => format!("authors_shutdown failed: {err}"),
        },
        None => String::new(),
    }
}

fn session_slot() -> &'static Mutex<Option<BootstrapSession>> {
    SESSION.get_or_init(|| Mutex::new(None))
}

fn failure_response(phase: BootstrapPhase, message: impl Into<String>) -> AuthorListResponse {
    AuthorListResponse {
        ok: false,
        phase: phase.as_str().to_string(),
        title: authorlist_core::display::AUTHOR_LIST_TITLE.to_string(),
        items: Vec::new(),
        message: message.into(),
    }
}
