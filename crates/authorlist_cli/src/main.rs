//! CLI smoke entry point.
//!
//! # Responsibility
//! - Run the author list bootstrap against a store directory.
//! - Print the rendered list so a store can be checked without the app.

use authorlist_core::{AuthorListView, BootstrapPhase, BootstrapSession};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let db_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    println!("authorlist_core version={}", authorlist_core::core_version());

    let mut session = BootstrapSession::for_app(db_dir);
    let view = AuthorListView::from_authors(session.bootstrap());
    for line in view.render_lines() {
        println!("{line}");
    }

    let phase = session.phase();
    println!("phase={phase}");
    if let Some(err) = session.last_error() {
        eprintln!("error: {err}");
    }

    let closed = session.shutdown();
    if let Err(err) = &closed {
        eprintln!("error: failed to close store: {err}");
    }

    if phase == BootstrapPhase::Ready && closed.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
