//! Startup procedure that connects the local store and guarantees a seed
//! author before the list is displayed.
//!
//! # Responsibility
//! - Own the store handle for one screen session.
//! - Drive `Disconnected -> Connecting -> Connected -> [Seeding] -> Ready`.
//!
//! # Invariants
//! - The emptiness check runs after a successful connect and before the
//!   snapshot handed to the display.
//! - A failed connect is terminal for the session; no retry.
//! - At most one default author is inserted per store.

mod session;

pub use session::{BootstrapError, BootstrapPhase, BootstrapSession};
