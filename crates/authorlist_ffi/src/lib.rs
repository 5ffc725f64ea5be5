//! Flutter-facing bindings for the author list core.

pub mod api;
