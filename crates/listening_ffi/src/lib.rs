//! Flutter-facing bindings over `listening_core`.

pub mod api;
