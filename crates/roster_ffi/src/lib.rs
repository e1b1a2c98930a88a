//! Flutter-facing bindings for roster core.

pub mod api;
