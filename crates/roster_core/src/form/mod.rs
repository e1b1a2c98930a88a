//! Form controller for creating and editing one user record.
//!
//! # Responsibility
//! - Track raw values, touched flags and field errors as immutable snapshots.
//! - Turn a valid submission into a finished `UserRecord`.
//!
//! # Invariants
//! - Errors are recomputed on every value change; visibility is gated by
//!   touched flags.
//! - The controller never talks to a store; callers apply its output.

pub mod controller;
pub mod state;
