//! Typed domain model for user records.
//!
//! # Responsibility
//! - Define the canonical user record displayed in the list and edited by the
//!   form.
//! - Own identity generation so callers never derive ids from clock time.
//!
//! # Invariants
//! - Every record carries a non-nil `UserId` that never changes while the
//!   record exists.
//! - Field values held by a `UserRecord` already passed the field rules.

pub mod id;
pub mod user;
