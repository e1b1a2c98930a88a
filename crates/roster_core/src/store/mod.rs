//! Record store abstractions and the in-memory implementation.
//!
//! # Responsibility
//! - Define the ordered user collection contract read by the page renderer.
//! - Keep mutation behind add/edit/remove so identities stay unique.
//!
//! # Invariants
//! - No two records in one store share an id.
//! - Failed operations leave the collection and its revision untouched.

pub mod user_store;
