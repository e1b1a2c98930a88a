//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate form and store calls into UI event handlers.
//! - Keep UI/FFI layers decoupled from store details.

pub mod session;
