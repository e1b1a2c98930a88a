//! Page view model consumed by UI shells.
//!
//! # Responsibility
//! - Project one form snapshot and one store snapshot into render-ready data.
//!
//! # Invariants
//! - Rendering is a pure function of its inputs.
//! - Only touched fields expose an inline error.

pub mod page;
