//! User identity and id generators.
//!
//! # Responsibility
//! - Provide the stable `UserId` newtype used across core APIs.
//! - Provide collision-free id sources for create submissions.
//!
//! # Invariants
//! - Generated ids are never nil.
//! - One source never yields the same id twice.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identity of one user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Wraps an existing UUID. Nil is checked by record constructors.
    pub const fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Maps a small integer into the id space.
    ///
    /// Used by sequential sources and fixtures that want readable ids.
    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value.trim()).map(Self)
    }
}

/// Source of fresh user ids for create submissions.
pub trait IdSource {
    fn next_id(&mut self) -> UserId;
}

impl<S: IdSource + ?Sized> IdSource for Box<S> {
    fn next_id(&mut self) -> UserId {
        (**self).next_id()
    }
}

/// Random UUID v4 ids. Default for interactive sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn next_id(&mut self) -> UserId {
        UserId(Uuid::new_v4())
    }
}

/// Monotonic counter ids, deterministic across runs.
///
/// The first id is `from_u128(start)`; zero is skipped because it maps to nil.
/// After `u128::MAX` the counter wraps to 1.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: u128,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(start: u128) -> Self {
        Self {
            next: start.max(1),
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> UserId {
        let id = UserId::from_u128(self.next);
        self.next = self.next.checked_add(1).unwrap_or(1);
        id
    }
}
