//! User store contract and in-memory implementation.
//!
//! # Responsibility
//! - Hold the authoritative ordered list of user records.
//! - Route reducer-style actions to the same add/edit/remove operations.
//!
//! # Invariants
//! - `add` appends; `edit` replaces in place; `remove` preserves the relative
//!   order of the remaining records.
//! - Write paths call `validate()` before mutating.
//! - `revision` grows by one per successful mutation only.

use crate::model::id::UserId;
use crate::model::user::{UserFields, UserRecord, UserValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Operational store failure.
///
/// UI-driven flows never hit these; seeing one means an internal invariant
/// broke somewhere upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    DuplicateId(UserId),
    NotFound(UserId),
    Validation(UserValidationError),
}

impl StoreError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateId(_) => "DUPLICATE_ID",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "user id already exists: {id}"),
            Self::NotFound(id) => write!(f, "user not found: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::DuplicateId(_) | Self::NotFound(_) => None,
        }
    }
}

impl From<UserValidationError> for StoreError {
    fn from(value: UserValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Reducer-style mutation request.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreAction {
    Add(UserRecord),
    Edit { id: UserId, fields: UserFields },
    Remove(UserId),
}

/// Result of one applied action.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreOutcome {
    Added(UserId),
    Edited(UserId),
    Removed(UserRecord),
}

/// Store interface for user record operations.
pub trait UserRepository {
    fn add(&mut self, record: UserRecord) -> StoreResult<UserId>;
    fn edit(&mut self, id: UserId, fields: UserFields) -> StoreResult<()>;
    fn remove(&mut self, id: UserId) -> StoreResult<UserRecord>;
    /// Current ordered snapshot. Mutation only goes through the methods above.
    fn list(&self) -> &[UserRecord];
    fn get(&self, id: UserId) -> Option<&UserRecord>;
    /// Count of successful mutations since creation.
    fn revision(&self) -> u64;

    /// Applies one action through the matching operation.
    fn dispatch(&mut self, action: StoreAction) -> StoreResult<StoreOutcome> {
        match action {
            StoreAction::Add(record) => self.add(record).map(StoreOutcome::Added),
            StoreAction::Edit { id, fields } => {
                self.edit(id, fields).map(|()| StoreOutcome::Edited(id))
            }
            StoreAction::Remove(id) => self.remove(id).map(StoreOutcome::Removed),
        }
    }
}

/// Vec-backed store owned by one page session.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserStore {
    users: Vec<UserRecord>,
    revision: u64,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from existing records, rejecting duplicates.
    pub fn with_records(records: impl IntoIterator<Item = UserRecord>) -> StoreResult<Self> {
        let mut store = Self::new();
        for record in records {
            store.add(record)?;
        }
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn position(&self, id: UserId) -> Option<usize> {
        self.users.iter().position(|user| user.id == id)
    }
}

impl UserRepository for InMemoryUserStore {
    fn add(&mut self, record: UserRecord) -> StoreResult<UserId> {
        record.validate()?;
        if self.position(record.id).is_some() {
            return Err(StoreError::DuplicateId(record.id));
        }

        let id = record.id;
        self.users.push(record);
        self.revision += 1;
        Ok(id)
    }

    fn edit(&mut self, id: UserId, fields: UserFields) -> StoreResult<()> {
        fields.validate()?;
        let index = self.position(id).ok_or(StoreError::NotFound(id))?;

        self.users[index].replace_fields(fields);
        self.revision += 1;
        Ok(())
    }

    fn remove(&mut self, id: UserId) -> StoreResult<UserRecord> {
        let index = self.position(id).ok_or(StoreError::NotFound(id))?;

        let removed = self.users.remove(index);
        self.revision += 1;
        Ok(removed)
    }

    fn list(&self) -> &[UserRecord] {
        &self.users
    }

    fn get(&self, id: UserId) -> Option<&UserRecord> {
        self.users.iter().find(|user| user.id == id)
    }

    fn revision(&self) -> u64 {
        self.revision
    }
}
