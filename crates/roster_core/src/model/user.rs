//! User record domain model.
//!
//! # Responsibility
//! - Define the canonical user record shown as a card in the list.
//! - Re-check field rules at construction boundaries.
//!
//! # Invariants
//! - `id` is non-nil and immutable for the record lifetime.
//! - `name`, `age` and `avatar` satisfy the same rules the form applies.

use crate::model::id::{IdSource, UserId};
use crate::validation::{check_age, validate_avatar, validate_name, FieldError, UserField};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Typed non-identity fields of a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserFields {
    /// Display name, at least three characters.
    pub name: String,
    /// Finite age, at least one; fractions are allowed.
    pub age: f64,
    /// Absolute avatar image URL, stored exactly as entered.
    pub avatar: String,
}

impl UserFields {
    pub fn new(
        name: impl Into<String>,
        age: impl Into<f64>,
        avatar: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            age: age.into(),
            avatar: avatar.into(),
        }
    }

    /// Re-applies the form rules to typed values.
    ///
    /// Returns the first failing field in form order.
    pub fn validate(&self) -> Result<(), UserValidationError> {
        validate_name(&self.name)
            .map_err(|kind| FieldError::new(UserField::Name, kind))?;
        check_age(self.age).map_err(|kind| FieldError::new(UserField::Age, kind))?;
        validate_avatar(&self.avatar)
            .map_err(|kind| FieldError::new(UserField::Avatar, kind))?;
        Ok(())
    }
}

/// Validation errors for user record construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserValidationError {
    /// Nil ids are reserved and never identify a record.
    NilId,
    /// A field breaks its rule.
    Field(FieldError),
}

impl Display for UserValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "user id must not be nil"),
            Self::Field(err) => write!(f, "invalid `{}`: {} ({})", err.field, err, err.kind.code()),
        }
    }
}

impl Error for UserValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NilId => None,
            Self::Field(err) => Some(err),
        }
    }
}

impl From<FieldError> for UserValidationError {
    fn from(value: FieldError) -> Self {
        Self::Field(value)
    }
}

/// One user entry in the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub age: f64,
    pub avatar: String,
}

impl UserRecord {
    /// Creates a record with an id drawn from `ids`.
    pub fn new(ids: &mut impl IdSource, fields: UserFields) -> Result<Self, UserValidationError> {
        Self::with_id(ids.next_id(), fields)
    }

    /// Creates a record with a caller-provided id.
    ///
    /// Used by edit flows where identity already exists.
    pub fn with_id(id: UserId, fields: UserFields) -> Result<Self, UserValidationError> {
        if id.is_nil() {
            return Err(UserValidationError::NilId);
        }
        fields.validate()?;
        let UserFields { name, age, avatar } = fields;
        Ok(Self {
            id,
            name,
            age,
            avatar,
        })
    }

    /// Checks id and field invariants of an already built record.
    ///
    /// Fields are public, so write paths re-check before accepting a record.
    pub fn validate(&self) -> Result<(), UserValidationError> {
        if self.id.is_nil() {
            return Err(UserValidationError::NilId);
        }
        self.fields().validate()
    }

    /// Returns a copy of the non-identity fields.
    pub fn fields(&self) -> UserFields {
        UserFields::new(self.name.clone(), self.age, self.avatar.clone())
    }

    /// Replaces every non-identity field, keeping `id`.
    pub(crate) fn replace_fields(&mut self, fields: UserFields) {
        self.name = fields.name;
        self.age = fields.age;
        self.avatar = fields.avatar;
    }
}
