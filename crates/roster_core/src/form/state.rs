//! Immutable form state snapshots.

use crate::model::id::UserId;
use crate::model::user::UserRecord;
use crate::validation::{validate_field, FieldError, FieldErrorKind, UserField};
use serde::{Deserialize, Serialize};

const FIELD_COUNT: usize = UserField::ALL.len();

/// Raw input text for the editable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormValues {
    pub name: String,
    pub age: String,
    pub avatar: String,
}

impl FormValues {
    pub fn get(&self, field: UserField) -> &str {
        match field {
            UserField::Name => &self.name,
            UserField::Age => &self.age,
            UserField::Avatar => &self.avatar,
        }
    }

    pub fn set(&mut self, field: UserField, value: impl Into<String>) {
        let value = value.into();
        match field {
            UserField::Name => self.name = value,
            UserField::Age => self.age = value,
            UserField::Avatar => self.avatar = value,
        }
    }

    /// Seeds values from a stored record.
    pub fn from_record(record: &UserRecord) -> Self {
        Self {
            name: record.name.clone(),
            age: record.age.to_string(),
            avatar: record.avatar.clone(),
        }
    }
}

/// One snapshot of the form.
///
/// Transitions return a new snapshot and never mutate `self`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    values: FormValues,
    touched: [bool; FIELD_COUNT],
    errors: [Option<FieldErrorKind>; FIELD_COUNT],
    editing: Option<UserId>,
}

impl Default for FormState {
    fn default() -> Self {
        Self::empty()
    }
}

impl FormState {
    /// Blank create form. Every field starts invalid but untouched.
    pub fn empty() -> Self {
        Self::from_values(FormValues::default(), None)
    }

    /// Edit form seeded from `record`, nothing touched.
    pub fn editing(record: &UserRecord) -> Self {
        Self::from_values(FormValues::from_record(record), Some(record.id))
    }

    fn from_values(values: FormValues, editing: Option<UserId>) -> Self {
        let errors = UserField::ALL.map(|field| error_kind(field, values.get(field)));
        Self {
            values,
            touched: [false; FIELD_COUNT],
            errors,
            editing,
        }
    }

    /// Replaces one value and recomputes only that field's error.
    pub fn with_value(&self, field: UserField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.values.set(field, value);
        next.errors[field.index()] = error_kind(field, next.values.get(field));
        next
    }

    /// Marks one field touched and recomputes its error.
    pub fn with_touched(&self, field: UserField) -> Self {
        let mut next = self.clone();
        next.touched[field.index()] = true;
        next.errors[field.index()] = error_kind(field, next.values.get(field));
        next
    }

    /// Same values and touched flags, no editing target.
    pub fn without_editing(&self) -> Self {
        let mut next = self.clone();
        next.editing = None;
        next
    }

    /// Marks every field touched so all errors become visible.
    pub fn with_all_touched(&self) -> Self {
        UserField::ALL
            .into_iter()
            .fold(self.clone(), |state, field| state.with_touched(field))
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn value(&self, field: UserField) -> &str {
        self.values.get(field)
    }

    pub fn is_touched(&self, field: UserField) -> bool {
        self.touched[field.index()]
    }

    /// Current error regardless of touched state.
    pub fn error(&self, field: UserField) -> Option<FieldError> {
        self.errors[field.index()].map(|kind| FieldError::new(field, kind))
    }

    /// Error to render beneath the input, only once the field was touched.
    pub fn visible_error(&self, field: UserField) -> Option<FieldError> {
        if self.is_touched(field) {
            self.error(field)
        } else {
            None
        }
    }

    /// All current errors in form order.
    pub fn errors(&self) -> Vec<FieldError> {
        UserField::ALL
            .into_iter()
            .filter_map(|field| self.error(field))
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.iter().all(Option::is_none)
    }

    /// Id of the record being edited, `None` when creating.
    pub fn editing_target(&self) -> Option<UserId> {
        self.editing
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Submit button text.
    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() {
            "Update"
        } else {
            "Save"
        }
    }
}

fn error_kind(field: UserField, value: &str) -> Option<FieldErrorKind> {
    validate_field(field, value).err().map(|err| err.kind)
}

#[cfg(test)]
mod tests {
    use super::FormState;
    use crate::validation::{FieldErrorKind, UserField};

    #[test]
    fn empty_state_hides_errors_until_touched() {
        let state = FormState::empty();
        assert!(!state.is_valid());
        assert_eq!(
            state.error(UserField::Name).map(|e| e.kind),
            Some(FieldErrorKind::Required)
        );
        assert_eq!(state.visible_error(UserField::Name), None);

        let touched = state.with_touched(UserField::Name);
        assert!(touched.visible_error(UserField::Name).is_some());
        assert!(!state.is_touched(UserField::Name), "transitions must not mutate");
    }

    #[test]
    fn without_editing_keeps_draft() {
        let state = FormState::empty()
            .with_value(UserField::Name, "Draft")
            .with_touched(UserField::Name);
        let mut editing = state.clone();
        editing.editing = Some(crate::model::id::UserId::from_u128(4));

        let detached = editing.without_editing();
        assert_eq!(detached, state);
        assert_eq!(detached.submit_label(), "Save");
    }

    #[test]
    fn with_value_leaves_other_fields_alone() {
        let state = FormState::empty().with_touched(UserField::Age);
        let next = state.with_value(UserField::Name, "Alice");

        assert!(next.is_touched(UserField::Age));
        assert!(!next.is_touched(UserField::Name));
        assert_eq!(next.error(UserField::Name), None);
        assert_eq!(
            next.error(UserField::Age).map(|e| e.kind),
            Some(FieldErrorKind::Required)
        );
    }

    #[test]
    fn submit_label_follows_editing_target() {
        assert_eq!(FormState::empty().submit_label(), "Save");
    }
}
