//! Form controller driving state transitions and submission.
//!
//! # Responsibility
//! - Apply change/blur/edit/submit events to the current `FormState`.
//! - Finalize valid input into a create or update submission.
//!
//! # Invariants
//! - Update submissions keep the editing target's id.
//! - Create submissions draw exactly one fresh id from the `IdSource`.
//! - A successful submit resets the form and clears the editing target.

use crate::form::state::FormState;
use crate::model::id::{IdSource, RandomIds, UserId};
use crate::model::user::{UserRecord, UserValidationError};
use crate::validation::{parse_age, validate_field, FieldError, UserField};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Finished record emitted by a valid submit.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// No editing target; record has a fresh id.
    Create(UserRecord),
    /// Editing target set; record keeps the target id.
    Update(UserRecord),
}

impl Submission {
    pub fn record(&self) -> &UserRecord {
        match self {
            Self::Create(record) | Self::Update(record) => record,
        }
    }

    pub fn into_record(self) -> UserRecord {
        match self {
            Self::Create(record) | Self::Update(record) => record,
        }
    }

    pub fn is_update(&self) -> bool {
        matches!(self, Self::Update(_))
    }
}

/// Submit attempt blocked by failing fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRejected {
    /// Failing fields in form order; never empty.
    pub errors: Vec<FieldError>,
}

impl SubmitRejected {
    pub fn has_error(&self, field: UserField) -> bool {
        self.errors.iter().any(|err| err.field == field)
    }
}

impl Display for SubmitRejected {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "form has {} invalid field(s):", self.errors.len())?;
        for err in &self.errors {
            write!(f, " {}={}", err.field, err.kind.code())?;
        }
        Ok(())
    }
}

impl Error for SubmitRejected {}

/// Owns the active form snapshot for one page session.
#[derive(Debug)]
pub struct FormController<S: IdSource = RandomIds> {
    state: FormState,
    revision: u64,
    ids: S,
}

impl FormController<RandomIds> {
    /// Creates a controller drawing random ids.
    pub fn new() -> Self {
        Self::with_id_source(RandomIds)
    }
}

impl Default for FormController<RandomIds> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: IdSource> FormController<S> {
    pub fn with_id_source(ids: S) -> Self {
        Self {
            state: FormState::empty(),
            revision: 0,
            ids,
        }
    }

    /// Current snapshot.
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Number of snapshots replaced so far; renderers compare it to skip work.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Updates one value; touched flags stay as they are.
    pub fn set_field(&mut self, field: UserField, value: impl Into<String>) -> &FormState {
        let next = self.state.with_value(field, value);
        self.replace(next)
    }

    /// Marks one field touched (blur).
    pub fn touch_field(&mut self, field: UserField) -> &FormState {
        let next = self.state.with_touched(field);
        self.replace(next)
    }

    /// Overwrites the form with `record` and targets it for update.
    ///
    /// # Errors
    /// - Returns `NilId` when the record has no usable identity.
    pub fn begin_edit(&mut self, record: &UserRecord) -> Result<&FormState, UserValidationError> {
        if record.id.is_nil() {
            return Err(UserValidationError::NilId);
        }
        Ok(self.replace(FormState::editing(record)))
    }

    /// Puts back an earlier snapshot, e.g. after a caller failed to apply a
    /// submission.
    pub fn restore(&mut self, state: FormState) -> &FormState {
        self.replace(state)
    }

    /// Leaves edit mode but keeps the draft, e.g. when the target is gone.
    pub fn drop_target(&mut self) -> &FormState {
        let next = self.state.without_editing();
        self.replace(next)
    }

    /// Drops values and editing target.
    pub fn reset(&mut self) -> &FormState {
        self.replace(FormState::empty())
    }

    /// Validates every field and emits the finished record.
    ///
    /// # Errors
    /// - Returns `SubmitRejected` when any field fails; all fields become
    ///   touched and no id is consumed.
    pub fn submit(&mut self) -> Result<Submission, SubmitRejected> {
        let values = self.state.values().clone();
        let age = parse_age(&values.age);
        let errors: Vec<FieldError> = [
            validate_field(UserField::Name, &values.name).err(),
            age.err().map(|kind| FieldError::new(UserField::Age, kind)),
            validate_field(UserField::Avatar, &values.avatar).err(),
        ]
        .into_iter()
        .flatten()
        .collect();
        let age = match age {
            Ok(age) if errors.is_empty() => age,
            _ => {
                let touched = self.state.with_all_touched();
                self.replace(touched);
                return Err(SubmitRejected { errors });
            }
        };

        let submission = match self.state.editing_target() {
            Some(id) => Submission::Update(build_record(id, values.name, age, values.avatar)),
            None => {
                let id = self.ids.next_id();
                Submission::Create(build_record(id, values.name, age, values.avatar))
            }
        };

        self.replace(FormState::empty());
        Ok(submission)
    }

    fn replace(&mut self, next: FormState) -> &FormState {
        self.state = next;
        self.revision += 1;
        &self.state
    }
}

// Every field has passed its rule and `id` is non-nil by construction.
fn build_record(id: UserId, name: String, age: f64, avatar: String) -> UserRecord {
    UserRecord {
        id,
        name,
        age,
        avatar,
    }
}

#[cfg(test)]
mod tests {
    use super::{FormController, Submission};
    use crate::model::id::{SequentialIds, UserId};
    use crate::model::user::{UserFields, UserRecord};
    use crate::validation::{FieldErrorKind, UserField};

    fn filled(controller: &mut FormController<SequentialIds>, name: &str, age: &str, avatar: &str) {
        controller.set_field(UserField::Name, name);
        controller.set_field(UserField::Age, age);
        controller.set_field(UserField::Avatar, avatar);
    }

    #[test]
    fn rejected_submit_touches_every_field_and_keeps_values() {
        let mut controller = FormController::with_id_source(SequentialIds::new());
        filled(&mut controller, "Al", "25", "https://x.com/a.png");

        let rejected = controller.submit().unwrap_err();
        assert_eq!(rejected.errors.len(), 1);
        assert_eq!(rejected.errors[0].kind, FieldErrorKind::TooShort);
        assert!(UserField::ALL
            .into_iter()
            .all(|field| controller.state().is_touched(field)));
        assert_eq!(controller.state().value(UserField::Name), "Al");
        assert!(controller.state().visible_error(UserField::Name).is_some());
    }

    #[test]
    fn rejected_submit_does_not_consume_an_id() {
        let mut controller = FormController::with_id_source(SequentialIds::new());
        controller.submit().unwrap_err();
        filled(&mut controller, "Alice", "30", "https://x.com/a.png");

        let submission = controller.submit().unwrap();
        assert_eq!(submission.record().id, UserId::from_u128(1));
    }

    #[test]
    fn age_is_checked_once_and_fractions_pass() {
        let mut controller = FormController::with_id_source(SequentialIds::new());
        filled(&mut controller, "Alice", "0.5", "https://x.com/a.png");

        let rejected = controller.submit().unwrap_err();
        assert_eq!(rejected.errors.len(), 1);
        assert_eq!(rejected.errors[0].field, UserField::Age);
        assert_eq!(rejected.errors[0].kind, FieldErrorKind::NotPositive);
        assert!(UserField::ALL
            .into_iter()
            .all(|field| controller.state().is_touched(field)));

        controller.set_field(UserField::Age, " 2.5 ");
        let submission = controller.submit().unwrap();
        assert_eq!(submission.record().age, 2.5);
        assert_eq!(submission.record().id, UserId::from_u128(1));
    }

    #[test]
    fn begin_edit_does_not_touch_and_switches_label() {
        let mut controller = FormController::with_id_source(SequentialIds::new());
        let record = UserRecord::with_id(
            UserId::from_u128(5),
            UserFields::new("Bob", 20, "https://x.com/b.png"),
        )
        .unwrap();

        let state = controller.begin_edit(&record).unwrap();
        assert_eq!(state.submit_label(), "Update");
        assert_eq!(state.value(UserField::Age), "20");
        assert!(UserField::ALL.into_iter().all(|f| !state.is_touched(f)));

        controller.set_field(UserField::Name, "Bobby");
        let submission = controller.submit().unwrap();
        assert!(matches!(submission, Submission::Update(ref r) if r.id == record.id));
        assert_eq!(controller.state().editing_target(), None);
        assert_eq!(controller.state().submit_label(), "Save");
    }

    #[test]
    fn revision_grows_on_every_transition() {
        let mut controller = FormController::new();
        assert_eq!(controller.revision(), 0);
        controller.set_field(UserField::Name, "x");
        controller.touch_field(UserField::Name);
        controller.reset();
        assert_eq!(controller.revision(), 3);
    }
}
