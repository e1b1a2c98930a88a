//! Page session use-case service.
//!
//! # Responsibility
//! - Own one record store and one form controller for a page session.
//! - Map UI events (change, blur, submit, edit, remove) onto them.
//! - Report store failures as internal errors, distinct from validation.
//!
//! # Invariants
//! - A rejected or failed submit never mutates the store.
//! - When the store refuses a submission the form keeps the user's input.
//! - Removing the record under edit clears the editing target and keeps the
//!   draft.

use crate::form::controller::{FormController, Submission, SubmitRejected};
use crate::form::state::FormState;
use crate::model::id::{IdSource, RandomIds, UserId};
use crate::model::user::UserRecord;
use crate::store::user_store::{InMemoryUserStore, StoreError, UserRepository};
use crate::validation::UserField;
use crate::view::page::{render_page, PageView};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Notification text shown after a successful submit.
pub const SUBMIT_SUCCESS_MESSAGE: &str = "Form submitted successfully!";

/// Errors surfaced to the UI by session event handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Input failed field rules; errors are now visible inline.
    Rejected(SubmitRejected),
    /// Store refused an operation the UI expected to succeed.
    Internal(StoreError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rejected(err) => write!(f, "{err}"),
            Self::Internal(err) => write!(f, "internal error ({}): {err}", err.code()),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Rejected(err) => Some(err),
            Self::Internal(err) => Some(err),
        }
    }
}

impl From<SubmitRejected> for SessionError {
    fn from(value: SubmitRejected) -> Self {
        Self::Rejected(value)
    }
}

impl From<StoreError> for SessionError {
    fn from(value: StoreError) -> Self {
        Self::Internal(value)
    }
}

/// What a successful submit did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitKind {
    Created,
    Updated,
}

/// Confirmation for a successful submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitNotice {
    pub message: &'static str,
    pub id: UserId,
    pub kind: SubmitKind,
}

/// One page session: form plus user list.
#[derive(Debug)]
pub struct UserFormSession<R: UserRepository = InMemoryUserStore, S: IdSource = RandomIds> {
    store: R,
    form: FormController<S>,
}

impl UserFormSession<InMemoryUserStore, RandomIds> {
    /// Empty in-memory session with random ids.
    pub fn new() -> Self {
        Self::with_parts(InMemoryUserStore::new(), RandomIds)
    }
}

impl Default for UserFormSession<InMemoryUserStore, RandomIds> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: UserRepository, S: IdSource> UserFormSession<R, S> {
    pub fn with_parts(store: R, ids: S) -> Self {
        Self {
            store,
            form: FormController::with_id_source(ids),
        }
    }

    pub fn store(&self) -> &R {
        &self.store
    }

    pub fn form(&self) -> &FormState {
        self.form.state()
    }

    /// Current ordered users.
    pub fn users(&self) -> &[UserRecord] {
        self.store.list()
    }

    /// Combined form/store revision, bumped whenever the page may change.
    pub fn revision(&self) -> u64 {
        self.form.revision() + self.store.revision()
    }

    /// Input change event.
    pub fn change(&mut self, field: UserField, value: impl Into<String>) -> &FormState {
        self.form.set_field(field, value)
    }

    /// Input blur event.
    pub fn blur(&mut self, field: UserField) -> &FormState {
        self.form.touch_field(field)
    }

    /// Submit click: validate, then create or update in the store.
    ///
    /// # Errors
    /// - `Rejected` when any field fails; nothing is stored.
    /// - `Internal` when the store refuses the record; the form is restored.
    pub fn submit(&mut self) -> Result<SubmitNotice, SessionError> {
        let before = self.form.state().clone();
        let submission = self.form.submit().map_err(|rejected| {
            info!(
                "event=submit_rejected module=session status=rejected fields={}",
                rejected
                    .errors
                    .iter()
                    .map(|err| format!("{}:{}", err.field, err.kind.code()))
                    .collect::<Vec<_>>()
                    .join(",")
            );
            rejected
        })?;

        let applied = match submission {
            Submission::Create(record) => {
                self.store.add(record).map(|id| (id, SubmitKind::Created))
            }
            Submission::Update(record) => {
                let id = record.id;
                self.store
                    .edit(id, record.fields())
                    .map(|()| (id, SubmitKind::Updated))
            }
        };

        match applied {
            Ok((id, kind)) => {
                let event = match kind {
                    SubmitKind::Created => "user_added",
                    SubmitKind::Updated => "user_edited",
                };
                info!(
                    "event={} module=session status=ok user_id={} total={}",
                    event,
                    id,
                    self.store.list().len()
                );
                Ok(SubmitNotice {
                    message: SUBMIT_SUCCESS_MESSAGE,
                    id,
                    kind,
                })
            }
            Err(err) => {
                self.form.restore(before);
                Err(self.internal(err, "submit"))
            }
        }
    }

    /// Edit click: seed the form from the stored record.
    ///
    /// # Errors
    /// - `Internal(NotFound)` when the id is not in the store.
    pub fn edit(&mut self, id: UserId) -> Result<&FormState, SessionError> {
        let Some(record) = self.store.get(id).cloned() else {
            return Err(self.internal(StoreError::NotFound(id), "edit"));
        };
        let seeded = self.form.begin_edit(&record).map(|_| ());
        if let Err(err) = seeded {
            return Err(self.internal(StoreError::Validation(err), "edit"));
        }
        Ok(self.form.state())
    }

    /// Abandons the current edit or draft.
    pub fn cancel_edit(&mut self) -> &FormState {
        self.form.reset()
    }

    /// Remove click.
    ///
    /// # Errors
    /// - `Internal(NotFound)` when the id is not in the store.
    pub fn remove(&mut self, id: UserId) -> Result<UserRecord, SessionError> {
        let removed = match self.store.remove(id) {
            Ok(record) => record,
            Err(err) => return Err(self.internal(err, "remove")),
        };

        if self.form.state().editing_target() == Some(id) {
            self.form.drop_target();
        }
        info!(
            "event=user_removed module=session status=ok user_id={} total={}",
            id,
            self.store.list().len()
        );
        Ok(removed)
    }

    /// Renders the current page.
    pub fn page(&self) -> PageView {
        render_page(self.form.state(), self.store.list())
    }

    fn internal(&self, err: StoreError, op: &'static str) -> SessionError {
        error!(
            "event=store_error module=session status=error op={} code={} detail={}",
            op,
            err.code(),
            err
        );
        SessionError::Internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::{SessionError, SubmitKind, UserFormSession};
    use crate::model::id::{SequentialIds, UserId};
    use crate::model::user::{UserFields, UserRecord};
    use crate::store::user_store::{InMemoryUserStore, UserRepository};
    use crate::validation::UserField;

    fn session_with(ids: &[u128]) -> UserFormSession<InMemoryUserStore, SequentialIds> {
        let records = ids.iter().map(|id| {
            UserRecord::with_id(
                UserId::from_u128(*id),
                UserFields::new(format!("User{id}"), 20, "https://x.com/u.png"),
            )
            .unwrap()
        });
        let store = InMemoryUserStore::with_records(records).unwrap();
        UserFormSession::with_parts(store, SequentialIds::starting_at(100))
    }

    #[test]
    fn colliding_id_is_internal_error_and_form_survives() {
        let mut session = UserFormSession::with_parts(
            InMemoryUserStore::with_records([UserRecord::with_id(
                UserId::from_u128(1),
                UserFields::new("Taken", 9, "https://x.com/t.png"),
            )
            .unwrap()])
            .unwrap(),
            SequentialIds::new(),
        );
        session.change(UserField::Name, "Alice");
        session.change(UserField::Age, "30");
        session.change(UserField::Avatar, "https://x.com/a.png");

        let err = session.submit().unwrap_err();
        assert!(matches!(err, SessionError::Internal(ref e) if e.code() == "DUPLICATE_ID"));
        assert_eq!(session.form().value(UserField::Name), "Alice");
        assert_eq!(session.users().len(), 1);

        let notice = session.submit().unwrap();
        assert_eq!(notice.kind, SubmitKind::Created);
        assert_eq!(notice.id, UserId::from_u128(2));
    }

    #[test]
    fn removing_record_under_edit_keeps_draft() {
        let mut session = session_with(&[1, 2]);
        session.edit(UserId::from_u128(2)).unwrap();
        session.change(UserField::Name, "Renamed");
        session.blur(UserField::Name);
        assert!(session.form().is_editing());

        session.remove(UserId::from_u128(2)).unwrap();
        assert!(!session.form().is_editing());
        assert_eq!(session.form().submit_label(), "Save");
        assert_eq!(session.form().value(UserField::Name), "Renamed");
        assert_eq!(session.form().value(UserField::Age), "20");
        assert!(session.form().is_touched(UserField::Name));

        let notice = session.submit().unwrap();
        assert_eq!(notice.kind, SubmitKind::Created);
        assert_eq!(notice.id, UserId::from_u128(100));
        assert_eq!(session.users().len(), 2);
    }

    #[test]
    fn removing_another_record_keeps_edit_target() {
        let mut session = session_with(&[1, 2]);
        session.edit(UserId::from_u128(2)).unwrap();
        session.remove(UserId::from_u128(1)).unwrap();
        assert_eq!(session.form().editing_target(), Some(UserId::from_u128(2)));
    }

    #[test]
    fn edit_unknown_id_is_internal_error() {
        let mut session = session_with(&[1]);
        let err = session.edit(UserId::from_u128(42)).unwrap_err();
        assert!(matches!(err, SessionError::Internal(ref e) if e.code() == "NOT_FOUND"));
        assert!(!session.form().is_editing());
    }

    #[test]
    fn revision_moves_with_store_and_form() {
        let mut session = session_with(&[]);
        let start = session.revision();
        session.change(UserField::Name, "Ann");
        assert!(session.revision() > start);
        assert_eq!(session.store().revision(), 0);
    }
}
