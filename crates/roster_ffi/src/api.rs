//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose page-session events (change, blur, submit, edit, remove) to Dart.
//! - Flatten core snapshots into plain DTOs the UI can render directly.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Failures come back as `ok = false` envelopes with a readable message.
//! - Each `SessionHandle` owns its own store; there is no process-wide roster.

use log::warn;
use roster_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    FieldView, IdSource, InMemoryUserStore, PageView, RandomIds, SequentialIds, SessionError,
    UserField, UserFormSession, UserId,
};
use std::sync::{Mutex, MutexGuard};

type BoxedIds = Box<dyn IdSource + Send>;
type Session = UserFormSession<InMemoryUserStore, BoxedIds>;

/// Opaque page session owned by the Dart side.
pub struct SessionHandle {
    session: Mutex<Session>,
}

impl SessionHandle {
    fn lock(&self) -> MutexGuard<'_, Session> {
        // A panic inside a previous call leaves the data consistent: every core
        // operation validates before mutating.
        self.session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One form input as rendered by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFieldItem {
    /// Input name (`name|age|avatar`).
    pub name: String,
    pub label: String,
    /// `text` or `number`.
    pub input: String,
    pub placeholder: String,
    pub value: String,
    /// Inline error, only for touched failing fields.
    pub error: Option<String>,
}

/// Form snapshot envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    pub fields: Vec<FormFieldItem>,
    /// `Save` or `Update`.
    pub submit_label: String,
    /// Id of the record under edit, if any.
    pub editing_id: Option<String>,
    /// Empty on success; describes rejected input such as an unknown field.
    pub message: String,
}

/// One user card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCardItem {
    pub user_id: String,
    pub name: String,
    pub age_label: String,
    pub avatar_url: String,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    /// Affected user id, when one exists.
    pub user_id: Option<String>,
    /// Human-readable message for notifications and diagnostics.
    pub message: String,
    /// `validation` for rejected input, `internal` for store failures.
    pub error_kind: Option<String>,
}

impl ActionResponse {
    fn success(message: impl Into<String>, user_id: UserId) -> Self {
        Self {
            ok: true,
            user_id: Some(user_id.to_string()),
            message: message.into(),
            error_kind: None,
        }
    }

    fn failure(kind: &str, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            user_id: None,
            message: message.into(),
            error_kind: Some(kind.to_string()),
        }
    }

    fn from_session_error(op: &str, err: &SessionError) -> Self {
        match err {
            SessionError::Rejected(rejected) => {
                Self::failure("validation", format!("{op} rejected: {rejected}"))
            }
            SessionError::Internal(_) => Self::failure("internal", format!("{op} failed: {err}")),
        }
    }
}

/// Opens a new empty page session.
///
/// `sequential_ids` switches to deterministic counter ids for demos and
/// golden tests.
#[flutter_rust_bridge::frb(sync)]
pub fn session_open(sequential_ids: bool) -> SessionHandle {
    let ids: BoxedIds = if sequential_ids {
        Box::new(SequentialIds::new())
    } else {
        Box::new(RandomIds)
    };
    SessionHandle {
        session: Mutex::new(UserFormSession::with_parts(InMemoryUserStore::new(), ids)),
    }
}

/// Input change event.
#[flutter_rust_bridge::frb(sync)]
pub fn form_set_field(handle: &SessionHandle, field: String, value: String) -> FormSnapshot {
    let mut session = handle.lock();
    match field.parse::<UserField>() {
        Ok(field) => {
            session.change(field, value);
            form_snapshot_of(&session.page(), String::new())
        }
        Err(err) => form_snapshot_of(&session.page(), err.to_string()),
    }
}

/// Input blur event.
#[flutter_rust_bridge::frb(sync)]
pub fn form_touch_field(handle: &SessionHandle, field: String) -> FormSnapshot {
    let mut session = handle.lock();
    match field.parse::<UserField>() {
        Ok(field) => {
            session.blur(field);
            form_snapshot_of(&session.page(), String::new())
        }
        Err(err) => form_snapshot_of(&session.page(), err.to_string()),
    }
}

/// Current form without changing it.
#[flutter_rust_bridge::frb(sync)]
pub fn form_snapshot(handle: &SessionHandle) -> FormSnapshot {
    form_snapshot_of(&handle.lock().page(), String::new())
}

/// Submit click. On success `message` is the confirmation notification.
#[flutter_rust_bridge::frb(sync)]
pub fn form_submit(handle: &SessionHandle) -> ActionResponse {
    match handle.lock().submit() {
        Ok(notice) => ActionResponse::success(notice.message, notice.id),
        Err(err) => ActionResponse::from_session_error("form_submit", &err),
    }
}

/// Edit click on a card.
#[flutter_rust_bridge::frb(sync)]
pub fn form_begin_edit(handle: &SessionHandle, user_id: String) -> ActionResponse {
    let id = match parse_user_id(&user_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match handle.lock().edit(id) {
        Ok(_) => ActionResponse::success("Editing user.", id),
        Err(err) => ActionResponse::from_session_error("form_begin_edit", &err),
    }
}

/// Leaves edit mode and clears the form.
#[flutter_rust_bridge::frb(sync)]
pub fn form_cancel_edit(handle: &SessionHandle) -> FormSnapshot {
    let mut session = handle.lock();
    session.cancel_edit();
    form_snapshot_of(&session.page(), String::new())
}

/// Remove click on a card.
#[flutter_rust_bridge::frb(sync)]
pub fn user_remove(handle: &SessionHandle, user_id: String) -> ActionResponse {
    let id = match parse_user_id(&user_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match handle.lock().remove(id) {
        Ok(_) => ActionResponse::success("User removed.", id),
        Err(err) => ActionResponse::from_session_error("user_remove", &err),
    }
}

/// Cards in store order.
#[flutter_rust_bridge::frb(sync)]
pub fn users_list(handle: &SessionHandle) -> Vec<UserCardItem> {
    handle
        .lock()
        .page()
        .cards
        .into_iter()
        .map(|card| UserCardItem {
            user_id: card.id.to_string(),
            name: card.name,
            age_label: card.age_label,
            avatar_url: card.avatar_src,
        })
        .collect()
}

fn parse_user_id(raw: &str) -> Result<UserId, ActionResponse> {
    raw.parse::<UserId>().map_err(|err| {
        warn!("event=ffi_bad_user_id module=ffi status=rejected detail={err}");
        ActionResponse::failure("validation", format!("invalid user id `{}`: {err}", raw.trim()))
    })
}

fn form_snapshot_of(page: &PageView, message: String) -> FormSnapshot {
    FormSnapshot {
        fields: page.form.fields.iter().map(to_form_field_item).collect(),
        submit_label: page.form.submit_label.to_string(),
        editing_id: page.form.editing.map(|id| id.to_string()),
        message,
    }
}

fn to_form_field_item(field: &FieldView) -> FormFieldItem {
    FormFieldItem {
        name: field.field.as_str().to_string(),
        label: field.label.to_string(),
        input: match field.input {
            roster_core::InputKind::Text => "text",
            roster_core::InputKind::Number => "number",
        }
        .to_string(),
        placeholder: field.placeholder.to_string(),
        value: field.value.clone(),
        error: field.error.map(str::to_string),
    }
}
