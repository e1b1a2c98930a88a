//! Core domain logic for the roster user form.
//! This crate is the single source of truth for user record invariants.

pub mod form;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;
pub mod validation;
pub mod view;

pub use form::controller::{FormController, Submission, SubmitRejected};
pub use form::state::{FormState, FormValues};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::id::{IdSource, RandomIds, SequentialIds, UserId};
pub use model::user::{UserFields, UserRecord, UserValidationError};
pub use service::session::{
    SessionError, SubmitKind, SubmitNotice, UserFormSession, SUBMIT_SUCCESS_MESSAGE,
};
pub use store::user_store::{
    InMemoryUserStore, StoreAction, StoreError, StoreOutcome, StoreResult, UserRepository,
};
pub use validation::{FieldError, FieldErrorKind, UnknownField, UserField};
pub use view::page::{render_page, CardAction, FieldView, FormView, InputKind, PageView, UserCard};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
