//! Form + card list page projection.

use crate::form::state::FormState;
use crate::model::id::UserId;
use crate::model::user::UserRecord;
use crate::validation::UserField;
use serde::Serialize;
use std::fmt::{Display, Formatter};

pub const FORM_TITLE: &str = "User Form";
pub const LIST_TITLE: &str = "Users List";

/// Input widget kind for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Text,
    Number,
}

/// One labelled input with its inline error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub field: UserField,
    pub label: &'static str,
    pub input: InputKind,
    pub placeholder: &'static str,
    pub value: String,
    /// Present only for touched, failing fields.
    pub error: Option<&'static str>,
}

/// The create/edit form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    pub title: &'static str,
    pub fields: Vec<FieldView>,
    pub submit_label: &'static str,
    pub editing: Option<UserId>,
}

/// Action control on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardAction {
    Edit,
    Remove,
}

impl CardAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::Edit => "Edit",
            Self::Remove => "Remove",
        }
    }
}

/// One user card in the list grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserCard {
    pub id: UserId,
    pub avatar_src: String,
    pub avatar_alt: String,
    pub name: String,
    pub age_label: String,
    pub actions: [CardAction; 2],
}

/// Whole page for one render pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub form: FormView,
    pub list_title: &'static str,
    pub cards: Vec<UserCard>,
}

/// Projects form and list snapshots into a page.
pub fn render_page(form: &FormState, users: &[UserRecord]) -> PageView {
    PageView {
        form: render_form(form),
        list_title: LIST_TITLE,
        cards: users.iter().map(render_card).collect(),
    }
}

fn render_form(state: &FormState) -> FormView {
    let fields = UserField::ALL
        .into_iter()
        .map(|field| FieldView {
            field,
            label: field.label(),
            input: input_kind(field),
            placeholder: placeholder(field),
            value: state.value(field).to_string(),
            error: state.visible_error(field).map(|err| err.message()),
        })
        .collect();

    FormView {
        title: FORM_TITLE,
        fields,
        submit_label: state.submit_label(),
        editing: state.editing_target(),
    }
}

fn render_card(user: &UserRecord) -> UserCard {
    UserCard {
        id: user.id,
        avatar_src: user.avatar.clone(),
        avatar_alt: user.name.clone(),
        name: user.name.clone(),
        age_label: format!("Age: {}", user.age),
        actions: [CardAction::Edit, CardAction::Remove],
    }
}

fn input_kind(field: UserField) -> InputKind {
    match field {
        UserField::Age => InputKind::Number,
        UserField::Name | UserField::Avatar => InputKind::Text,
    }
}

fn placeholder(field: UserField) -> &'static str {
    match field {
        UserField::Name => "Enter name..",
        UserField::Age => "Enter age...",
        UserField::Avatar => "Enter avatar images URL...",
    }
}

impl Display for PageView {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "== {} ==", self.form.title)?;
        for field in &self.form.fields {
            let shown = if field.value.is_empty() {
                format!("<{}>", field.placeholder)
            } else {
                field.value.clone()
            };
            writeln!(f, "{:<11} {}", format!("{}:", field.label), shown)?;
            if let Some(error) = field.error {
                writeln!(f, "            ! {error}")?;
            }
        }
        writeln!(f, "[{}]", self.form.submit_label)?;
        writeln!(f)?;
        writeln!(f, "== {} ==", self.list_title)?;
        if self.cards.is_empty() {
            writeln!(f, "(no users)")?;
        }
        for card in &self.cards {
            let actions = card
                .actions
                .iter()
                .map(|action| format!("[{}]", action.label()))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(
                f,
                "* {} | {} | {} | {} {}",
                card.id, card.name, card.age_label, card.avatar_src, actions
            )?;
        }
        Ok(())
    }
}
