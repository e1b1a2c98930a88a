//! Field rules for the user form.
//!
//! # Responsibility
//! - Validate raw form text for `name`, `age` and `avatar`.
//! - Map each failure to a stable code and a user-facing message.
//!
//! # Invariants
//! - Rules are pure functions of one field value; no rule reads another field.
//! - `REQUIRED` is reserved for empty input; whitespace is not trimmed away
//!   for `name` and `avatar`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Minimum display name length, counted in characters.
pub const NAME_MIN_CHARS: usize = 3;
/// Smallest accepted age.
pub const AGE_MIN: f64 = 1.0;

static AVATAR_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:https?|ftp)://(?:[^\s:@/]+(?::[^\s@/]*)?@)?(?:localhost|(?:(?:25[0-5]|2[0-4]\d|1?\d?\d)\.){3}(?:25[0-5]|2[0-4]\d|1?\d?\d)|(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,63})(?::\d{1,5})?(?:[/?#]\S*)?$",
    )
    .expect("valid avatar url regex")
});

/// Editable user fields, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserField {
    Name,
    Age,
    Avatar,
}

impl UserField {
    /// All fields in display order.
    pub const ALL: [UserField; 3] = [UserField::Name, UserField::Age, UserField::Avatar];

    /// Stable input name used by UI layers.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Age => "age",
            Self::Avatar => "avatar",
        }
    }

    /// Human-readable input label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Age => "Age",
            Self::Avatar => "Avatar URL",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Name => 0,
            Self::Age => 1,
            Self::Avatar => 2,
        }
    }
}

impl Display for UserField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown field name passed by a UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl Display for UnknownField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown form field `{}`; expected name|age|avatar", self.0)
    }
}

impl Error for UnknownField {}

impl FromStr for UserField {
    type Err = UnknownField;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "age" => Ok(Self::Age),
            "avatar" => Ok(Self::Avatar),
            other => Err(UnknownField(other.to_string())),
        }
    }
}

/// Kind of per-field validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldErrorKind {
    Required,
    TooShort,
    NotANumber,
    NotPositive,
    InvalidUrl,
}

impl FieldErrorKind {
    /// Stable machine-readable code.
    pub fn code(self) -> &'static str {
        match self {
            Self::Required => "REQUIRED",
            Self::TooShort => "TOO_SHORT",
            Self::NotANumber => "NOT_A_NUMBER",
            Self::NotPositive => "NOT_POSITIVE",
            Self::InvalidUrl => "INVALID_URL",
        }
    }
}

/// One field failing one rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldError {
    pub field: UserField,
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn new(field: UserField, kind: FieldErrorKind) -> Self {
        Self { field, kind }
    }

    /// Inline message rendered beneath the input.
    pub fn message(&self) -> &'static str {
        match (self.field, self.kind) {
            (UserField::Name, FieldErrorKind::Required) => "Name is required",
            (UserField::Name, FieldErrorKind::TooShort) => "Name must be at least 3 characters",
            (UserField::Age, FieldErrorKind::Required) => "Age is required",
            (UserField::Age, FieldErrorKind::NotPositive) => "Age must be greater than 0",
            (UserField::Age, FieldErrorKind::NotANumber) => "Age must be a number",
            (UserField::Avatar, FieldErrorKind::Required) => "Avatar URL is required",
            (UserField::Avatar, FieldErrorKind::InvalidUrl) => "Enter a valid URL",
            // Kinds are only produced by their own field's rule.
            (_, kind) => kind.code(),
        }
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl Error for FieldError {}

/// Validates raw display name text.
pub fn validate_name(value: &str) -> Result<(), FieldErrorKind> {
    if value.is_empty() {
        return Err(FieldErrorKind::Required);
    }
    if value.chars().count() < NAME_MIN_CHARS {
        return Err(FieldErrorKind::TooShort);
    }
    Ok(())
}

/// Parses raw age text the way a numeric input reads it.
///
/// Decimals and exponents are numbers; `inf` and `NaN` are not.
pub fn parse_age(value: &str) -> Result<f64, FieldErrorKind> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FieldErrorKind::Required);
    }
    let parsed = trimmed
        .parse::<f64>()
        .map_err(|_| FieldErrorKind::NotANumber)?;
    check_age(parsed)?;
    Ok(parsed)
}

/// Checks an already numeric age.
pub fn check_age(age: f64) -> Result<(), FieldErrorKind> {
    if !age.is_finite() {
        return Err(FieldErrorKind::NotANumber);
    }
    if age < AGE_MIN {
        return Err(FieldErrorKind::NotPositive);
    }
    Ok(())
}

/// Validates raw age text.
pub fn validate_age(value: &str) -> Result<(), FieldErrorKind> {
    parse_age(value).map(|_| ())
}

/// Validates raw avatar URL text.
pub fn validate_avatar(value: &str) -> Result<(), FieldErrorKind> {
    if value.is_empty() {
        return Err(FieldErrorKind::Required);
    }
    if !AVATAR_URL_RE.is_match(value) {
        return Err(FieldErrorKind::InvalidUrl);
    }
    Ok(())
}

/// Runs the rule for `field` against raw text.
pub fn validate_field(field: UserField, value: &str) -> Result<(), FieldError> {
    let outcome = match field {
        UserField::Name => validate_name(value),
        UserField::Age => validate_age(value),
        UserField::Avatar => validate_avatar(value),
    };
    outcome.map_err(|kind| FieldError::new(field, kind))
}

#[cfg(test)]
mod tests {
    use super::{
        check_age, parse_age, validate_age, validate_avatar, validate_field, validate_name,
        FieldError, FieldErrorKind, UserField,
    };

    #[test]
    fn short_names_fail_and_empty_is_required() {
        assert_eq!(validate_name(""), Err(FieldErrorKind::Required));
        assert_eq!(validate_name("  "), Err(FieldErrorKind::TooShort));
        assert_eq!(validate_name("   "), Ok(()));
        assert_eq!(validate_name("A"), Err(FieldErrorKind::TooShort));
        assert_eq!(validate_name("Al"), Err(FieldErrorKind::TooShort));
        assert_eq!(validate_name("Ali"), Ok(()));
    }

    #[test]
    fn name_length_counts_characters_not_bytes() {
        assert_eq!(validate_name("Zoë"), Ok(()));
        assert_eq!(validate_name("éé"), Err(FieldErrorKind::TooShort));
    }

    #[test]
    fn age_rules_cover_each_kind() {
        assert_eq!(validate_age(""), Err(FieldErrorKind::Required));
        assert_eq!(validate_age("abc"), Err(FieldErrorKind::NotANumber));
        assert_eq!(validate_age("inf"), Err(FieldErrorKind::NotANumber));
        assert_eq!(validate_age("NaN"), Err(FieldErrorKind::NotANumber));
        assert_eq!(validate_age("0"), Err(FieldErrorKind::NotPositive));
        assert_eq!(validate_age("0.5"), Err(FieldErrorKind::NotPositive));
        assert_eq!(validate_age("-4"), Err(FieldErrorKind::NotPositive));
        assert_eq!(parse_age(" 42 "), Ok(42.0));
        assert_eq!(parse_age("1"), Ok(1.0));
    }

    #[test]
    fn decimal_and_large_ages_are_numbers() {
        assert_eq!(parse_age("2.5"), Ok(2.5));
        assert_eq!(parse_age("30.0"), Ok(30.0));
        assert_eq!(parse_age("1e2"), Ok(100.0));
        assert_eq!(parse_age("4294967296"), Ok(4_294_967_296.0));
        assert_eq!(check_age(f64::NAN), Err(FieldErrorKind::NotANumber));
        assert_eq!(check_age(0.99), Err(FieldErrorKind::NotPositive));
    }

    #[test]
    fn avatar_accepts_absolute_urls_only() {
        for ok in [
            "https://x.com/a.png",
            "http://localhost:8080/avatar",
            "ftp://files.example.org/u/1.jpg",
            "https://192.168.0.1/a.png?size=64#top",
            "HTTPS://CDN.Example.COM/A.PNG",
        ] {
            assert_eq!(validate_avatar(ok), Ok(()), "{ok}");
        }
        for bad in [
            "x.com/a.png",
            "not a url",
            "https://",
            "https://exa mple.com/a.png",
            "mailto:someone@example.com",
            "/relative/path.png",
            "https://300.1.1.1/a.png",
        ] {
            assert_eq!(validate_avatar(bad), Err(FieldErrorKind::InvalidUrl), "{bad}");
        }
        assert_eq!(validate_avatar(""), Err(FieldErrorKind::Required));
        assert_eq!(validate_avatar(" "), Err(FieldErrorKind::InvalidUrl));
    }

    #[test]
    fn field_dispatch_attaches_field_and_message() {
        let err = validate_field(UserField::Age, "0").unwrap_err();
        assert_eq!(err, FieldError::new(UserField::Age, FieldErrorKind::NotPositive));
        assert_eq!(err.to_string(), "Age must be greater than 0");
        assert_eq!(err.kind.code(), "NOT_POSITIVE");
    }

    #[test]
    fn field_names_parse_case_insensitively() {
        assert_eq!("Avatar".parse::<UserField>().unwrap(), UserField::Avatar);
        let err = "email".parse::<UserField>().unwrap_err();
        assert!(err.to_string().contains("email"));
    }
}
