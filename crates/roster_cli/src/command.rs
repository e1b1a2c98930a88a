//! Line command parsing for the terminal front end.

use roster_core::{UserField, UserId};
use std::fmt::{Display, Formatter};

pub const HELP: &str = "\
commands:
  set <name|age|avatar> <value>   change a field (value may contain spaces)
  blur <name|age|avatar>          leave a field, showing its error
  submit                          save or update
  edit <id|#n>                    load a user into the form
  remove <id|#n>                  delete a user
  cancel                          clear the form and leave edit mode
  show                            print the page
  help                            this text
  quit                            exit";

/// Card reference: full id or 1-based list position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Id(UserId),
    Position(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set { field: UserField, value: String },
    Blur(UserField),
    Submit,
    Edit(Target),
    Remove(Target),
    Cancel,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError(String);

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ParseError {}

/// Parses one input line. Blank lines and `//` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Command>, ParseError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with("//") {
        return Ok(None);
    }

    let (verb, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim_start()),
        None => (trimmed, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "set" => {
            let (field, value) = match rest.split_once(char::is_whitespace) {
                Some((field, value)) => (field, value.trim()),
                None => (rest, ""),
            };
            Command::Set {
                field: parse_field(field)?,
                value: value.to_string(),
            }
        }
        "blur" => Command::Blur(parse_field(rest)?),
        "submit" | "save" | "update" => Command::Submit,
        "edit" => Command::Edit(parse_target(rest)?),
        "remove" | "rm" => Command::Remove(parse_target(rest)?),
        "cancel" | "reset" => Command::Cancel,
        "show" | "list" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(ParseError(format!("unknown command `{other}`; try `help`"))),
    };
    Ok(Some(command))
}

fn parse_field(raw: &str) -> Result<UserField, ParseError> {
    raw.parse::<UserField>()
        .map_err(|err| ParseError(err.to_string()))
}

fn parse_target(raw: &str) -> Result<Target, ParseError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ParseError("missing user reference (id or #n)".to_string()));
    }
    if let Some(position) = raw.strip_prefix('#') {
        return match position.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(Target::Position(n)),
            _ => Err(ParseError(format!("invalid list position `{raw}`"))),
        };
    }
    raw.parse::<UserId>()
        .map(Target::Id)
        .map_err(|err| ParseError(format!("invalid user id `{raw}`: {err}")))
}
