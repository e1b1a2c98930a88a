//! Event loop replaying terminal commands against one page session.

use crate::command::{parse_line, Command, Target, HELP};
use roster_core::{IdSource, SessionError, UserFormSession, UserId, UserRepository};
use std::io::{BufRead, Write};

/// Whether the loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Reads commands until EOF or `quit`, printing the page after each change.
pub fn run<R, S>(
    session: &mut UserFormSession<R, S>,
    input: impl BufRead,
    out: &mut impl Write,
) -> std::io::Result<()>
where
    R: UserRepository,
    S: IdSource,
{
    writeln!(out, "{}", session.page())?;
    for line in input.lines() {
        let line = line?;
        match parse_line(&line) {
            Ok(Some(command)) => {
                if execute(session, command, out)? == Flow::Quit {
                    break;
                }
            }
            Ok(None) => {}
            Err(err) => writeln!(out, "error: {err}")?,
        }
    }
    Ok(())
}

/// Applies one command and prints its outcome.
pub fn execute<R, S>(
    session: &mut UserFormSession<R, S>,
    command: Command,
    out: &mut impl Write,
) -> std::io::Result<Flow>
where
    R: UserRepository,
    S: IdSource,
{
    let before = session.revision();
    match command {
        Command::Set { field, value } => {
            session.change(field, value);
        }
        Command::Blur(field) => {
            session.blur(field);
        }
        Command::Submit => match session.submit() {
            Ok(notice) => writeln!(out, "** {} ** ({})", notice.message, notice.id)?,
            Err(SessionError::Rejected(_)) => writeln!(out, "submit blocked: fix the fields below")?,
            Err(err) => writeln!(out, "error: {err}")?,
        },
        Command::Edit(target) => match resolve(session, target) {
            Some(id) => {
                if let Err(err) = session.edit(id) {
                    writeln!(out, "error: {err}")?;
                }
            }
            None => writeln!(out, "error: no user at {}", describe(target))?,
        },
        Command::Remove(target) => match resolve(session, target) {
            Some(id) => match session.remove(id) {
                Ok(removed) => writeln!(out, "removed {}", removed.name)?,
                Err(err) => writeln!(out, "error: {err}")?,
            },
            None => writeln!(out, "error: no user at {}", describe(target))?,
        },
        Command::Cancel => {
            session.cancel_edit();
        }
        Command::Show => {
            writeln!(out, "{}", session.page())?;
            return Ok(Flow::Continue);
        }
        Command::Help => {
            writeln!(out, "{HELP}")?;
            return Ok(Flow::Continue);
        }
        Command::Quit => return Ok(Flow::Quit),
    }

    if session.revision() != before {
        writeln!(out, "{}", session.page())?;
    }
    Ok(Flow::Continue)
}

fn resolve<R: UserRepository, S: IdSource>(
    session: &UserFormSession<R, S>,
    target: Target,
) -> Option<UserId> {
    match target {
        Target::Id(id) => Some(id),
        Target::Position(n) => session.users().get(n - 1).map(|user| user.id),
    }
}

fn describe(target: Target) -> String {
    match target {
        Target::Id(id) => id.to_string(),
        Target::Position(n) => format!("#{n}"),
    }
}
