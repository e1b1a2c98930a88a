//! Terminal front end for the roster user form.
//!
//! # Responsibility
//! - Replay form/list events typed on stdin against one in-memory session.
//! - Print the rendered page after every change.

mod command;
mod repl;

use anyhow::Context;
use clap::Parser;
use roster_core::{
    default_log_level, init_logging, IdSource, InMemoryUserStore, RandomIds, SequentialIds,
    UserFormSession,
};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Create, edit and remove users through a validated form", long_about = None)]
#[command(version)]
struct Cli {
    /// Absolute directory for rolling log files; logging is off when omitted.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, requires = "log_dir")]
    log_level: Option<String>,

    /// Use counter ids (...0001, ...0002) instead of random UUIDs.
    #[arg(long)]
    sequential_ids: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if let Some(dir) = &cli.log_dir {
        let dir = dir.to_str().context("--log-dir must be valid UTF-8")?;
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, dir)
            .map_err(|err| anyhow::anyhow!("failed to initialize logging: {err}"))?;
    }

    let ids: Box<dyn IdSource> = if cli.sequential_ids {
        Box::new(SequentialIds::new())
    } else {
        Box::new(RandomIds)
    };
    let mut session = UserFormSession::with_parts(InMemoryUserStore::new(), ids);
    log::info!(
        "event=cli_start module=cli status=ok sequential_ids={}",
        cli.sequential_ids
    );

    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    repl::run(&mut session, stdin.lock(), &mut out).context("terminal session failed")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;

    #[test]
    fn log_level_needs_log_dir() {
        assert!(Cli::try_parse_from(["roster", "--log-level", "info"]).is_err());

        let cli =
            Cli::try_parse_from(["roster", "--log-dir", "/tmp/roster", "--log-level", "info"])
                .unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("info"));
        assert!(!cli.sequential_ids);
    }
}
