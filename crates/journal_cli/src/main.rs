//! Command-line front end for the daily journal.
//!
//! # Responsibility
//! - Stand in for the calendar UI: pick a date, show the month, edit text.
//! - Talk to the store only through `FocusSession`.

mod render;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use journal_core::db::open_db;
use journal_core::repo::entry_repo::is_storable;
use journal_core::{init_logging, FocusSession, JournalConfig, SqliteEntryRepository};
use log::info;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "journal", about = "Date-keyed daily journal", version)]
struct Cli {
    /// Journal database file.
    #[arg(long, global = true, env = journal_core::config::DB_PATH_ENV)]
    db: Option<PathBuf>,

    /// Directory for rolling log files (absolute or relative to cwd).
    #[arg(long, global = true, env = journal_core::config::LOG_DIR_ENV)]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true, env = journal_core::config::LOG_LEVEL_ENV)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the month around a date and that date's entry.
    Show {
        /// Focus date (YYYY-MM-DD); defaults to today.
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// Save text for a date, replacing any existing entry.
    Write {
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        /// Entry text; read from stdin when omitted.
        text: Option<String>,
    },
    /// Remove the entry for a date.
    Delete {
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// List entries between two dates, inclusive.
    List {
        #[arg(long, value_parser = parse_date)]
        from: NaiveDate,
        #[arg(long, value_parser = parse_date)]
        to: NaiveDate,
    },
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    let date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|err| format!("expected YYYY-MM-DD, got `{value}`: {err}"))?;
    if !is_storable(date) {
        return Err(format!("year must be between 0000 and 9999, got `{value}`"));
    }
    Ok(date)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = JournalConfig::resolve(cli.db, cli.log_dir, cli.log_level);
    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }
    info!(
        "event=cli_start module=cli status=ok db_path={}",
        config.db_path.display()
    );

    let mut conn = open_db(&config.db_path)
        .with_context(|| format!("could not open journal at {}", config.db_path.display()))?;
    let repo = SqliteEntryRepository::try_new(&mut conn).context("could not prepare journal")?;
    let mut session = FocusSession::new(repo);

    match cli.command {
        Command::Show { date } => {
            if let Some(date) = date {
                session.set_focus(date);
            }
            let month = session
                .load_month_entries()
                .context("could not load entries for this month")?;
            print!("{}", render::month_grid(month));
            let text = session
                .load_text_for_focus()
                .context("could not load this entry")?;
            println!();
            println!("{}", session.focus_date_string());
            println!("{}", render::entry_body(&text));
        }
        Command::Write { date, text } => {
            if let Some(date) = date {
                session.set_focus(date);
            }
            let text = match text {
                Some(text) => text,
                None => read_stdin()?,
            };
            let stored = session
                .commit_text_for_focus(&text)
                .context("could not save this entry")?;
            if !stored {
                bail!("could not save this entry: the store rejected the write");
            }
            println!("saved {}", session.focus_date_string());
        }
        Command::Delete { date } => {
            if let Some(date) = date {
                session.set_focus(date);
            }
            let deleted = session
                .delete_entry_for_focus()
                .context("could not delete this entry")?;
            if !deleted {
                bail!("could not delete this entry: the store rejected the delete");
            }
            println!("deleted {}", session.focus_date_string());
        }
        Command::List { from, to } => {
            let entries = session
                .load_range(from, to)
                .context("could not load entries")?;
            if entries.is_empty() {
                println!("no entries between {from} and {to}");
            }
            for record in &entries {
                println!("{}", render::entry_line(record));
            }
        }
    }
    Ok(())
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("could not read entry text from stdin")?;
    Ok(strip_final_newline(&text).to_string())
}

/// Drops the single line terminator a shell or editor appends; any further
/// trailing blank lines belong to the entry.
fn strip_final_newline(text: &str) -> &str {
    text.strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text)
}
