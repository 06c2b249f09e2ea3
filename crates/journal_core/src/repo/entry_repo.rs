//! Entry repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide date-keyed upsert/read/delete over the `entries` table.
//! - Keep SQL and date serialization details inside the persistence boundary.
//!
//! # Invariants
//! - At most one row exists per date; writes for a known date overwrite it.
//! - Dates are stored as canonical `YYYY-MM-DD` text so lexical order equals
//!   chronological order.
//! - Every mutation runs in its own transaction; failures roll back fully.
//! - Failures are logged before they are surfaced or swallowed.
//! - Only years `0..=9999` are storable; beyond that the key form no longer
//!   sorts chronologically.

use crate::db::{ensure_schema, DbError};
use crate::model::entry::EntryRecord;
use chrono::{Datelike, NaiveDate};
use log::{debug, error, info, warn};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

const DB_DATE_FORMAT: &str = "%Y-%m-%d";
const MIN_STORABLE_YEAR: i32 = 0;
const MAX_STORABLE_YEAR: i32 = 9999;
const MIN_DATE_KEY: &str = "0000-01-01";
const MAX_DATE_KEY: &str = "9999-12-31";

const ENTRY_UPSERT_SQL: &str = "INSERT INTO entries (date, entry)
VALUES (?1, ?2)
ON CONFLICT(date) DO UPDATE SET entry = excluded.entry;";

const ENTRY_RANGE_SQL: &str = "SELECT date, entry
FROM entries
WHERE date BETWEEN ?1 AND ?2
ORDER BY date ASC;";

const ENTRY_DELETE_SQL: &str = "DELETE FROM entries WHERE date = ?1;";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for entry persistence and queries.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Date outside the storable year range.
    UnsupportedDate(NaiveDate),
    /// A stored row could not be mapped back into the domain model.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UnsupportedDate(date) => write!(
                f,
                "date {date} is outside the storable years {MIN_STORABLE_YEAR}..={MAX_STORABLE_YEAR}"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted entry data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::UnsupportedDate(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for date-keyed journal entries.
pub trait EntryRepository {
    /// Inserts or overwrites the entry for `date`.
    ///
    /// Returns `false` when the write was rolled back after a constraint
    /// failure and nothing was stored.
    fn save(&mut self, date: NaiveDate, text: &str) -> RepoResult<bool>;
    /// Returns the entry for `date`, if any.
    fn get(&self, date: NaiveDate) -> RepoResult<Option<EntryRecord>>;
    /// Returns entries with `start <= date <= end`, ordered by date.
    ///
    /// Reversed bounds yield an empty list.
    fn get_range(&self, start: NaiveDate, end: NaiveDate) -> RepoResult<Vec<EntryRecord>>;
    /// Removes the entry for `date`; a missing entry is a no-op.
    ///
    /// Returns `false` when the delete was rolled back after a constraint
    /// failure.
    fn delete(&mut self, date: NaiveDate) -> RepoResult<bool>;
}

/// SQLite-backed entry repository over the process-wide connection.
pub struct SqliteEntryRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteEntryRepository<'conn> {
    /// Wraps `conn`, ensuring the journal schema exists first.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_schema(conn).map_err(|err| {
            error!("event=entry_repo_init module=repo status=error error={err}");
            err
        })?;
        Ok(Self { conn })
    }

    fn write(
        &mut self,
        event: &'static str,
        date_key: &str,
        op: impl FnOnce(&Transaction<'_>) -> rusqlite::Result<usize>,
    ) -> RepoResult<bool> {
        let started_at = Instant::now();
        match run_in_transaction(&mut *self.conn, op) {
            Ok(changed) => {
                info!(
                    "event={event} module=repo status=ok date={date_key} changed={changed} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(true)
            }
            Err(err) => {
                let err = DbError::from(err);
                if err.is_constraint_violation() {
                    // Upsert resolves key conflicts inline; anything reaching
                    // here was rolled back and is reported as a no-op.
                    warn!(
                        "event={event} module=repo status=error date={date_key} error_code=constraint_violation error={err}"
                    );
                    return Ok(false);
                }
                error!(
                    "event={event} module=repo status=error date={date_key} error_code=write_failed error={err}"
                );
                Err(err.into())
            }
        }
    }
}

impl EntryRepository for SqliteEntryRepository<'_> {
    fn save(&mut self, date: NaiveDate, text: &str) -> RepoResult<bool> {
        if !is_storable(date) {
            warn!("event=entry_save module=repo status=error date={date} error_code=unsupported_date");
            return Err(RepoError::UnsupportedDate(date));
        }
        let date_key = date_to_db(date);
        self.write("entry_save", &date_key, |tx| {
            tx.execute(ENTRY_UPSERT_SQL, params![date_key, text])
        })
    }

    fn get(&self, date: NaiveDate) -> RepoResult<Option<EntryRecord>> {
        Ok(self.get_range(date, date)?.into_iter().next())
    }

    fn get_range(&self, start: NaiveDate, end: NaiveDate) -> RepoResult<Vec<EntryRecord>> {
        if start > end {
            return Ok(Vec::new());
        }

        if end.year() < MIN_STORABLE_YEAR || start.year() > MAX_STORABLE_YEAR {
            return Ok(Vec::new());
        }

        // Clamp to the storable range so both keys share the fixed-width form.
        let start_key = if start.year() < MIN_STORABLE_YEAR {
            MIN_DATE_KEY.to_string()
        } else {
            date_to_db(start)
        };
        let end_key = if end.year() > MAX_STORABLE_YEAR {
            MAX_DATE_KEY.to_string()
        } else {
            date_to_db(end)
        };
        let entries = query_range(&*self.conn, &start_key, &end_key).map_err(|err| {
            error!(
                "event=entry_range module=repo status=error start={start_key} end={end_key} error={err}"
            );
            err
        })?;

        debug!(
            "event=entry_range module=repo status=ok start={start_key} end={end_key} count={}",
            entries.len()
        );
        Ok(entries)
    }

    fn delete(&mut self, date: NaiveDate) -> RepoResult<bool> {
        if !is_storable(date) {
            // Nothing can be stored under such a date.
            return Ok(true);
        }
        let date_key = date_to_db(date);
        self.write("entry_delete", &date_key, |tx| {
            tx.execute(ENTRY_DELETE_SQL, [date_key.as_str()])
        })
    }
}

/// Runs `op` inside an immediate transaction.
///
/// The transaction commits only when `op` succeeds; every other exit path
/// drops the guard, which rolls back.
fn run_in_transaction<T>(
    conn: &mut Connection,
    op: impl FnOnce(&Transaction<'_>) -> rusqlite::Result<T>,
) -> rusqlite::Result<T> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let value = op(&tx)?;
    tx.commit()?;
    Ok(value)
}

fn query_range(
    conn: &Connection,
    start_key: &str,
    end_key: &str,
) -> RepoResult<Vec<EntryRecord>> {
    let mut stmt = conn.prepare_cached(ENTRY_RANGE_SQL)?;
    let mut rows = stmt.query(params![start_key, end_key])?;
    let mut entries = Vec::new();
    while let Some(row) = rows.next()? {
        entries.push(parse_entry_row(row)?);
    }
    Ok(entries)
}

fn parse_entry_row(row: &Row<'_>) -> RepoResult<EntryRecord> {
    let date_text: String = row.get("date")?;
    let date = parse_db_date(&date_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid date value `{date_text}` in entries.date"))
    })?;
    // Databases created before the NOT NULL constraint may hold NULL text.
    let entry = row.get::<_, Option<String>>("entry")?.unwrap_or_default();
    Ok(EntryRecord { date, entry })
}

/// Returns whether `date` has a fixed-width `YYYY-MM-DD` storage key.
pub fn is_storable(date: NaiveDate) -> bool {
    (MIN_STORABLE_YEAR..=MAX_STORABLE_YEAR).contains(&date.year())
}

/// Canonical storage key for `date`.
pub fn date_to_db(date: NaiveDate) -> String {
    date.format(DB_DATE_FORMAT).to_string()
}

/// Parses a canonical storage key back into a date.
pub fn parse_db_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DB_DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::{date_to_db, is_storable, parse_db_date};
    use chrono::{Datelike, NaiveDate};

    #[test]
    fn storage_key_is_zero_padded_iso() {
        let date = NaiveDate::from_ymd_opt(987, 3, 4).expect("valid date");
        assert_eq!(date_to_db(date), "0987-03-04");
        assert_eq!(parse_db_date("0987-03-04"), Some(date));
    }

    #[test]
    fn only_four_digit_years_are_storable() {
        let date = |y| NaiveDate::from_ymd_opt(y, 1, 1).expect("valid date");
        assert!(is_storable(date(0)));
        assert!(is_storable(date(9999)));
        assert!(!is_storable(date(10000)));
        assert!(!is_storable(date(-1)));
    }

    #[test]
    fn parse_db_date_rejects_display_form() {
        assert_eq!(parse_db_date("March 4, 2024"), None);
        assert_eq!(parse_db_date("2024-02-30"), None);
    }
}
