//! Core domain logic for the daily journal.
//! This crate is the single source of truth for calendar layout and
//! date-keyed entry persistence.

pub mod calendar;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use calendar::{build_calendar_matrix, month_name, CalendarMatrix, WEEKDAY_LABELS};
pub use config::JournalConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::day::Day;
pub use model::entry::EntryRecord;
pub use model::month::Month;
pub use repo::entry_repo::{EntryRepository, RepoError, RepoResult, SqliteEntryRepository};
pub use service::focus_service::FocusSession;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
