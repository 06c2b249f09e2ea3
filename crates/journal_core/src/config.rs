//! Runtime configuration resolution.
//!
//! # Responsibility
//! - Resolve database path, log directory and log level from explicit values
//!   or environment variables, with stable defaults.
//!
//! # Invariants
//! - Blank values are treated as unset.
//! - `log_dir` is always absolute so it can be handed to `init_logging`.

use crate::logging::default_log_level;
use std::path::{Path, PathBuf};

pub const DB_PATH_ENV: &str = "DAILY_JOURNAL_DB_PATH";
pub const LOG_DIR_ENV: &str = "DAILY_JOURNAL_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "DAILY_JOURNAL_LOG_LEVEL";

const APP_DIR_NAME: &str = "daily_journal";
const DB_FILE_NAME: &str = "journal.sqlite3";
const LOG_DIR_NAME: &str = "logs";

/// Resolved settings for one journal process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalConfig {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl JournalConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through `lookup`, keyed by the `*_ENV` names.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self::resolve(
            lookup(DB_PATH_ENV).map(PathBuf::from),
            lookup(LOG_DIR_ENV).map(PathBuf::from),
            lookup(LOG_LEVEL_ENV),
        )
    }

    /// Resolves configuration from optional explicit values.
    ///
    /// The log directory defaults to `logs/` next to the database file.
    pub fn resolve(
        db_path: Option<PathBuf>,
        log_dir: Option<PathBuf>,
        log_level: Option<String>,
    ) -> Self {
        let db_path = non_blank_path(db_path).unwrap_or_else(default_db_path);
        let log_dir = non_blank_path(log_dir).unwrap_or_else(|| {
            db_path
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from(LOG_DIR_NAME), |p| p.join(LOG_DIR_NAME))
        });
        let log_level = log_level
            .map(|level| level.trim().to_string())
            .filter(|level| !level.is_empty())
            .unwrap_or_else(|| default_log_level().to_string());

        Self {
            db_path,
            log_dir: absolutize(&log_dir),
            log_level,
        }
    }
}

/// Default database location under the platform data directory.
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
        .join(DB_FILE_NAME)
}

fn non_blank_path(path: Option<PathBuf>) -> Option<PathBuf> {
    path.filter(|value| !value.as_os_str().to_string_lossy().trim().is_empty())
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| std::env::temp_dir().join(path))
}
