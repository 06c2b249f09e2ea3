//! Day view model.
//!
//! # Invariants
//! - `date_string` is always derived from `date` and is display-only.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One calendar day and its (possibly empty) journal text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    pub date: NaiveDate,
    pub entry: String,
    /// Human-readable form, e.g. `March 4, 2024`.
    pub date_string: String,
}

impl Day {
    /// Creates a day with empty entry text.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            entry: String::new(),
            date_string: Self::display_string(date),
        }
    }

    /// Formats `date` as `<Month name> <day>, <year>` without zero padding.
    pub fn display_string(date: NaiveDate) -> String {
        date.format("%B %-d, %Y").to_string()
    }

    /// Returns whether this day carries non-empty journal text.
    pub fn has_entry(&self) -> bool {
        !self.entry.is_empty()
    }
}
