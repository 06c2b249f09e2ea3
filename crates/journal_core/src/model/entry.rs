//! Persisted journal entry record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One durable `(date, entry)` pair.
///
/// Serialized dates use the canonical `YYYY-MM-DD` form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub date: NaiveDate,
    /// Free text; empty is a valid value distinct from "no record".
    pub entry: String,
}

impl EntryRecord {
    pub fn new(date: NaiveDate, entry: impl Into<String>) -> Self {
        Self {
            date,
            entry: entry.into(),
        }
    }
}
