//! Plain-text rendering of month grids and entries.

use journal_core::{Day, EntryRecord, Month, WEEKDAY_LABELS};
use std::fmt::Write;

const PREVIEW_CHARS: usize = 60;

/// Renders the month header, weekday labels and 6 week rows.
///
/// Days with stored text are marked with `*`.
pub fn month_grid(month: &Month) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:^34}", month.display_name());
    let _ = writeln!(out, "{}", WEEKDAY_LABELS.map(|label| format!("{label:>4}")).concat());
    for week in &month.weeks {
        let row: String = week.iter().map(cell).collect();
        let _ = writeln!(out, "{}", row.trim_end());
    }
    out
}

fn cell(day: &Option<Day>) -> String {
    match day {
        Some(day) => {
            let marker = if day.has_entry() { '*' } else { ' ' };
            format!("{:>3}{marker}", chrono::Datelike::day(&day.date))
        }
        None => "    ".to_string(),
    }
}

pub fn entry_body(text: &str) -> &str {
    if text.is_empty() {
        "(no entry yet)"
    } else {
        text
    }
}

/// One-line listing: canonical date plus a flattened preview.
pub fn entry_line(record: &EntryRecord) -> String {
    let flat = record.entry.replace(['\n', '\r'], " ");
    let mut preview: String = flat.chars().take(PREVIEW_CHARS).collect();
    if flat.chars().count() > PREVIEW_CHARS {
        preview.push_str("...");
    }
    format!("{}  {preview}", record.date.format("%Y-%m-%d"))
}
