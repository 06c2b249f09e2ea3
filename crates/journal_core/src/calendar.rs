//! Calendar matrix construction for month views.
//!
//! # Responsibility
//! - Lay out the days of one month as a Monday-first 6x7 grid.
//! - Provide month naming and month-boundary helpers shared by model/service.
//!
//! # Invariants
//! - Every matrix has exactly 6 rows of 7 cells.
//! - `0` marks a cell outside the month; non-zero cells are day-of-month values.
//! - Day numbers increase strictly in row-major order.

use chrono::{Datelike, NaiveDate};

/// Rows in every calendar matrix, regardless of month length.
pub const MATRIX_ROWS: usize = 6;
/// Columns per week row (Monday through Sunday).
pub const MATRIX_COLUMNS: usize = 7;

/// Short weekday labels in matrix column order.
pub const WEEKDAY_LABELS: [&str; MATRIX_COLUMNS] =
    ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Day-of-month grid for one month. `0` means "no day in this cell".
pub type CalendarMatrix = [[u32; MATRIX_COLUMNS]; MATRIX_ROWS];

/// Builds the 6x7 day-number grid for `year`/`month`.
///
/// Weeks start on Monday. Months that need fewer than six week rows are
/// padded with trailing all-zero rows. An out-of-range month yields an
/// all-zero matrix.
pub fn build_calendar_matrix(year: i32, month: u32) -> CalendarMatrix {
    let mut matrix = [[0; MATRIX_COLUMNS]; MATRIX_ROWS];
    let Some(first) = first_day_of_month(year, month) else {
        return matrix;
    };

    let offset = first.weekday().num_days_from_monday() as usize;
    for day in 1..=days_in_month(year, month) {
        let cell = offset + day as usize - 1;
        matrix[cell / MATRIX_COLUMNS][cell % MATRIX_COLUMNS] = day;
    }
    matrix
}

/// Returns the number of days in `year`/`month`, or `0` for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    last_day_of_month(year, month).map_or(0, |date| date.day())
}

/// Returns the first calendar date of `year`/`month`.
pub fn first_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Returns the last calendar date of `year`/`month`.
pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    first_day_of_month(year, month)?;
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    first_day_of_month(next_year, next_month)?.pred_opt()
}

/// English month name for `month` (1-based), or `""` when out of range.
pub fn month_name(month: u32) -> &'static str {
    u8::try_from(month)
        .ok()
        .and_then(|value| chrono::Month::try_from(value).ok())
        .map_or("", |value| value.name())
}
