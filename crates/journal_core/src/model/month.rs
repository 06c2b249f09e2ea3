//! Month view model built on top of the calendar matrix.
//!
//! # Responsibility
//! - Turn a day-number matrix into concrete `Day` cells.
//! - Merge stored entry text into the visible days on request.
//!
//! # Invariants
//! - `weeks` always has 6 rows of 7 cells.
//! - `None` cells are outside the month and are not error states.
//! - Construction never touches persistence.

use crate::calendar::{
    build_calendar_matrix, first_day_of_month, last_day_of_month, month_name, MATRIX_COLUMNS,
    MATRIX_ROWS,
};
use crate::model::day::Day;
use crate::model::entry::EntryRecord;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Grid of day cells, `None` for out-of-month positions.
pub type MonthWeeks = [[Option<Day>; MATRIX_COLUMNS]; MATRIX_ROWS];

/// One month laid out for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Month {
    /// 1-based month number.
    pub month_num: u32,
    pub year: i32,
    pub weeks: MonthWeeks,
    pub month_name: String,
}

impl Month {
    /// Builds the month grid with empty-entry days.
    ///
    /// Callers populate entry text separately, see [`Month::apply_entries`].
    pub fn build(month_num: u32, year: i32) -> Self {
        let matrix = build_calendar_matrix(year, month_num);
        let weeks = std::array::from_fn(|row| {
            std::array::from_fn(|col| {
                NaiveDate::from_ymd_opt(year, month_num, matrix[row][col]).map(Day::new)
            })
        });

        Self {
            month_num,
            year,
            weeks,
            month_name: month_name(month_num).to_string(),
        }
    }

    /// Builds the month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self::build(date.month(), date.year())
    }

    /// Returns `"<Month name> <year>"`, e.g. `March 2024`.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.month_name, self.year)
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        first_day_of_month(self.year, self.month_num)
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        last_day_of_month(self.year, self.month_num)
    }

    /// Returns whether `date` falls inside this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month_num
    }

    /// Iterates present days in calendar order.
    pub fn days(&self) -> impl Iterator<Item = &Day> {
        self.weeks.iter().flatten().flatten()
    }

    pub fn day(&self, day_of_month: u32) -> Option<&Day> {
        self.days().find(|day| day.date.day() == day_of_month)
    }

    pub fn day_mut(&mut self, day_of_month: u32) -> Option<&mut Day> {
        self.weeks
            .iter_mut()
            .flatten()
            .flatten()
            .find(|day| day.date.day() == day_of_month)
    }

    /// Copies stored entry text onto matching days.
    ///
    /// Records outside this month are ignored.
    pub fn apply_entries(&mut self, records: &[EntryRecord]) {
        for record in records {
            if !self.contains(record.date) {
                continue;
            }
            if let Some(day) = self.day_mut(record.date.day()) {
                day.entry.clone_from(&record.entry);
            }
        }
    }
}
