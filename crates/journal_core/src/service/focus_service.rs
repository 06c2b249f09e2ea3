//! Focus session coordinator.
//!
//! # Responsibility
//! - Own the single "currently focused" date for one UI session.
//! - Keep the visible month grid and calendar matrix in sync with focus.
//! - Mediate entry text reads/writes between the UI and the repository.
//!
//! # Invariants
//! - `month` and `matrix` always describe the month containing `focus_date`.
//! - A failed repository call never changes `focus_date`, `month` or `matrix`.
//! - A missing entry is reported as empty text, never as an error.
//! - The visible month only mirrors writes the repository reports as stored.

use crate::calendar::{build_calendar_matrix, CalendarMatrix};
use crate::model::day::Day;
use crate::model::entry::EntryRecord;
use crate::model::month::Month;
use crate::repo::entry_repo::{EntryRepository, RepoResult};
use chrono::{Datelike, Local, Months, NaiveDate};
use log::debug;

/// Coordinator between a calendar UI and an entry repository.
pub struct FocusSession<R: EntryRepository> {
    repo: R,
    focus_date: NaiveDate,
    month: Month,
    matrix: CalendarMatrix,
}

impl<R: EntryRepository> FocusSession<R> {
    /// Starts a session focused on today's local date.
    pub fn new(repo: R) -> Self {
        Self::with_focus(repo, Local::now().date_naive())
    }

    /// Starts a session focused on `date`.
    pub fn with_focus(repo: R, date: NaiveDate) -> Self {
        Self {
            repo,
            focus_date: date,
            month: Month::containing(date),
            matrix: build_calendar_matrix(date.year(), date.month()),
        }
    }

    pub fn focus_date(&self) -> NaiveDate {
        self.focus_date
    }

    /// Focus date in display form, e.g. `March 4, 2024`.
    pub fn focus_date_string(&self) -> String {
        Day::display_string(self.focus_date)
    }

    pub fn calendar_matrix(&self) -> &CalendarMatrix {
        &self.matrix
    }

    /// Visible month. Entry text reflects the last load/commit in this session.
    pub fn month(&self) -> &Month {
        &self.month
    }

    /// Moves focus to `date`, rebuilding the month grid and matrix.
    pub fn set_focus(&mut self, date: NaiveDate) {
        debug!(
            "event=focus_change module=service status=ok from={} to={}",
            self.focus_date, date
        );
        self.focus_date = date;
        self.month = Month::containing(date);
        self.matrix = build_calendar_matrix(date.year(), date.month());
    }

    /// Focuses `day_of_month` inside the visible month.
    ///
    /// Returns `false` and keeps the current focus when the day does not
    /// exist in that month.
    pub fn select_day(&mut self, day_of_month: u32) -> bool {
        match self.month.day(day_of_month).map(|day| day.date) {
            Some(date) => {
                self.focus_date = date;
                true
            }
            None => false,
        }
    }

    /// Moves focus one month forward, clamping the day to the month length.
    pub fn next_month(&mut self) -> NaiveDate {
        if let Some(date) = self.focus_date.checked_add_months(Months::new(1)) {
            self.set_focus(date);
        }
        self.focus_date
    }

    /// Moves focus one month back, clamping the day to the month length.
    pub fn prev_month(&mut self) -> NaiveDate {
        if let Some(date) = self.focus_date.checked_sub_months(Months::new(1)) {
            self.set_focus(date);
        }
        self.focus_date
    }

    /// Returns stored text for the focus date, or an empty string.
    pub fn load_text_for_focus(&self) -> RepoResult<String> {
        Ok(self
            .repo
            .get(self.focus_date)?
            .map(|record| record.entry)
            .unwrap_or_default())
    }

    /// Saves `text` as the focus date's entry.
    ///
    /// Returns `false` when the repository rolled the write back; the visible
    /// month is left untouched in that case.
    pub fn commit_text_for_focus(&mut self, text: &str) -> RepoResult<bool> {
        let stored = self.repo.save(self.focus_date, text)?;
        if stored {
            self.sync_visible_day(text);
        }
        Ok(stored)
    }

    /// Removes the focus date's entry, if any.
    ///
    /// Returns `false` when the repository rolled the delete back.
    pub fn delete_entry_for_focus(&mut self) -> RepoResult<bool> {
        let deleted = self.repo.delete(self.focus_date)?;
        if deleted {
            self.sync_visible_day("");
        }
        Ok(deleted)
    }

    /// Returns stored entries between `start` and `end`, inclusive.
    ///
    /// Focus is not changed. Reversed bounds yield an empty list.
    pub fn load_range(&self, start: NaiveDate, end: NaiveDate) -> RepoResult<Vec<EntryRecord>> {
        self.repo.get_range(start, end)
    }

    /// Populates the visible month with stored entry text and returns it.
    pub fn load_month_entries(&mut self) -> RepoResult<&Month> {
        let (Some(first), Some(last)) = (self.month.first_day(), self.month.last_day()) else {
            return Ok(&self.month);
        };

        let records = self.repo.get_range(first, last)?;
        let mut month = Month::build(self.month.month_num, self.month.year);
        month.apply_entries(&records);
        self.month = month;
        Ok(&self.month)
    }

    fn sync_visible_day(&mut self, text: &str) {
        let date = self.focus_date;
        if !self.month.contains(date) {
            return;
        }
        if let Some(day) = self.month.day_mut(date.day()) {
            day.entry = text.to_string();
        }
    }
}
