//! Month value object - a single calendar month
//!
//! Stored as a count of months since year zero so that stepping and ordering
//! never produce an out-of-range month component.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A calendar month (year + month), independent of any day-of-month.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Month(i32);

impl Month {
    /// Create a month from a year and a 1-based month number.
    ///
    /// Out-of-range month numbers are normalized (month 13 rolls into the
    /// next year), mirroring how calendar stepping behaves.
    pub fn new(year: i32, month: u32) -> Self {
        Month(year * 12 + month as i32 - 1)
    }

    /// The month containing the given date.
    pub fn containing(date: NaiveDate) -> Self {
        Month::new(date.year(), date.month())
    }

    pub fn year(&self) -> i32 {
        self.0.div_euclid(12)
    }

    /// 1-based month number (1 = January).
    pub fn month(&self) -> u32 {
        (self.0.rem_euclid(12) + 1) as u32
    }

    /// The first day of this month.
    pub fn first_day(&self) -> NaiveDate {
        // month() is 1..=12 by construction
        NaiveDate::from_ymd_opt(self.year(), self.month(), 1)
            .expect("normalized month is always a valid date")
    }

    /// The last day of this month.
    pub fn last_day(&self) -> NaiveDate {
        self.plus(1).first_day().pred_opt().unwrap_or(NaiveDate::MIN)
    }

    /// This month shifted forward (or back, for negative `n`).
    pub fn plus(&self, n: i32) -> Self {
        Month(self.0 + n)
    }

    /// Whether the given date falls inside this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        Month::containing(date) == *self
    }

    /// Sortable key in `YYYY-MM` form, e.g. `2025-03`.
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year(), self.month())
    }

    /// Short display label, e.g. `Mar 2025`.
    pub fn label(&self) -> String {
        self.first_day().format("%b %Y").to_string()
    }

    /// Long display label, e.g. `March 2025`.
    pub fn long_label(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Number of calendar months a date range touches, counting both endpoints'
/// months. A range inside a single month spans 1; an inverted range goes
/// negative and callers decide how to floor it.
pub fn months_spanned(start: NaiveDate, end: NaiveDate) -> i32 {
    Month::containing(end).0 - Month::containing(start).0 + 1
}

/// End date of a billing period `months` long starting at `start`: the last
/// day of the final period's month.
pub fn period_end(start: NaiveDate, months: u32) -> NaiveDate {
    Month::containing(start)
        .plus(months.saturating_sub(1) as i32)
        .last_day()
}

/// Start date of a billing period `months` long ending at `end`: the first
/// day of the initial period's month.
pub fn period_start(end: NaiveDate, months: u32) -> NaiveDate {
    Month::containing(end)
        .plus(-(months.saturating_sub(1) as i32))
        .first_day()
}
