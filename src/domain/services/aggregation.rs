//! Month-bucket aggregation
//!
//! Callers (forecast table, dashboard, report) view schedules as fixed runs
//! of calendar months. Bucketing sums event amounts into the month holding
//! each event date; events outside the window are dropped silently.

use chrono::NaiveDate;

use crate::domain::value_objects::Month;

/// An ordered, fixed-length run of calendar months.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthWindow {
    months: Vec<Month>,
}

impl MonthWindow {
    /// A window of `len` months starting at `first`.
    pub fn rolling(first: Month, len: usize) -> Self {
        Self {
            months: (0..len).map(|i| first.plus(i as i32)).collect(),
        }
    }

    /// Every month from `start`'s month through `end`'s month, inclusive.
    /// An inverted range yields an empty window.
    pub fn spanning(start: NaiveDate, end: NaiveDate) -> Self {
        let first = Month::containing(start);
        let last = Month::containing(end);
        let mut months = Vec::new();
        let mut current = first;
        while current <= last {
            months.push(current);
            current = current.plus(1);
        }
        Self { months }
    }

    pub fn months(&self) -> &[Month] {
        &self.months
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn first(&self) -> Option<Month> {
        self.months.first().copied()
    }

    /// Position of the bucket containing `date`, if any.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        let month = Month::containing(date);
        self.months.iter().position(|m| *m == month)
    }

    /// Sum dated amounts into per-month buckets. Amounts dated outside the
    /// window are dropped.
    pub fn bucket(&self, events: impl IntoIterator<Item = (NaiveDate, f64)>) -> Vec<f64> {
        let mut buckets = vec![0.0; self.months.len()];
        for (date, amount) in events {
            if let Some(i) = self.index_of(date) {
                buckets[i] += amount;
            }
        }
        buckets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn rolling_window_steps_monthly() {
        let w = MonthWindow::rolling(Month::new(2025, 11), 3);
        assert_eq!(
            w.months(),
            &[
                Month::new(2025, 11),
                Month::new(2025, 12),
                Month::new(2026, 1)
            ]
        );
    }

    #[test]
    fn spanning_window_is_inclusive() {
        let w = MonthWindow::spanning(date(2025, 1, 15), date(2025, 3, 2));
        assert_eq!(w.len(), 3);
        assert_eq!(w.first(), Some(Month::new(2025, 1)));
    }

    #[test]
    fn inverted_span_is_empty() {
        let w = MonthWindow::spanning(date(2025, 5, 1), date(2025, 1, 1));
        assert!(w.is_empty());
    }

    #[test]
    fn bucket_sums_by_month_and_drops_outside() {
        let w = MonthWindow::rolling(Month::new(2025, 1), 2);
        let buckets = w.bucket(vec![
            (date(2025, 1, 1), 100.0),
            (date(2025, 1, 31), 50.0),
            (date(2025, 2, 10), 25.0),
            (date(2025, 6, 1), 999.0), // outside, dropped
        ]);
        assert_eq!(buckets, vec![150.0, 25.0]);
    }

    #[test]
    fn bucket_of_empty_window_drops_everything() {
        let w = MonthWindow::spanning(date(2025, 5, 1), date(2025, 1, 1));
        assert!(w.bucket(vec![(date(2025, 3, 1), 10.0)]).is_empty());
    }
}
