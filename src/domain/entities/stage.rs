//! Stage entity
//!
//! A dated, amount-bearing segment of a contract's billing plan. Stages are
//! edited incrementally in forms, so dates and amounts are optional until
//! the caller is done; the projection engine tolerates partial stages.
//!
//! The `(start_date, end_date, months)` triple is kept consistent by
//! [`Stage::apply`]: a pure reducer with one authoritative direction of
//! derivation per edited field, so linked fields never cycle.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{months_spanned, period_end, period_start};

/// One billing segment of a contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    /// Reference into the stage catalog (not enforced unique)
    pub stage_name: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Number of billing periods, floored at 1
    #[serde(default = "default_months")]
    pub months: u32,
    /// This stage's portion of the contract total value
    #[serde(default)]
    pub amount: f64,
}

fn default_months() -> u32 {
    1
}

impl Default for Stage {
    fn default() -> Self {
        Self {
            stage_name: String::new(),
            start_date: None,
            end_date: None,
            months: 1,
            amount: 0.0,
        }
    }
}

/// A single field edit to a stage.
#[derive(Debug, Clone, PartialEq)]
pub enum StageEdit {
    Name(String),
    StartDate(Option<NaiveDate>),
    EndDate(Option<NaiveDate>),
    Months(u32),
    Amount(f64),
}

impl Stage {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            stage_name: name.into(),
            ..Self::default()
        }
    }

    /// Apply one field edit, recomputing the dependent side of the
    /// dates/months link:
    ///
    /// - editing either date recomputes `months` from the date pair;
    /// - editing `months` recomputes `end_date` from `start_date` when
    ///   present, otherwise back-computes `start_date` from `end_date`.
    pub fn apply(mut self, edit: StageEdit) -> Self {
        match edit {
            StageEdit::Name(name) => self.stage_name = name,
            StageEdit::Amount(amount) => self.amount = amount,
            StageEdit::StartDate(start) => {
                self.start_date = start;
                self.recompute_months();
            }
            StageEdit::EndDate(end) => {
                self.end_date = end;
                self.recompute_months();
            }
            StageEdit::Months(months) => {
                self.months = months.max(1);
                if let Some(start) = self.start_date {
                    self.end_date = Some(period_end(start, self.months));
                } else if let Some(end) = self.end_date {
                    self.start_date = Some(period_start(end, self.months));
                }
            }
        }
        self
    }

    fn recompute_months(&mut self) {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            self.months = months_spanned(start, end).max(1) as u32;
        }
    }
}
