//! Monthly breakdown - links total contract value to a per-month amount
//!
//! For `Monthly` contracts the user fills in two of `{tcv, monthly amount,
//! number of months}` and the third is derived. Which side is derived depends
//! on the active mode; switching modes clears the side that becomes
//! calculated so it can never hold a stale hand-entered value.
//!
//! All updates go through [`MonthlyBreakdown::apply`], a pure reducer with a
//! single authoritative derivation direction per mode.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::period_end;

/// Which direction the breakdown derives its calculated field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BreakdownMode {
    /// Monthly amount is calculated from TCV / months (default)
    #[default]
    TcvToMonthly,
    /// TCV is calculated from monthly amount * months
    MonthlyToTcv,
}

/// Reconciled TCV / monthly-amount / month-count state for Monthly billing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MonthlyBreakdown {
    #[serde(default)]
    pub mode: BreakdownMode,
    #[serde(default)]
    pub tcv: Option<f64>,
    #[serde(default)]
    pub monthly_amount: Option<f64>,
    #[serde(default)]
    pub number_of_months: Option<u32>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// A single field edit to a breakdown.
#[derive(Debug, Clone, PartialEq)]
pub enum BreakdownEdit {
    Tcv(Option<f64>),
    MonthlyAmount(Option<f64>),
    NumberOfMonths(Option<u32>),
    StartDate(Option<NaiveDate>),
    Mode(BreakdownMode),
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl MonthlyBreakdown {
    /// Apply one field edit and re-derive the dependent fields.
    pub fn apply(mut self, edit: BreakdownEdit) -> Self {
        match &edit {
            BreakdownEdit::Tcv(v) => self.tcv = *v,
            BreakdownEdit::MonthlyAmount(v) => self.monthly_amount = *v,
            BreakdownEdit::NumberOfMonths(v) => self.number_of_months = *v,
            BreakdownEdit::StartDate(v) => self.start_date = *v,
            BreakdownEdit::Mode(mode) => {
                self.mode = *mode;
                // the side that just became calculated is stale
                match mode {
                    BreakdownMode::TcvToMonthly => self.monthly_amount = None,
                    BreakdownMode::MonthlyToTcv => self.tcv = None,
                }
                return self;
            }
        }

        match self.mode {
            BreakdownMode::TcvToMonthly => {
                if !matches!(edit, BreakdownEdit::MonthlyAmount(_)) {
                    self.monthly_amount = match (self.tcv, self.number_of_months) {
                        (Some(tcv), Some(n)) if tcv > 0.0 && n > 0 => {
                            Some(round_cents(tcv / n as f64))
                        }
                        _ => None,
                    };
                }
            }
            BreakdownMode::MonthlyToTcv => {
                if !matches!(edit, BreakdownEdit::Tcv(_)) {
                    self.tcv = match (self.monthly_amount, self.number_of_months) {
                        (Some(monthly), Some(n)) if monthly > 0.0 && n > 0 => {
                            Some(round_cents(monthly * n as f64))
                        }
                        _ => None,
                    };
                }
            }
        }

        if matches!(
            edit,
            BreakdownEdit::StartDate(_) | BreakdownEdit::NumberOfMonths(_)
        ) {
            self.end_date = match (self.start_date, self.number_of_months) {
                (Some(start), Some(n)) if n > 0 => Some(period_end(start, n)),
                _ => None,
            };
        }

        self
    }

    /// The per-event amount and event count, when both are usable.
    pub fn resolved(&self) -> Option<(f64, u32)> {
        match (self.monthly_amount, self.number_of_months) {
            (Some(amount), Some(n)) if amount > 0.0 && n > 0 => Some((amount, n)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn tcv_to_monthly_derives_monthly_amount() {
        let b = MonthlyBreakdown::default()
            .apply(BreakdownEdit::Tcv(Some(12000.0)))
            .apply(BreakdownEdit::NumberOfMonths(Some(12)));
        assert_eq!(b.monthly_amount, Some(1000.0));
    }

    #[test]
    fn monthly_to_tcv_derives_tcv() {
        let b = MonthlyBreakdown::default()
            .apply(BreakdownEdit::Mode(BreakdownMode::MonthlyToTcv))
            .apply(BreakdownEdit::MonthlyAmount(Some(2500.0)))
            .apply(BreakdownEdit::NumberOfMonths(Some(6)));
        assert_eq!(b.tcv, Some(15000.0));
    }

    #[test]
    fn mode_round_trip_reconstructs_tcv() {
        let b = MonthlyBreakdown::default()
            .apply(BreakdownEdit::Tcv(Some(12000.0)))
            .apply(BreakdownEdit::NumberOfMonths(Some(12)));
        assert_eq!(b.monthly_amount, Some(1000.0));

        // flipping modes clears tcv, then the existing monthly amount
        // reconstructs it on the next edit
        let b = b
            .apply(BreakdownEdit::Mode(BreakdownMode::MonthlyToTcv))
            .apply(BreakdownEdit::NumberOfMonths(Some(12)));
        assert_eq!(b.tcv, Some(12000.0));
    }

    #[test]
    fn switching_mode_clears_calculated_side() {
        let b = MonthlyBreakdown::default()
            .apply(BreakdownEdit::Tcv(Some(6000.0)))
            .apply(BreakdownEdit::NumberOfMonths(Some(6)))
            .apply(BreakdownEdit::Mode(BreakdownMode::MonthlyToTcv));
        assert_eq!(b.tcv, None);
        assert_eq!(b.monthly_amount, Some(1000.0));
    }

    #[test]
    fn non_positive_operands_blank_the_derived_field() {
        let b = MonthlyBreakdown::default()
            .apply(BreakdownEdit::Tcv(Some(0.0)))
            .apply(BreakdownEdit::NumberOfMonths(Some(6)));
        assert_eq!(b.monthly_amount, None);
    }

    #[test]
    fn derived_amount_rounds_to_cents() {
        let b = MonthlyBreakdown::default()
            .apply(BreakdownEdit::Tcv(Some(10000.0)))
            .apply(BreakdownEdit::NumberOfMonths(Some(3)));
        assert_eq!(b.monthly_amount, Some(3333.33));
    }

    #[test]
    fn end_date_derived_from_start_and_months() {
        let b = MonthlyBreakdown::default()
            .apply(BreakdownEdit::NumberOfMonths(Some(6)))
            .apply(BreakdownEdit::StartDate(Some(date(2025, 3, 1))));
        assert_eq!(b.end_date, Some(date(2025, 8, 31)));
    }

    #[test]
    fn clearing_months_clears_end_date() {
        let b = MonthlyBreakdown::default()
            .apply(BreakdownEdit::NumberOfMonths(Some(6)))
            .apply(BreakdownEdit::StartDate(Some(date(2025, 3, 1))))
            .apply(BreakdownEdit::NumberOfMonths(None));
        assert_eq!(b.end_date, None);
    }

    #[test]
    fn resolved_requires_positive_amount_and_count() {
        let b = MonthlyBreakdown {
            monthly_amount: Some(2500.0),
            number_of_months: Some(6),
            ..Default::default()
        };
        assert_eq!(b.resolved(), Some((2500.0, 6)));

        let b = MonthlyBreakdown {
            monthly_amount: Some(0.0),
            number_of_months: Some(6),
            ..Default::default()
        };
        assert_eq!(b.resolved(), None);
    }

    #[test]
    fn mode_serializes_kebab_case() {
        let json = serde_json::to_string(&BreakdownMode::TcvToMonthly).unwrap();
        assert_eq!(json, "\"tcv-to-monthly\"");
    }
}
