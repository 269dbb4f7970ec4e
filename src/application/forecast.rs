//! Forecast use case
//!
//! Buckets each contract's invoice schedule into a rolling window of months
//! (12 by default) starting at "today's" month. The reference date is an
//! explicit argument - the engine never reads ambient clock state, callers
//! resolve it once at the boundary.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::entities::Contract;
use crate::domain::services::{contract_invoice_events, MonthWindow};
use crate::domain::value_objects::Month;

#[derive(Debug, Clone, Default)]
pub struct ForecastQuery {
    /// Restrict to one project type; `None` means all
    pub project_type: Option<String>,
}

/// One contract's projected invoicing across the window.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastRow {
    pub project_id: String,
    pub project_name: String,
    pub project_type: String,
    pub invoice_type: String,
    pub total_value: f64,
    pub monthly_values: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForecastResult {
    /// Display labels, one per window month (e.g. "Mar 2025")
    pub months: Vec<String>,
    /// Sortable keys, one per window month (e.g. "2025-03")
    pub month_keys: Vec<String>,
    pub rows: Vec<ForecastRow>,
    /// Per-month column totals across all rows
    pub totals: Vec<f64>,
}

pub struct ForecastUseCase<'a> {
    contracts: &'a [Contract],
    window_months: usize,
}

impl<'a> ForecastUseCase<'a> {
    pub fn new(contracts: &'a [Contract], window_months: usize) -> Self {
        Self {
            contracts,
            window_months,
        }
    }

    pub fn execute(&self, query: &ForecastQuery, today: NaiveDate) -> ForecastResult {
        let window = MonthWindow::rolling(Month::containing(today), self.window_months);
        let mut totals = vec![0.0; window.len()];
        let mut rows = Vec::new();

        for contract in self.contracts {
            if let Some(wanted) = &query.project_type {
                if &contract.project_type != wanted {
                    continue;
                }
            }

            let monthly_values = window.bucket(
                contract_invoice_events(contract)
                    .into_iter()
                    .map(|event| (event.date, event.amount)),
            );
            for (total, value) in totals.iter_mut().zip(&monthly_values) {
                *total += value;
            }
            rows.push(ForecastRow {
                project_id: contract.project_id.clone(),
                project_name: contract.project_name.clone(),
                project_type: contract.project_type.clone(),
                invoice_type: contract.invoice_type.to_string(),
                total_value: contract.total_value,
                monthly_values,
            });
        }

        ForecastResult {
            months: window.months().iter().map(Month::label).collect(),
            month_keys: window.months().iter().map(Month::key).collect(),
            rows,
            totals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Stage;
    use crate::domain::value_objects::InvoiceType;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn progress_contract(id: &str, project_type: &str) -> Contract {
        let mut c = Contract::new(id).with_stages(vec![Stage {
            stage_name: "SD".into(),
            start_date: Some(date(2025, 1, 1)),
            end_date: Some(date(2025, 4, 30)),
            months: 4,
            amount: 12000.0,
        }]);
        c.invoice_type = InvoiceType::Progress;
        c.project_type = project_type.into();
        c.total_value = 12000.0;
        c
    }

    #[test]
    fn rows_bucket_invoices_into_window_months() {
        let contracts = vec![progress_contract("P-001", "MEP")];
        let result = ForecastUseCase::new(&contracts, 12)
            .execute(&ForecastQuery::default(), date(2025, 1, 15));

        assert_eq!(result.months.len(), 12);
        assert_eq!(result.month_keys[0], "2025-01");
        assert_eq!(result.rows.len(), 1);
        let row = &result.rows[0];
        assert!((row.monthly_values[0] - 3000.0).abs() < 1e-9);
        assert!((row.monthly_values[3] - 3000.0).abs() < 1e-9);
        assert_eq!(row.monthly_values[4], 0.0);
    }

    #[test]
    fn events_before_window_are_dropped() {
        let contracts = vec![progress_contract("P-001", "MEP")];
        // window starts in March; Jan and Feb invoices fall away
        let result = ForecastUseCase::new(&contracts, 12)
            .execute(&ForecastQuery::default(), date(2025, 3, 10));
        let row_total: f64 = result.rows[0].monthly_values.iter().sum();
        assert!((row_total - 6000.0).abs() < 1e-6);
    }

    #[test]
    fn project_type_filter_excludes_other_rows() {
        let contracts = vec![
            progress_contract("P-001", "MEP"),
            progress_contract("P-002", "HAS"),
        ];
        let query = ForecastQuery {
            project_type: Some("HAS".into()),
        };
        let result = ForecastUseCase::new(&contracts, 12).execute(&query, date(2025, 1, 1));
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.rows[0].project_id, "P-002");
    }

    #[test]
    fn totals_sum_across_rows() {
        let contracts = vec![
            progress_contract("P-001", "MEP"),
            progress_contract("P-002", "MEP"),
        ];
        let result = ForecastUseCase::new(&contracts, 12)
            .execute(&ForecastQuery::default(), date(2025, 1, 1));
        assert!((result.totals[0] - 6000.0).abs() < 1e-9);
    }
}
