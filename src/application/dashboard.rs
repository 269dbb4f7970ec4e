//! Dashboard use case
//!
//! Portfolio-level view: headline metrics plus per-month invoice totals,
//! receipt totals, and net cash position, split by project type. The month
//! span comes from the query when given, otherwise from the portfolio's own
//! contract date extent.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::entities::Contract;
use crate::domain::services::{contract_invoice_events, contract_receipt_events, MonthWindow};
use crate::domain::value_objects::Month;

#[derive(Debug, Clone, Default)]
pub struct DashboardQuery {
    pub project_type: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TypeActivity {
    pub invoices: f64,
    pub receipts: f64,
}

/// Invoice/receipt activity inside one calendar month.
#[derive(Debug, Clone, Serialize)]
pub struct MonthActivity {
    /// Long display label, e.g. "March 2025"
    pub month: String,
    pub month_key: String,
    pub invoices: f64,
    pub receipts: f64,
    /// Receipts minus invoices
    pub net_cash_flow: f64,
    /// Only project types with activity this month appear
    pub by_project_type: BTreeMap<String, TypeActivity>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardResult {
    pub total_contracts: usize,
    pub total_value: f64,
    pub average_value: f64,
    /// Receipts expected in the first window month
    pub next_month_receipts: f64,
    pub project_type_counts: BTreeMap<String, usize>,
    pub invoice_type_counts: BTreeMap<String, usize>,
    pub monthly: Vec<MonthActivity>,
}

pub struct DashboardUseCase<'a> {
    contracts: &'a [Contract],
}

impl<'a> DashboardUseCase<'a> {
    pub fn new(contracts: &'a [Contract]) -> Self {
        Self { contracts }
    }

    pub fn execute(&self, query: &DashboardQuery, today: NaiveDate) -> DashboardResult {
        let selected: Vec<&Contract> = self
            .contracts
            .iter()
            .filter(|c| matches_query(c, query))
            .collect();

        let total_contracts = selected.len();
        let total_value: f64 = selected.iter().map(|c| c.total_value).sum();
        let average_value = if total_contracts > 0 {
            total_value / total_contracts as f64
        } else {
            0.0
        };

        let mut project_type_counts = BTreeMap::new();
        let mut invoice_type_counts = BTreeMap::new();
        for contract in &selected {
            *project_type_counts
                .entry(display_type(&contract.project_type))
                .or_insert(0) += 1;
            *invoice_type_counts
                .entry(contract.invoice_type.to_string())
                .or_insert(0) += 1;
        }

        let window = window_for(query, &selected, today);
        let mut invoices = vec![0.0; window.len()];
        let mut receipts = vec![0.0; window.len()];
        let mut by_type: BTreeMap<String, (Vec<f64>, Vec<f64>)> = BTreeMap::new();

        for contract in &selected {
            let contract_invoices = window.bucket(
                contract_invoice_events(contract)
                    .into_iter()
                    .map(|e| (e.date, e.amount)),
            );
            let contract_receipts = window.bucket(
                contract_receipt_events(contract)
                    .into_iter()
                    .map(|e| (e.date, e.amount)),
            );

            let entry = by_type
                .entry(display_type(&contract.project_type))
                .or_insert_with(|| (vec![0.0; window.len()], vec![0.0; window.len()]));
            for i in 0..window.len() {
                invoices[i] += contract_invoices[i];
                receipts[i] += contract_receipts[i];
                entry.0[i] += contract_invoices[i];
                entry.1[i] += contract_receipts[i];
            }
        }

        let monthly: Vec<MonthActivity> = window
            .months()
            .iter()
            .enumerate()
            .map(|(i, month)| MonthActivity {
                month: month.long_label(),
                month_key: month.key(),
                invoices: invoices[i],
                receipts: receipts[i],
                net_cash_flow: receipts[i] - invoices[i],
                by_project_type: by_type
                    .iter()
                    .filter(|(_, (inv, rec))| inv[i] != 0.0 || rec[i] != 0.0)
                    .map(|(name, (inv, rec))| {
                        (
                            name.clone(),
                            TypeActivity {
                                invoices: inv[i],
                                receipts: rec[i],
                            },
                        )
                    })
                    .collect(),
            })
            .collect();

        DashboardResult {
            total_contracts,
            total_value,
            average_value,
            next_month_receipts: monthly.first().map(|m| m.receipts).unwrap_or(0.0),
            project_type_counts,
            invoice_type_counts,
            monthly,
        }
    }
}

fn matches_query(contract: &Contract, query: &DashboardQuery) -> bool {
    if let Some(wanted) = &query.project_type {
        if &contract.project_type != wanted {
            return false;
        }
    }
    if let Some(from) = query.start_date {
        match contract.start_date {
            Some(start) if start >= from => {}
            _ => return false,
        }
    }
    if let Some(to) = query.end_date {
        match contract.end_date {
            Some(end) if end <= to => {}
            _ => return false,
        }
    }
    true
}

/// Explicit span wins; otherwise the portfolio's earliest start through its
/// latest end; an empty or undated portfolio collapses to today's month.
fn window_for(query: &DashboardQuery, selected: &[&Contract], today: NaiveDate) -> MonthWindow {
    if let (Some(start), Some(end)) = (query.start_date, query.end_date) {
        return MonthWindow::spanning(start, end);
    }
    let earliest = selected.iter().filter_map(|c| c.start_date).min();
    let latest = selected.iter().filter_map(|c| c.end_date).max();
    match (earliest, latest) {
        (Some(start), Some(end)) if start <= end => MonthWindow::spanning(start, end),
        _ => MonthWindow::rolling(Month::containing(today), 1),
    }
}

fn display_type(project_type: &str) -> String {
    if project_type.is_empty() {
        "Unknown".to_string()
    } else {
        project_type.to_string()
    }
}
