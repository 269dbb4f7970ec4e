//! Report export use case
//!
//! Builds a three-section report (contracts, forecast, summary) and writes
//! each section as a CSV file. The forecast section applies a configurable
//! collection rate to expected receipts and carries a cumulative column.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::entities::Contract;
use crate::domain::services::{
    allocation_summary, contract_invoice_events, contract_receipt_events, MonthWindow,
};
use crate::domain::value_objects::Month;
use crate::error::FlowcastResult;

#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub project_type: Option<String>,
    /// Length of the forecast section window
    pub months: usize,
    /// Share of invoiced amounts expected to actually collect (0.0..=1.0)
    pub collection_rate: f64,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            project_type: None,
            months: 12,
            collection_rate: 0.8,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportSection {
    pub name: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub sections: Vec<ReportSection>,
}

pub struct ReportUseCase<'a> {
    contracts: &'a [Contract],
}

impl<'a> ReportUseCase<'a> {
    pub fn new(contracts: &'a [Contract]) -> Self {
        Self { contracts }
    }

    pub fn build(&self, options: &ReportOptions, today: NaiveDate) -> Report {
        let selected: Vec<&Contract> = self
            .contracts
            .iter()
            .filter(|c| match &options.project_type {
                Some(wanted) => &c.project_type == wanted,
                None => true,
            })
            .collect();

        Report {
            sections: vec![
                contracts_section(&selected),
                forecast_section(&selected, options, today),
                summary_section(&selected, options, today),
            ],
        }
    }
}

fn contracts_section(contracts: &[&Contract]) -> ReportSection {
    let header = [
        "Project ID",
        "Project Name",
        "Project Type",
        "Invoice Type",
        "Total Value",
        "Start Date",
        "End Date",
        "Net Payment Terms",
        "Stages",
        "Allocated",
        "Remaining",
    ];
    let rows = contracts
        .iter()
        .map(|contract| {
            let allocation = allocation_summary(contract);
            vec![
                contract.project_id.clone(),
                contract.project_name.clone(),
                contract.project_type.clone(),
                contract.invoice_type.to_string(),
                format!("{:.2}", contract.total_value),
                fmt_date(contract.start_date),
                fmt_date(contract.end_date),
                contract.net_terms().to_string(),
                contract.stages.len().to_string(),
                format!("{:.2}", allocation.allocated),
                format!("{:.2}", allocation.remaining),
            ]
        })
        .collect();
    ReportSection {
        name: "contracts".into(),
        header: header.iter().map(|h| h.to_string()).collect(),
        rows,
    }
}

fn forecast_section(
    contracts: &[&Contract],
    options: &ReportOptions,
    today: NaiveDate,
) -> ReportSection {
    let window = MonthWindow::rolling(Month::containing(today), options.months);

    let mut invoiced = vec![0.0; window.len()];
    let mut receivable = vec![0.0; window.len()];
    for contract in contracts {
        let invoices = window.bucket(
            contract_invoice_events(contract)
                .into_iter()
                .map(|e| (e.date, e.amount)),
        );
        let receipts = window.bucket(
            contract_receipt_events(contract)
                .into_iter()
                .map(|e| (e.date, e.amount)),
        );
        for i in 0..window.len() {
            invoiced[i] += invoices[i];
            receivable[i] += receipts[i];
        }
    }

    let filter_label = options.project_type.as_deref().unwrap_or("Mixed");
    let mut cumulative = 0.0;
    let rows = window
        .months()
        .iter()
        .enumerate()
        .map(|(i, month)| {
            let expected = receivable[i] * options.collection_rate;
            cumulative += expected;
            vec![
                month.long_label(),
                filter_label.to_string(),
                format!("{:.2}", invoiced[i]),
                format!("{:.2}", expected),
                format!("{:.2}", cumulative),
            ]
        })
        .collect();

    ReportSection {
        name: "forecast".into(),
        header: vec![
            "Month".into(),
            "Project Type".into(),
            "Invoiced".into(),
            "Expected Receipts".into(),
            "Cumulative Cash Flow".into(),
        ],
        rows,
    }
}

fn summary_section(
    contracts: &[&Contract],
    options: &ReportOptions,
    today: NaiveDate,
) -> ReportSection {
    let total_value: f64 = contracts.iter().map(|c| c.total_value).sum();
    let average = if contracts.is_empty() {
        0.0
    } else {
        total_value / contracts.len() as f64
    };

    let mut rows = vec![
        vec!["Total Contracts".into(), contracts.len().to_string()],
        vec!["Total Contract Value".into(), format!("{total_value:.2}")],
        vec!["Average Contract Value".into(), format!("{average:.2}")],
    ];

    let mut project_types: Vec<&str> = contracts.iter().map(|c| c.project_type.as_str()).collect();
    project_types.sort_unstable();
    project_types.dedup();
    for project_type in project_types {
        let count = contracts
            .iter()
            .filter(|c| c.project_type == project_type)
            .count();
        let label = if project_type.is_empty() {
            "Unknown"
        } else {
            project_type
        };
        rows.push(vec![format!("{label} Contracts"), count.to_string()]);
    }

    for invoice_type in crate::domain::value_objects::InvoiceType::ALL {
        let count = contracts
            .iter()
            .filter(|c| c.invoice_type == invoice_type)
            .count();
        rows.push(vec![
            format!("{invoice_type} Billing Contracts"),
            count.to_string(),
        ]);
    }

    rows.push(vec!["Report Generated".into(), today.to_string()]);
    rows.push(vec![
        "Filter Applied".into(),
        options.project_type.clone().unwrap_or_else(|| "All".into()),
    ]);

    ReportSection {
        name: "summary".into(),
        header: vec!["Metric".into(), "Value".into()],
        rows,
    }
}

fn fmt_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_default()
}

/// Write each section of the report to `<dir>/<section>.csv`.
pub fn write_csv(report: &Report, dir: &Path) -> FlowcastResult<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::new();
    for section in &report.sections {
        let path = dir.join(format!("{}.csv", section.name));
        let mut out = String::new();
        out.push_str(&csv_line(&section.header));
        for row in &section.rows {
            out.push_str(&csv_line(row));
        }
        fs::write(&path, out)?;
        written.push(path);
    }
    Ok(written)
}

fn csv_line(fields: &[String]) -> String {
    let mut line = fields
        .iter()
        .map(|f| csv_field(f))
        .collect::<Vec<_>>()
        .join(",");
    line.push('\n');
    line
}

fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
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

    fn sample_contract() -> Contract {
        let mut c = Contract::new("P-001").with_stages(vec![Stage {
            stage_name: "SD".into(),
            start_date: Some(date(2025, 1, 1)),
            end_date: Some(date(2025, 2, 28)),
            months: 2,
            amount: 6000.0,
        }]);
        c.project_name = "Hospital Wing".into();
        c.project_type = "MEP".into();
        c.invoice_type = InvoiceType::Progress;
        c.total_value = 6000.0;
        c
    }

    #[test]
    fn report_has_three_sections() {
        let contracts = vec![sample_contract()];
        let report =
            ReportUseCase::new(&contracts).build(&ReportOptions::default(), date(2025, 1, 1));
        let names: Vec<&str> = report.sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["contracts", "forecast", "summary"]);
    }

    #[test]
    fn contracts_section_includes_allocation() {
        let contracts = vec![sample_contract()];
        let report =
            ReportUseCase::new(&contracts).build(&ReportOptions::default(), date(2025, 1, 1));
        let row = &report.sections[0].rows[0];
        assert_eq!(row[0], "P-001");
        assert_eq!(row[9], "6000.00"); // allocated
        assert_eq!(row[10], "0.00"); // remaining
    }

    #[test]
    fn forecast_section_applies_collection_rate_and_accumulates() {
        let contracts = vec![sample_contract()];
        let options = ReportOptions {
            collection_rate: 0.5,
            months: 3,
            ..Default::default()
        };
        let report = ReportUseCase::new(&contracts).build(&options, date(2025, 1, 1));
        let forecast = &report.sections[1];
        assert_eq!(forecast.rows.len(), 3);
        // receipts land Jan 31 and Mar 3; halved by the collection rate
        assert_eq!(forecast.rows[0][3], "1500.00");
        assert_eq!(forecast.rows[2][3], "1500.00");
        assert_eq!(forecast.rows[2][4], "3000.00"); // cumulative
    }

    #[test]
    fn summary_counts_types() {
        let contracts = vec![sample_contract()];
        let report =
            ReportUseCase::new(&contracts).build(&ReportOptions::default(), date(2025, 1, 1));
        let summary = &report.sections[2];
        assert!(summary
            .rows
            .iter()
            .any(|r| r[0] == "MEP Contracts" && r[1] == "1"));
        assert!(summary
            .rows
            .iter()
            .any(|r| r[0] == "Progress Billing Contracts" && r[1] == "1"));
    }

    #[test]
    fn csv_field_escapes_commas_and_quotes() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn write_csv_creates_one_file_per_section() {
        let contracts = vec![sample_contract()];
        let report =
            ReportUseCase::new(&contracts).build(&ReportOptions::default(), date(2025, 1, 1));
        let dir = tempfile::tempdir().unwrap();
        let files = write_csv(&report, dir.path()).unwrap();
        assert_eq!(files.len(), 3);
        let contents = std::fs::read_to_string(&files[0]).unwrap();
        assert!(contents.starts_with("Project ID,"));
        assert!(contents.contains("P-001"));
    }
}
