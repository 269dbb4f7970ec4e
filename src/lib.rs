//! Flowcast - contract cash-flow projection and forecasting
//!
//! Flowcast turns a portfolio of contracts (staged billing, monthly
//! breakdowns, payment terms) into dated invoice and receipt schedules,
//! then aggregates them into rolling forecasts, dashboards, and CSV
//! reports.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;

// Re-exports for convenience
pub use application::{
    CheckResult, CheckUseCase, DashboardQuery, DashboardResult, DashboardUseCase, ForecastQuery,
    ForecastResult, ForecastUseCase, Report, ReportOptions, ReportUseCase,
};
pub use config::Config;
pub use domain::entities::{Contract, MonthlyBreakdown, Stage};
pub use domain::services::{
    allocation_summary, contract_invoice_events, contract_receipt_events, InvoiceEvent,
    MonthWindow, ReceiptEvent,
};
pub use domain::value_objects::{InvoiceType, Month};
pub use error::{FlowcastError, FlowcastResult};
pub use infrastructure::PortfolioStore;
