//! Application layer - use cases wiring portfolio snapshots to the engine

mod check;
mod dashboard;
mod forecast;
mod report;

pub use check::{CheckResult, CheckUseCase, ContractCheck};
pub use dashboard::{DashboardQuery, DashboardResult, DashboardUseCase, MonthActivity, TypeActivity};
pub use forecast::{ForecastQuery, ForecastResult, ForecastRow, ForecastUseCase};
pub use report::{write_csv, Report, ReportOptions, ReportSection, ReportUseCase};
