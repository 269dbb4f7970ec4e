mod check;
mod dashboard;
mod forecast;

pub use check::CheckView;
pub use dashboard::DashboardView;
pub use forecast::ForecastView;
