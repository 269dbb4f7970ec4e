//! Flowcast CLI definition
//!
//! Usage: flowcast <COMMAND>
//!
//! Commands:
//!   forecast   Rolling 12-month invoice forecast per contract
//!   dashboard  Portfolio metrics and monthly cash position
//!   export     Write CSV report sections to a directory
//!   check      Validate a portfolio snapshot

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::error::{FlowcastError, FlowcastResult};

const DEFAULT_PORTFOLIO: &str = "portfolio.json";

/// Flowcast - contract cash-flow projection and forecasting
#[derive(Parser, Debug)]
#[command(name = "flowcast")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit machine-readable JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rolling invoice forecast per contract
    Forecast {
        /// Path to the portfolio snapshot
        #[arg(short, long, default_value = DEFAULT_PORTFOLIO)]
        portfolio: PathBuf,

        /// Restrict to one project type
        #[arg(long)]
        project_type: Option<String>,
    },

    /// Portfolio metrics and monthly invoice/receipt totals
    Dashboard {
        /// Path to the portfolio snapshot
        #[arg(short, long, default_value = DEFAULT_PORTFOLIO)]
        portfolio: PathBuf,

        /// Restrict to one project type
        #[arg(long)]
        project_type: Option<String>,

        /// Window start (YYYY-MM-DD); needs --end-date
        #[arg(long, requires = "end_date")]
        start_date: Option<String>,

        /// Window end (YYYY-MM-DD); needs --start-date
        #[arg(long, requires = "start_date")]
        end_date: Option<String>,
    },

    /// Write the CSV report (contracts, forecast, summary)
    Export {
        /// Path to the portfolio snapshot
        #[arg(short, long, default_value = DEFAULT_PORTFOLIO)]
        portfolio: PathBuf,

        /// Restrict to one project type
        #[arg(long)]
        project_type: Option<String>,

        /// Directory to write the CSV files into
        #[arg(short, long, default_value = "reports")]
        out: PathBuf,
    },

    /// Validate a portfolio snapshot and report allocation status
    Check {
        /// Path to the portfolio snapshot
        #[arg(short, long, default_value = DEFAULT_PORTFOLIO)]
        portfolio: PathBuf,
    },

    /// Write a starter portfolio snapshot to get going
    Init {
        /// Path to write the snapshot to (refuses to overwrite)
        #[arg(short, long, default_value = DEFAULT_PORTFOLIO)]
        portfolio: PathBuf,
    },
}

/// Parse a `YYYY-MM-DD` CLI argument.
pub fn parse_date(value: &str) -> FlowcastResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| FlowcastError::InvalidDate {
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forecast_defaults() {
        let cli = Cli::try_parse_from(["flowcast", "forecast"]).unwrap();
        match cli.command {
            Commands::Forecast {
                portfolio,
                project_type,
            } => {
                assert_eq!(portfolio, PathBuf::from("portfolio.json"));
                assert_eq!(project_type, None);
            }
            _ => panic!("expected forecast"),
        }
        assert!(!cli.json);
    }

    #[test]
    fn json_flag_is_global() {
        let cli = Cli::try_parse_from(["flowcast", "dashboard", "--json"]).unwrap();
        assert!(cli.json);
        let cli = Cli::try_parse_from(["flowcast", "--json", "dashboard"]).unwrap();
        assert!(cli.json);
    }

    #[test]
    fn dashboard_accepts_date_span() {
        let cli = Cli::try_parse_from([
            "flowcast",
            "dashboard",
            "--start-date",
            "2025-01-01",
            "--end-date",
            "2025-12-31",
        ])
        .unwrap();
        match cli.command {
            Commands::Dashboard {
                start_date,
                end_date,
                ..
            } => {
                assert_eq!(start_date.as_deref(), Some("2025-01-01"));
                assert_eq!(end_date.as_deref(), Some("2025-12-31"));
            }
            _ => panic!("expected dashboard"),
        }
    }

    #[test]
    fn dashboard_rejects_one_sided_span() {
        assert!(
            Cli::try_parse_from(["flowcast", "dashboard", "--start-date", "2025-01-01"]).is_err()
        );
        assert!(Cli::try_parse_from(["flowcast", "dashboard", "--end-date", "2025-12-31"]).is_err());
    }

    #[test]
    fn verbose_flag_counts_and_is_global() {
        let cli = Cli::try_parse_from(["flowcast", "-vv", "forecast"]).unwrap();
        assert_eq!(cli.verbose, 2);
        let cli = Cli::try_parse_from(["flowcast", "check", "-v"]).unwrap();
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn init_default_path() {
        let cli = Cli::try_parse_from(["flowcast", "init"]).unwrap();
        match cli.command {
            Commands::Init { portfolio } => {
                assert_eq!(portfolio, PathBuf::from("portfolio.json"));
            }
            _ => panic!("expected init"),
        }
    }

    #[test]
    fn export_default_out_dir() {
        let cli = Cli::try_parse_from(["flowcast", "export"]).unwrap();
        match cli.command {
            Commands::Export { out, .. } => assert_eq!(out, PathBuf::from("reports")),
            _ => panic!("expected export"),
        }
    }

    #[test]
    fn parse_date_accepts_iso_dates_only() {
        assert_eq!(
            parse_date("2025-03-01").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
        );
        assert!(parse_date("03/01/2025").is_err());
        assert!(parse_date("2025-13-01").is_err());
    }
}
