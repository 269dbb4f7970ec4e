//! Flowcast CLI - contract cash-flow projection and forecasting
//!
//! Usage: flowcast <COMMAND>
//!
//! Commands:
//!   forecast   Rolling invoice forecast per contract
//!   dashboard  Portfolio metrics and monthly cash position
//!   export     Write the CSV report (contracts, forecast, summary)
//!   check      Validate a portfolio snapshot

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Parser;
use is_terminal::IsTerminal;

use flowcast::application::{
    write_csv, CheckUseCase, DashboardQuery, DashboardUseCase, ForecastQuery, ForecastUseCase,
    ReportOptions, ReportUseCase,
};
use flowcast::cli::{parse_date, Cli, Commands};
use flowcast::config::Config;
use flowcast::domain::entities::{Contract, Stage};
use flowcast::domain::value_objects::{period_end, Month};
use flowcast::infrastructure::PortfolioStore;
use flowcast::ui::views::{CheckView, DashboardView, ForecastView};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(Path::new("."))?;
    let today = Local::now().date_naive();

    match cli.command {
        Commands::Forecast {
            portfolio,
            project_type,
        } => cmd_forecast(
            &portfolio,
            project_type,
            &config,
            today,
            cli.json,
            cli.verbose,
        ),
        Commands::Dashboard {
            portfolio,
            project_type,
            start_date,
            end_date,
        } => cmd_dashboard(
            &portfolio,
            project_type,
            start_date,
            end_date,
            &config,
            today,
            cli.json,
            cli.verbose,
        ),
        Commands::Export {
            portfolio,
            project_type,
            out,
        } => cmd_export(&portfolio, project_type, &out, &config, today, cli.json),
        Commands::Check { portfolio } => cmd_check(&portfolio, &config, cli.json, cli.verbose),
        Commands::Init { portfolio } => cmd_init(&portfolio, today, cli.json),
    }
}

fn supports_color() -> bool {
    std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

/// Load the snapshot and fill in payment terms the snapshot left out with
/// the configured default.
fn load_contracts(portfolio: &Path, config: &Config) -> Result<Vec<Contract>> {
    let mut contracts = PortfolioStore::new(portfolio).load()?;
    for contract in &mut contracts {
        contract
            .net_payment_terms
            .get_or_insert(config.billing.default_net_payment_terms);
    }
    Ok(contracts)
}

fn cmd_forecast(
    portfolio: &Path,
    project_type: Option<String>,
    config: &Config,
    today: NaiveDate,
    json: bool,
    verbose: u8,
) -> Result<()> {
    let contracts = load_contracts(portfolio, config)?;
    let query = ForecastQuery { project_type };
    let result = ForecastUseCase::new(&contracts, config.forecast.months).execute(&query, today);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!(
            "{}",
            ForecastView::new(&result).render(supports_color(), verbose)
        );
    }
    Ok(())
}

fn cmd_dashboard(
    portfolio: &Path,
    project_type: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    config: &Config,
    today: NaiveDate,
    json: bool,
    verbose: u8,
) -> Result<()> {
    let contracts = load_contracts(portfolio, config)?;
    let query = DashboardQuery {
        project_type,
        start_date: start_date.as_deref().map(parse_date).transpose()?,
        end_date: end_date.as_deref().map(parse_date).transpose()?,
    };
    let result = DashboardUseCase::new(&contracts).execute(&query, today);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!(
            "{}",
            DashboardView::new(&result).render(supports_color(), verbose)
        );
    }
    Ok(())
}

fn cmd_export(
    portfolio: &Path,
    project_type: Option<String>,
    out: &PathBuf,
    config: &Config,
    today: NaiveDate,
    json: bool,
) -> Result<()> {
    let contracts = load_contracts(portfolio, config)?;
    let options = ReportOptions {
        project_type,
        months: config.forecast.months,
        collection_rate: config.forecast.collection_rate,
    };
    let report = ReportUseCase::new(&contracts).build(&options, today);
    let written = write_csv(&report, out)?;

    if json {
        let paths: Vec<String> = written
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        println!("{}", serde_json::to_string_pretty(&paths)?);
    } else {
        for path in &written {
            println!("wrote {}", path.display());
        }
    }
    Ok(())
}

fn cmd_check(portfolio: &Path, config: &Config, json: bool, verbose: u8) -> Result<()> {
    let contracts = load_contracts(portfolio, config)?;
    let result = CheckUseCase::new(&contracts).execute();

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!(
            "{}",
            CheckView::new(&result).render(supports_color(), verbose)
        );
    }

    if result.warning_count > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn cmd_init(portfolio: &Path, today: NaiveDate, json: bool) -> Result<()> {
    if portfolio.exists() {
        anyhow::bail!(
            "refusing to overwrite existing snapshot {}",
            portfolio.display()
        );
    }

    let store = PortfolioStore::new(portfolio);
    store.save(&sample_portfolio(today))?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&vec![portfolio.display().to_string()])?
        );
    } else {
        println!("wrote {}", portfolio.display());
    }
    Ok(())
}

/// A small staged contract anchored to the current month, so the forecast
/// and dashboard have something to show right after `init`.
fn sample_portfolio(today: NaiveDate) -> Vec<Contract> {
    let this_month = Month::containing(today);
    let start = this_month.first_day();
    let second_start = this_month.plus(3).first_day();

    let mut contract = Contract::new("P-001").with_stages(vec![
        Stage {
            stage_name: "Design".into(),
            start_date: Some(start),
            end_date: Some(period_end(start, 3)),
            months: 3,
            amount: 24000.0,
        },
        Stage {
            stage_name: "Installation".into(),
            start_date: Some(second_start),
            end_date: Some(period_end(second_start, 3)),
            months: 3,
            amount: 36000.0,
        },
    ]);
    contract.project_name = "Sample Office Fit-Out".into();
    contract.project_type = "MEP".into();
    contract.total_value = 60000.0;
    contract.start_date = Some(start);
    contract.end_date = Some(period_end(start, 6));
    contract.net_payment_terms = Some(30);
    vec![contract]
}
