use std::fs;
use std::process::Command;

use chrono::{Datelike, Local};
use tempfile::tempdir;

// The forecast window rolls forward from the current month, so the fixture
// anchors its stage to today's month to stay inside the window.
fn portfolio_for_this_month() -> String {
    let today = Local::now().date_naive();
    let start = format!("{:04}-{:02}-01", today.year(), today.month());
    format!(
        r#"{{
  "contracts": [
    {{
      "project_id": "P-010",
      "project_name": "Depot Retrofit",
      "project_type": "HAS",
      "invoice_type": "Progress",
      "total_value": 2000.0,
      "stages": [
        {{
          "stage_name": "Install",
          "start_date": "{start}",
          "months": 2,
          "amount": 2000.0
        }}
      ]
    }}
  ]
}}
"#
    )
}

#[test]
fn test_forecast_json_buckets_current_month() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("portfolio.json"), portfolio_for_this_month()).unwrap();

    let bin = env!("CARGO_BIN_EXE_flowcast");
    let output = Command::new(bin)
        .current_dir(dir.path())
        .args(["forecast", "--json"])
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "forecast failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["months"].as_array().unwrap().len(), 12);

    let rows = json["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["project_id"], "P-010");

    // 2000 over two months, starting this month.
    let values = rows[0]["monthly_values"].as_array().unwrap();
    assert_eq!(values[0], 1000.0);
    assert_eq!(values[1], 1000.0);
    assert_eq!(values[2], 0.0);

    let totals = json["totals"].as_array().unwrap();
    assert_eq!(totals[0], 1000.0);
    assert_eq!(totals[1], 1000.0);
}

#[test]
fn test_forecast_window_length_from_env() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("portfolio.json"), portfolio_for_this_month()).unwrap();

    let bin = env!("CARGO_BIN_EXE_flowcast");
    let output = Command::new(bin)
        .current_dir(dir.path())
        .env("FLOWCAST_FORECAST_MONTHS", "6")
        .args(["forecast", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["months"].as_array().unwrap().len(), 6);
}

#[test]
fn test_forecast_filter_with_no_matches_renders_notice() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("portfolio.json"), portfolio_for_this_month()).unwrap();

    let bin = env!("CARGO_BIN_EXE_flowcast");
    let output = Command::new(bin)
        .current_dir(dir.path())
        .args(["forecast", "--project-type", "MEP"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("No contracts matched."),
        "expected empty-portfolio notice; got:\n{}",
        stdout
    );
}
