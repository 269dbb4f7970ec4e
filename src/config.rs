//! Configuration module for Flowcast
//!
//! Configuration hierarchy:
//! 1. Environment variables (FLOWCAST_*) (highest priority)
//! 2. Project config (./flowcast.toml)
//! 3. User config (~/.config/flowcast/config.toml)
//! 4. Built-in defaults (lowest priority)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FlowcastError, FlowcastResult};

pub const PROJECT_CONFIG_FILE: &str = "flowcast.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub forecast: ForecastConfig,
    pub billing: BillingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Length of the rolling forecast window, in months
    pub months: usize,
    /// Share of invoiced amounts assumed to collect, applied in reports
    pub collection_rate: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            months: 12,
            collection_rate: 0.8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingConfig {
    /// Fallback net payment terms, in calendar days
    pub default_net_payment_terms: u32,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            default_net_payment_terms: 30,
        }
    }
}

/// Partial config as it appears in a TOML file; absent sections and keys
/// fall through to the layer below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    forecast: ForecastFile,
    billing: BillingFile,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ForecastFile {
    months: Option<usize>,
    collection_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct BillingFile {
    default_net_payment_terms: Option<u32>,
}

impl Config {
    /// Load configuration for a project directory, applying the full
    /// hierarchy.
    pub fn load(project_dir: &Path) -> FlowcastResult<Self> {
        let mut config = Config::default();

        if let Some(user_path) = user_config_path() {
            if user_path.exists() {
                config.overlay(&parse_file(&user_path)?);
            }
        }

        let project_path = project_dir.join(PROJECT_CONFIG_FILE);
        if project_path.exists() {
            config.overlay(&parse_file(&project_path)?);
        }

        config.apply_env(std::env::vars());
        Ok(config)
    }

    fn overlay(&mut self, file: &ConfigFile) {
        if let Some(months) = file.forecast.months {
            self.forecast.months = months;
        }
        if let Some(rate) = file.forecast.collection_rate {
            self.forecast.collection_rate = rate;
        }
        if let Some(terms) = file.billing.default_net_payment_terms {
            self.billing.default_net_payment_terms = terms;
        }
    }

    fn apply_env(&mut self, vars: impl Iterator<Item = (String, String)>) {
        for (key, value) in vars {
            match key.as_str() {
                "FLOWCAST_FORECAST_MONTHS" => {
                    if let Ok(months) = value.parse() {
                        self.forecast.months = months;
                    }
                }
                "FLOWCAST_COLLECTION_RATE" => {
                    if let Ok(rate) = value.parse() {
                        self.forecast.collection_rate = rate;
                    }
                }
                "FLOWCAST_NET_PAYMENT_TERMS" => {
                    if let Ok(terms) = value.parse() {
                        self.billing.default_net_payment_terms = terms;
                    }
                }
                _ => {}
            }
        }
    }
}

fn parse_file(path: &Path) -> FlowcastResult<ConfigFile> {
    let raw = fs::read_to_string(path)?;
    toml::from_str(&raw).map_err(|e| FlowcastError::InvalidConfig {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("flowcast").join("config.toml"))
}
