//! Contract entity
//!
//! A billable engagement: total value, billing scheme, payment terms, and an
//! ordered list of stages (insertion order = billing order). The projection
//! engine consumes contracts as immutable snapshots.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{MonthlyBreakdown, Stage};
use crate::domain::value_objects::InvoiceType;

pub const DEFAULT_NET_PAYMENT_TERMS: u32 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    /// Unique key across the portfolio
    pub project_id: String,
    #[serde(default)]
    pub project_name: String,
    /// Open-set tag (e.g. MEP, HAS, SM, FS)
    #[serde(default)]
    pub project_type: String,
    #[serde(default)]
    pub invoice_type: InvoiceType,
    #[serde(default)]
    pub total_value: f64,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Calendar days between invoice and expected payment. `None` means the
    /// snapshot left it out; callers resolve it against the configured
    /// default before projection, [`Contract::net_terms`] falls back to 30.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_payment_terms: Option<u32>,
    #[serde(default)]
    pub stages: Vec<Stage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_breakdown: Option<MonthlyBreakdown>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
}

impl Contract {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            project_name: String::new(),
            project_type: String::new(),
            invoice_type: InvoiceType::default(),
            total_value: 0.0,
            start_date: None,
            end_date: None,
            net_payment_terms: None,
            stages: Vec::new(),
            monthly_breakdown: None,
            account_name: None,
            account_number: None,
        }
    }

    pub fn with_stages(mut self, stages: Vec<Stage>) -> Self {
        self.stages = stages;
        self
    }

    /// Effective net payment terms, falling back to the built-in 30 days.
    pub fn net_terms(&self) -> u32 {
        self.net_payment_terms.unwrap_or(DEFAULT_NET_PAYMENT_TERMS)
    }

    /// The breakdown, but only for billing schemes that honor one.
    /// Milestone contracts ignore any stored breakdown.
    pub fn active_breakdown(&self) -> Option<&MonthlyBreakdown> {
        match self.invoice_type {
            InvoiceType::Progress | InvoiceType::Monthly => self.monthly_breakdown.as_ref(),
            InvoiceType::Milestone => None,
        }
    }
}
