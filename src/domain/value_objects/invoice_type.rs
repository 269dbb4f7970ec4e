//! Invoice type value object - how a contract bills its value
//!
//! - `Progress`: stage amounts spread evenly across the stage's months
//! - `Milestone`: one invoice per stage, on the stage end date
//! - `Monthly`: fixed monthly amount, driven by the monthly breakdown

use serde::{Deserialize, Serialize};

/// Billing scheme of a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum InvoiceType {
    /// Even distribution across each stage's billing periods (default)
    #[default]
    Progress,
    /// Single invoice at each stage's end date
    Milestone,
    /// Fixed amount per month, from the monthly breakdown
    Monthly,
}

impl InvoiceType {
    pub const ALL: [InvoiceType; 3] = [
        InvoiceType::Progress,
        InvoiceType::Milestone,
        InvoiceType::Monthly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceType::Progress => "Progress",
            InvoiceType::Milestone => "Milestone",
            InvoiceType::Monthly => "Monthly",
        }
    }
}

impl std::fmt::Display for InvoiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for InvoiceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Progress" => Ok(InvoiceType::Progress),
            "Milestone" => Ok(InvoiceType::Milestone),
            "Monthly" => Ok(InvoiceType::Monthly),
            other => Err(format!("unknown invoice type '{other}'")),
        }
    }
}
