//! Portfolio check use case
//!
//! Pre-flight validation of a portfolio snapshot: allocation status per
//! contract plus warnings for stages the projection engine would silently
//! skip. The engine itself never rejects these; this surfaces them so users
//! know why a schedule came back shorter than expected.

use serde::Serialize;

use crate::domain::entities::Contract;
use crate::domain::services::{allocation_summary, AllocationSummary};
use crate::domain::value_objects::InvoiceType;

#[derive(Debug, Clone, Serialize)]
pub struct ContractCheck {
    pub project_id: String,
    pub allocation: AllocationSummary,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub contracts: Vec<ContractCheck>,
    pub warning_count: usize,
}

pub struct CheckUseCase<'a> {
    contracts: &'a [Contract],
}

impl<'a> CheckUseCase<'a> {
    pub fn new(contracts: &'a [Contract]) -> Self {
        Self { contracts }
    }

    pub fn execute(&self) -> CheckResult {
        let contracts: Vec<ContractCheck> = self.contracts.iter().map(check_contract).collect();
        let warning_count = contracts.iter().map(|c| c.warnings.len()).sum();
        CheckResult {
            contracts,
            warning_count,
        }
    }
}

fn check_contract(contract: &Contract) -> ContractCheck {
    let allocation = allocation_summary(contract);
    let mut warnings = Vec::new();

    if allocation.is_over_allocated() {
        warnings.push(format!(
            "stages exceed total value by {:.2}",
            -allocation.remaining
        ));
    }

    for (i, stage) in contract.stages.iter().enumerate() {
        let label = if stage.stage_name.is_empty() {
            format!("stage {}", i + 1)
        } else {
            format!("stage '{}'", stage.stage_name)
        };
        if stage.amount > 0.0 && stage.start_date.is_none() {
            warnings.push(format!("{label} has an amount but no start date"));
        }
        if contract.invoice_type == InvoiceType::Milestone
            && stage.amount > 0.0
            && stage.end_date.is_none()
        {
            warnings.push(format!(
                "{label} has no end date - milestone billing needs one"
            ));
        }
    }

    if contract.invoice_type == InvoiceType::Monthly
        && contract.stages.is_empty()
        && contract
            .monthly_breakdown
            .as_ref()
            .and_then(|b| b.resolved())
            .is_none()
    {
        warnings.push("monthly contract has no stages and no resolved breakdown".to_string());
    }

    ContractCheck {
        project_id: contract.project_id.clone(),
        allocation,
        warnings,
    }
}
