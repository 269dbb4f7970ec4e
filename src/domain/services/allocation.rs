//! Stage allocation summary
//!
//! How much of a contract's total value its stages account for. The
//! sum-of-stages invariant is soft: the engine still projects over-allocated
//! contracts, callers surface the discrepancy.

use serde::Serialize;

use crate::domain::entities::Contract;

/// Tolerance below which a remaining amount counts as fully allocated.
const ALLOCATION_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AllocationSummary {
    pub total_value: f64,
    pub allocated: f64,
    pub remaining: f64,
    /// Share of the total value covered by stages, in percent
    pub percentage: f64,
}

impl AllocationSummary {
    pub fn is_fully_allocated(&self) -> bool {
        self.remaining.abs() < ALLOCATION_TOLERANCE
    }

    pub fn is_over_allocated(&self) -> bool {
        self.remaining < -ALLOCATION_TOLERANCE
    }
}

pub fn allocation_summary(contract: &Contract) -> AllocationSummary {
    let allocated: f64 = contract.stages.iter().map(|stage| stage.amount).sum();
    let total_value = contract.total_value;
    AllocationSummary {
        total_value,
        allocated,
        remaining: total_value - allocated,
        percentage: if total_value > 0.0 {
            allocated / total_value * 100.0
        } else {
            0.0
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Stage;

    fn staged_contract(total: f64, amounts: &[f64]) -> Contract {
        let mut c = Contract::new("P-001");
        c.total_value = total;
        c.stages = amounts
            .iter()
            .map(|&amount| Stage {
                amount,
                ..Stage::named("SD")
            })
            .collect();
        c
    }

    #[test]
    fn sums_stage_amounts() {
        let summary = allocation_summary(&staged_contract(10000.0, &[4000.0, 3000.0]));
        assert_eq!(summary.allocated, 7000.0);
        assert_eq!(summary.remaining, 3000.0);
        assert_eq!(summary.percentage, 70.0);
        assert!(!summary.is_fully_allocated());
    }

    #[test]
    fn fully_allocated_within_a_cent() {
        let summary = allocation_summary(&staged_contract(10000.0, &[9999.995]));
        assert!(summary.is_fully_allocated());
    }

    #[test]
    fn over_allocation_detected() {
        let summary = allocation_summary(&staged_contract(10000.0, &[12000.0]));
        assert!(summary.is_over_allocated());
        assert_eq!(summary.remaining, -2000.0);
    }

    #[test]
    fn zero_total_value_has_zero_percentage() {
        let summary = allocation_summary(&staged_contract(0.0, &[500.0]));
        assert_eq!(summary.percentage, 0.0);
    }
}
