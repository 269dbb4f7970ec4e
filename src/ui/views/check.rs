//! Portfolio check view

use crate::application::CheckResult;
use crate::ui::text::{money, paint, BOLD, DIM, GREEN, YELLOW};

pub struct CheckView<'a> {
    result: &'a CheckResult,
}

impl<'a> CheckView<'a> {
    pub fn new(result: &'a CheckResult) -> Self {
        Self { result }
    }

    pub fn render(&self, supports_color: bool, verbose: u8) -> String {
        let mut out = String::new();

        out.push_str(&paint("Portfolio Check", BOLD, supports_color));
        out.push('\n');

        for contract in &self.result.contracts {
            out.push_str(&format!(
                "  {}  {:.1}% allocated ({} remaining)\n",
                paint(&contract.project_id, BOLD, supports_color),
                contract.allocation.percentage,
                money(contract.allocation.remaining),
            ));
            if verbose > 0 {
                out.push_str(&paint(
                    &format!(
                        "    staged {} of {}\n",
                        money(contract.allocation.allocated),
                        money(contract.allocation.total_value),
                    ),
                    DIM,
                    supports_color,
                ));
            }
            for warning in &contract.warnings {
                out.push_str(&format!(
                    "    {} {warning}\n",
                    paint("⚠", YELLOW, supports_color)
                ));
            }
        }

        out.push('\n');
        if self.result.warning_count == 0 {
            out.push_str(&format!(
                "{} no warnings across {} contract(s)\n",
                paint("✓", GREEN, supports_color),
                self.result.contracts.len(),
            ));
        } else {
            out.push_str(&format!(
                "{} {} warning(s) across {} contract(s)\n",
                paint("⚠", YELLOW, supports_color),
                self.result.warning_count,
                self.result.contracts.len(),
            ));
        }

        out
    }
}
