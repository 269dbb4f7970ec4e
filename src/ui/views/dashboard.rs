//! Dashboard view

use crate::application::DashboardResult;
use crate::ui::text::{money, paint, BOLD, DIM, GREEN, RED};

pub struct DashboardView<'a> {
    result: &'a DashboardResult,
}

impl<'a> DashboardView<'a> {
    pub fn new(result: &'a DashboardResult) -> Self {
        Self { result }
    }

    pub fn render(&self, supports_color: bool, verbose: u8) -> String {
        let r = self.result;
        let mut out = String::new();

        out.push_str(&paint("Portfolio Dashboard", BOLD, supports_color));
        out.push('\n');
        out.push_str(&format!(
            "  Contracts: {}   Total value: {}   Average: {}\n",
            r.total_contracts,
            money(r.total_value),
            money(r.average_value),
        ));
        out.push_str(&format!(
            "  Next month receipts: {}\n\n",
            money(r.next_month_receipts)
        ));

        if !r.project_type_counts.is_empty() {
            let types: Vec<String> = r
                .project_type_counts
                .iter()
                .map(|(name, count)| format!("{name} {count}"))
                .collect();
            out.push_str(&format!("  By project type: {}\n", types.join(", ")));
        }
        if !r.invoice_type_counts.is_empty() {
            let types: Vec<String> = r
                .invoice_type_counts
                .iter()
                .map(|(name, count)| format!("{name} {count}"))
                .collect();
            out.push_str(&format!("  By invoice type: {}\n", types.join(", ")));
        }
        out.push('\n');

        out.push_str(&format!(
            "  {:<16} {:>14} {:>14} {:>14}\n",
            "Month", "Invoiced", "Receipts", "Net"
        ));
        for month in &r.monthly {
            let net = money(month.net_cash_flow);
            let net = if month.net_cash_flow < 0.0 {
                paint(&net, RED, supports_color)
            } else {
                paint(&net, GREEN, supports_color)
            };
            out.push_str(&format!(
                "  {:<16} {:>14} {:>14} {:>14}\n",
                month.month,
                money(month.invoices),
                money(month.receipts),
                net,
            ));
            if verbose > 0 {
                for (name, split) in &month.by_project_type {
                    out.push_str(&paint(
                        &format!(
                            "    {:<14} {:>14} {:>14}\n",
                            name,
                            money(split.invoices),
                            money(split.receipts),
                        ),
                        DIM,
                        supports_color,
                    ));
                }
            }
        }

        out
    }
}
