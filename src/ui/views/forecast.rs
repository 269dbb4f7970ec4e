//! Forecast table view

use crate::application::ForecastResult;
use crate::ui::text::{money, paint, BOLD, DIM};

pub struct ForecastView<'a> {
    result: &'a ForecastResult,
}

impl<'a> ForecastView<'a> {
    pub fn new(result: &'a ForecastResult) -> Self {
        Self { result }
    }

    pub fn render(&self, supports_color: bool, verbose: u8) -> String {
        let mut out = String::new();

        out.push_str(&paint("Cash-Flow Forecast", BOLD, supports_color));
        out.push('\n');
        if let (Some(first), Some(last)) = (self.result.months.first(), self.result.months.last()) {
            out.push_str(&format!("  Window: {first} - {last}\n"));
        }
        out.push_str(&format!("  Contracts: {}\n\n", self.result.rows.len()));

        if self.result.rows.is_empty() {
            out.push_str("No contracts matched.\n");
            return out;
        }

        for row in &self.result.rows {
            out.push_str(&format!(
                "{}  {}  [{} / {}]  total {}\n",
                paint(&row.project_id, BOLD, supports_color),
                row.project_name,
                row.project_type,
                row.invoice_type,
                money(row.total_value),
            ));
            let mut any = false;
            for (month, value) in self.result.months.iter().zip(&row.monthly_values) {
                if *value != 0.0 {
                    out.push_str(&format!("    {month}  {}\n", money(*value)));
                    any = true;
                } else if verbose > 0 {
                    // full month grid, zero buckets dimmed
                    out.push_str(&paint(
                        &format!("    {month}  {}\n", money(0.0)),
                        DIM,
                        supports_color,
                    ));
                    any = true;
                }
            }
            if !any {
                out.push_str(&paint(
                    "    no invoices projected in this window\n",
                    DIM,
                    supports_color,
                ));
            }
            out.push('\n');
        }

        out.push_str(&paint("Monthly totals", BOLD, supports_color));
        out.push('\n');
        for (month, total) in self.result.months.iter().zip(&self.result.totals) {
            out.push_str(&format!("  {month:<10} {:>14}\n", money(*total)));
        }

        out
    }
}
