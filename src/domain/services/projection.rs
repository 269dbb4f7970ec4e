//! Cash-flow projection engine
//!
//! Pure schedule generation: a contract's billing scheme, payment terms, and
//! stages go in; dated invoice and receipt events come out. No I/O, no
//! stored state - the same snapshot always produces the same schedule.
//!
//! Calendar semantics: stepping "one month" uses `chrono::Months`, which
//! clamps a day that does not exist in the target month to that month's
//! last day (Jan 31 + 1 month = Feb 28/29).
//!
//! Numeric semantics: per-period amounts are plain f64 divisions and are
//! never rounded here; generated amounts sum back to the stage amount only
//! to floating-point tolerance. Rounding happens at display time.

use chrono::{Days, Months, NaiveDate};
use serde::Serialize;

use crate::domain::entities::{Contract, MonthlyBreakdown, Stage};
use crate::domain::value_objects::InvoiceType;

/// A scheduled billing date and amount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InvoiceEvent {
    pub date: NaiveDate,
    pub amount: f64,
}

/// An expected-payment date and amount, offset from an invoice by the
/// contract's net payment terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReceiptEvent {
    pub date: NaiveDate,
    pub amount: f64,
}

/// Invoice schedule for a single stage.
///
/// A stage with no start date or no positive amount produces an empty
/// schedule; this logic runs while users are still filling in forms, so
/// incomplete input degrades silently instead of erroring. A Milestone
/// stage additionally needs an end date.
pub fn stage_invoice_events(
    invoice_type: InvoiceType,
    breakdown: Option<&MonthlyBreakdown>,
    stage: &Stage,
) -> Vec<InvoiceEvent> {
    let Some(start) = stage.start_date else {
        return Vec::new();
    };
    if stage.amount <= 0.0 {
        return Vec::new();
    }

    match invoice_type {
        InvoiceType::Milestone => stage
            .end_date
            .map(|date| {
                vec![InvoiceEvent {
                    date,
                    amount: stage.amount,
                }]
            })
            .unwrap_or_default(),
        InvoiceType::Monthly => {
            let (amount, count) = breakdown
                .and_then(MonthlyBreakdown::resolved)
                .unwrap_or_else(|| even_split(stage));
            monthly_run(start, amount, count)
        }
        InvoiceType::Progress => {
            let (amount, count) = even_split(stage);
            monthly_run(start, amount, count)
        }
    }
}

/// Invoice schedule for a whole contract, chronologically ordered.
///
/// A Monthly contract with no stages but a resolved breakdown bills
/// directly from the contract start date.
pub fn contract_invoice_events(contract: &Contract) -> Vec<InvoiceEvent> {
    let breakdown = contract.active_breakdown();

    if contract.invoice_type == InvoiceType::Monthly && contract.stages.is_empty() {
        if let (Some(start), Some((amount, count))) = (
            contract.start_date,
            breakdown.and_then(MonthlyBreakdown::resolved),
        ) {
            return monthly_run(start, amount, count);
        }
        return Vec::new();
    }

    let mut events: Vec<InvoiceEvent> = contract
        .stages
        .iter()
        .flat_map(|stage| stage_invoice_events(contract.invoice_type, breakdown, stage))
        .collect();
    // stable sort keeps billing order for same-day events across stages
    events.sort_by_key(|event| event.date);
    events
}

/// Shift a single invoice to its expected receipt: calendar days, not
/// business days, amount unchanged.
pub fn receipt_event(invoice: InvoiceEvent, net_payment_terms: u32) -> ReceiptEvent {
    ReceiptEvent {
        date: invoice
            .date
            .checked_add_days(Days::new(net_payment_terms as u64))
            .unwrap_or(invoice.date),
        amount: invoice.amount,
    }
}

/// Receipt schedule for a whole contract, chronologically ordered.
pub fn contract_receipt_events(contract: &Contract) -> Vec<ReceiptEvent> {
    contract_invoice_events(contract)
        .into_iter()
        .map(|invoice| receipt_event(invoice, contract.net_terms()))
        .collect()
}

fn even_split(stage: &Stage) -> (f64, u32) {
    let months = stage.months.max(1);
    (stage.amount / months as f64, months)
}

fn monthly_run(start: NaiveDate, amount: f64, count: u32) -> Vec<InvoiceEvent> {
    (0..count)
        .filter_map(|i| start.checked_add_months(Months::new(i)))
        .map(|date| InvoiceEvent { date, amount })
        .collect()
}
