//! Domain services - pure calculations over contract snapshots

mod aggregation;
mod allocation;
mod projection;

pub use aggregation::MonthWindow;
pub use allocation::{allocation_summary, AllocationSummary};
pub use projection::{
    contract_invoice_events, contract_receipt_events, receipt_event, stage_invoice_events,
    InvoiceEvent, ReceiptEvent,
};
