//! Value objects - immutable domain primitives

mod invoice_type;
mod month;

pub use invoice_type::InvoiceType;
pub use month::{months_spanned, period_end, period_start, Month};
