//! Domain entities

mod breakdown;
mod contract;
mod stage;

pub use breakdown::{BreakdownEdit, BreakdownMode, MonthlyBreakdown};
pub use contract::{Contract, DEFAULT_NET_PAYMENT_TERMS};
pub use stage::{Stage, StageEdit};
