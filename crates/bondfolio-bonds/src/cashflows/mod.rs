//! Cash flow schedules.
//!
//! - [`CashFlowEntry`] / [`CashFlowSchedule`]: the ordered per-period table
//! - [`generate_cash_flow`]: builds the bullet schedule for a [`BondTerms`](crate::BondTerms)

mod generator;
mod schedule;

pub use generator::generate_cash_flow;
pub use schedule::{CashFlowEntry, CashFlowSchedule};
