//! # Bondfolio Bonds
//!
//! Bond definitions and cash flow generation.
//!
//! This crate provides:
//!
//! - **Terms**: [`BondTerms`], its builder, and fail-fast validation
//! - **Cash Flows**: the bullet ("American") schedule with grace periods
//!
//! Valuation lives in `bondfolio-analytics`; this crate stays calculation-free
//! beyond building the schedule.
//!
//! ## Example
//!
//! ```rust
//! use bondfolio_bonds::prelude::*;
//!
//! let terms = BondTerms::builder()
//!     .nominal_value(1000.0)
//!     .coupon_rate(0.10)
//!     .maturity_periods(4)
//!     .frequency(1)
//!     .market_rate(0.12)
//!     .build()
//!     .unwrap();
//!
//! let schedule = generate_cash_flow(&terms).unwrap();
//! assert_eq!(schedule.len(), 4);
//! assert_eq!(schedule.entries()[3].total_payment, 1100.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::float_cmp)]

pub mod cashflows;
pub mod error;
pub mod terms;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cashflows::{generate_cash_flow, CashFlowEntry, CashFlowSchedule};
    pub use crate::error::{BondError, BondResult};
    pub use crate::terms::{BondTerms, BondTermsBuilder, TransactionCosts};
    pub use bondfolio_core::types::{GraceType, InterestType};
}

pub use cashflows::{generate_cash_flow, CashFlowEntry, CashFlowSchedule};
pub use error::{BondError, BondResult};
pub use terms::{BondTerms, BondTermsBuilder, TransactionCosts};
