//! # Bondfolio Analytics
//!
//! Valuation engine for bullet bonds.
//!
//! This crate provides:
//! - **Pricing**: present value of a cash flow schedule
//! - **Risk**: Macaulay and modified duration, convexity, price change estimates
//! - **Yields**: Newton-Raphson IRR for the investor return rate (TREA) and the
//!   issuer cost rate (TCEA)
//! - **Analysis**: [`analyze_bond`], which runs the whole pipeline and returns a
//!   [`ValuationResult`]
//!
//! ## Architecture
//!
//! `bondfolio-analytics` depends on `bondfolio-bonds` for terms and cash
//! flows, but `bondfolio-bonds` does NOT depend on this crate.
//!
//! Every function is pure: identical inputs give bit-identical outputs.
//!
//! ## Usage
//!
//! ```rust
//! use bondfolio_analytics::prelude::*;
//! use bondfolio_bonds::prelude::*;
//!
//! let terms = BondTerms::builder()
//!     .nominal_value(1000.0)
//!     .coupon_rate(0.08)
//!     .maturity_periods(10)
//!     .frequency(2)
//!     .market_rate(0.09)
//!     .build()
//!     .unwrap();
//!
//! let result = analyze_bond(&terms).unwrap();
//! assert!(result.present_value < 1000.0);
//! assert!(result.modified_duration < result.duration);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod analysis;
pub mod error;
pub mod pricing;
pub mod risk;
pub mod yields;

pub use analysis::{
    analyze_bond, analyze_bond_with, analyze_many, SummaryField, SummaryUnit, ValuationResult,
};
pub use error::{AnalyticsError, AnalyticsResult};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::analysis::{analyze_bond, analyze_many, SummaryField, SummaryUnit, ValuationResult};
    pub use crate::error::{AnalyticsError, AnalyticsResult};
    pub use crate::pricing::present_value;
    pub use crate::risk::{
        convexity, macaulay_duration, modified_duration, price_change_from_duration,
        price_change_with_convexity, price_metrics, PriceMetrics,
    };
    pub use crate::yields::{cost_rate, return_rate, IrrSolver, YieldPerspective, YieldSolution};
}
