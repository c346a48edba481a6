//! Internal rate of return.
//!
//! The solver finds the annual rate `r`, compounded `f` times a year, at
//! which the discounted schedule equals a price:
//!
//! ```text
//! Investor:  -outlay   + Σ CF_p / (1 + r/f)^p = 0
//! Issuer:    +proceeds - Σ CF_p / (1 + r/f)^p = 0
//! ```
//!
//! and annualizes it as `(1 + r/f)^f - 1`. The investor side gives the
//! return rate (TREA); the issuer side gives the cost rate (TCEA).
//!
//! # Usage
//!
//! ```rust
//! use bondfolio_analytics::yields::{IrrSolver, YieldPerspective};
//! use bondfolio_bonds::prelude::*;
//!
//! let terms = BondTerms::builder()
//!     .nominal_value(1000.0)
//!     .coupon_rate(0.10)
//!     .maturity_periods(4)
//!     .frequency(1)
//!     .market_rate(0.10)
//!     .build()
//!     .unwrap();
//! let schedule = generate_cash_flow(&terms).unwrap();
//!
//! // Bought at par, the bond yields its coupon
//! let solution = IrrSolver::new()
//!     .solve(&schedule, 1000.0, 1, YieldPerspective::Investor)
//!     .unwrap();
//! assert!(solution.converged);
//! assert!((solution.annual_rate - 0.10).abs() < 1e-9);
//! ```

mod irr;

pub use irr::{
    cost_rate, return_rate, IrrSolver, YieldPerspective, YieldSolution, DEFAULT_INITIAL_GUESS,
    DEFAULT_RATE_FLOOR,
};
