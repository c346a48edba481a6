//! # Bondfolio Math
//!
//! Numerical utilities for the Bondfolio valuation engine.
//!
//! This crate provides:
//!
//! - **Solvers**: Newton-Raphson root finding with an optional lower bound,
//!   in a strict flavour (non-convergence is an error) and a best-effort
//!   flavour (non-convergence is reported through [`SolverResult::converged`]).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{
        newton_raphson, newton_raphson_best_effort, SolverConfig, SolverResult,
    };
}

pub use error::{MathError, MathResult};
