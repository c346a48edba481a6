//! Error types for the valuation engine.

use thiserror::Error;

use bondfolio_bonds::BondError;
use bondfolio_core::CoreError;
use bondfolio_math::MathError;

/// Unified error type for all analytics operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalyticsError {
    /// The cash flow discounts to (almost) nothing, so ratios over the
    /// present value are undefined.
    #[error("degenerate cash flow: present value {present_value:.3e} is too close to zero")]
    DegenerateCashFlow {
        /// The present value that was computed.
        present_value: f64,
    },

    /// Invalid input parameter.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Root-finding failed.
    #[error("solver error: {0}")]
    Solver(#[from] MathError),

    /// Bond terms were rejected.
    #[error("bond error: {0}")]
    Bond(#[from] BondError),

    /// Rate conversion failed.
    #[error("rate error: {0}")]
    Core(#[from] CoreError),
}

/// Result type alias for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

impl AnalyticsError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }
}
