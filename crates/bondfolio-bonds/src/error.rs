//! Error types for bond operations.

use thiserror::Error;

/// A specialized Result type for bond operations.
pub type BondResult<T> = Result<T, BondError>;

/// Errors that can occur when defining a bond or building its schedule.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BondError {
    /// Invalid bond specification.
    #[error("Invalid bond specification: {reason}")]
    InvalidSpec {
        /// Description of what's invalid.
        reason: String,
    },

    /// Missing required field.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The missing field name.
        field: &'static str,
    },

    /// Grace window reaches or passes maturity.
    #[error("Grace periods ({grace_periods}) must be fewer than maturity periods ({maturity_periods})")]
    GraceBeyondMaturity {
        /// Requested grace periods.
        grace_periods: u32,
        /// Periods to maturity.
        maturity_periods: u32,
    },

    /// Core library error.
    #[error("Core error: {0}")]
    Core(#[from] bondfolio_core::CoreError),
}

impl BondError {
    /// Creates an invalid specification error.
    #[must_use]
    pub fn invalid_spec(reason: impl Into<String>) -> Self {
        Self::InvalidSpec {
            reason: reason.into(),
        }
    }

    /// Creates a missing field error.
    #[must_use]
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }
}
