//! Error types for the Bondfolio core crate.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The core error type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Interest rate outside the domain of a conversion.
    #[error("Invalid rate {value}: {reason}")]
    InvalidRate {
        /// The offending rate.
        value: f64,
        /// Why the rate cannot be used.
        reason: String,
    },

    /// Compounding or payment frequency of zero.
    #[error("Invalid frequency: {0} periods per year")]
    InvalidFrequency(u32),

    /// A string could not be parsed into a domain enum.
    #[error("Cannot parse {kind} from '{input}'")]
    Parse {
        /// The type being parsed (e.g. "currency").
        kind: &'static str,
        /// The rejected input.
        input: String,
    },
}

impl CoreError {
    /// Creates an invalid rate error.
    #[must_use]
    pub fn invalid_rate(value: f64, reason: impl Into<String>) -> Self {
        Self::InvalidRate {
            value,
            reason: reason.into(),
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(kind: &'static str, input: impl Into<String>) -> Self {
        Self::Parse {
            kind,
            input: input.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::invalid_rate(-13.0, "compounding base is not positive");
        assert!(err.to_string().contains("Invalid rate -13"));

        let err = CoreError::parse("currency", "XYZ");
        assert_eq!(err.to_string(), "Cannot parse currency from 'XYZ'");
    }

    #[test]
    fn test_frequency_error() {
        assert!(CoreError::InvalidFrequency(0)
            .to_string()
            .contains("0 periods"));
    }
}
