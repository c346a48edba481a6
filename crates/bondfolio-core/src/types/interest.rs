//! Interest rate quotation basis.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};
use crate::rates::nominal_to_effective;

/// How a quoted rate should be read.
///
/// A nominal rate carries its capitalization frequency, so the
/// "capitalization is required for nominal rates" rule is enforced by the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InterestType {
    /// The quoted rate is already effective.
    #[default]
    Effective,
    /// The quoted rate is nominal and compounds `capitalization` times a year.
    Nominal {
        /// Compounding periods per year.
        capitalization: u32,
    },
}

impl InterestType {
    /// Returns the kind without its parameters.
    #[must_use]
    pub fn kind(&self) -> InterestKind {
        match self {
            InterestType::Effective => InterestKind::Effective,
            InterestType::Nominal { .. } => InterestKind::Nominal,
        }
    }

    /// Returns the capitalization frequency for nominal rates.
    #[must_use]
    pub fn capitalization(&self) -> Option<u32> {
        match self {
            InterestType::Effective => None,
            InterestType::Nominal { capitalization } => Some(*capitalization),
        }
    }

    /// Converts a quoted rate into its effective equivalent.
    pub fn effective_rate(&self, quoted_rate: f64) -> CoreResult<f64> {
        match self {
            InterestType::Effective => Ok(quoted_rate),
            InterestType::Nominal { capitalization } => {
                let effective = nominal_to_effective(quoted_rate, *capitalization)?;
                log::debug!(
                    "converted nominal {} (capitalization {}) to effective {}",
                    quoted_rate,
                    capitalization,
                    effective
                );
                Ok(effective)
            }
        }
    }
}

impl fmt::Display for InterestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterestType::Effective => write!(f, "effective"),
            InterestType::Nominal { capitalization } => {
                write!(f, "nominal (capitalization {capitalization})")
            }
        }
    }
}

/// Parameter-free interest kind, used for configuration defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InterestKind {
    /// Effective rates.
    #[default]
    Effective,
    /// Nominal rates.
    Nominal,
}

impl InterestKind {
    /// Returns the identifier used in files and on the command line.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            InterestKind::Effective => "effective",
            InterestKind::Nominal => "nominal",
        }
    }

    /// Attaches a capitalization frequency, producing a full [`InterestType`].
    ///
    /// The capitalization is ignored for effective rates.
    #[must_use]
    pub fn with_capitalization(&self, capitalization: u32) -> InterestType {
        match self {
            InterestKind::Effective => InterestType::Effective,
            InterestKind::Nominal => InterestType::Nominal { capitalization },
        }
    }
}

impl fmt::Display for InterestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InterestKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "effective" => Ok(InterestKind::Effective),
            "nominal" => Ok(InterestKind::Nominal),
            _ => Err(CoreError::parse("interest type", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_effective_is_identity() {
        assert_eq!(InterestType::Effective.effective_rate(0.12).unwrap(), 0.12);
    }

    #[test]
    fn test_nominal_conversion() {
        let it = InterestType::Nominal { capitalization: 2 };
        assert_relative_eq!(it.effective_rate(0.10).unwrap(), 0.1025, epsilon = 1e-12);
        assert_eq!(it.capitalization(), Some(2));
        assert_eq!(it.kind(), InterestKind::Nominal);
    }

    #[test]
    fn test_nominal_zero_capitalization_errors() {
        let it = InterestType::Nominal { capitalization: 0 };
        assert!(it.effective_rate(0.10).is_err());
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&InterestType::Nominal { capitalization: 12 }).unwrap();
        assert_eq!(json, r#"{"type":"nominal","capitalization":12}"#);

        let back: InterestType = serde_json::from_str(r#"{"type":"effective"}"#).unwrap();
        assert_eq!(back, InterestType::Effective);
    }

    #[test]
    fn test_kind_with_capitalization() {
        assert_eq!(
            InterestKind::Nominal.with_capitalization(4),
            InterestType::Nominal { capitalization: 4 }
        );
        assert_eq!(
            InterestKind::Effective.with_capitalization(4),
            InterestType::Effective
        );
    }
}
