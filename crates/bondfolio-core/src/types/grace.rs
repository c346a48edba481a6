//! Grace period treatment.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// How payments behave during the initial grace window.
///
/// Grace never forgives principal: under a bullet schedule the full face
/// value is still repaid in the final period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GraceType {
    /// No grace; every period pays its coupon.
    #[default]
    None,
    /// Interest only: the coupon is paid, no principal.
    Partial,
    /// Total moratorium: nothing is paid during grace.
    Total,
}

impl GraceType {
    /// Returns the identifier used in files and on the command line.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            GraceType::None => "none",
            GraceType::Partial => "partial",
            GraceType::Total => "total",
        }
    }

    /// Returns true if coupons are withheld during grace.
    #[must_use]
    pub fn suspends_coupon(&self) -> bool {
        matches!(self, GraceType::Total)
    }
}

impl fmt::Display for GraceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GraceType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(GraceType::None),
            "partial" => Ok(GraceType::Partial),
            "total" => Ok(GraceType::Total),
            _ => Err(CoreError::parse("grace type", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grace_parse_roundtrip() {
        for grace in [GraceType::None, GraceType::Partial, GraceType::Total] {
            assert_eq!(grace.as_str().parse::<GraceType>().unwrap(), grace);
        }
        assert!("some".parse::<GraceType>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&GraceType::Partial).unwrap();
        assert_eq!(json, "\"partial\"");
    }

    #[test]
    fn test_suspends_coupon() {
        assert!(GraceType::Total.suspends_coupon());
        assert!(!GraceType::Partial.suspends_coupon());
    }
}
