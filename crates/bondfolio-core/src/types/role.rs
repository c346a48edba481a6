//! User roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// The economic side a user acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Raises funds by issuing bonds; cares about the cost rate.
    Issuer,
    /// Buys bonds; cares about the return rate.
    Investor,
}

impl Role {
    /// Returns the identifier used in files and on the command line.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Issuer => "issuer",
            Role::Investor => "investor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "issuer" | "emisor" => Ok(Role::Issuer),
            "investor" | "inversor" => Ok(Role::Investor),
            _ => Err(CoreError::parse("role", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!("Issuer".parse::<Role>().unwrap(), Role::Issuer);
        assert_eq!("inversor".parse::<Role>().unwrap(), Role::Investor);
        assert!("admin".parse::<Role>().is_err());
    }
}
