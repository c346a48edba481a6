//! Application defaults.
//!
//! These values only pre-fill new bonds; they never change how a bond is
//! valued.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use bondfolio_core::types::{Currency, InterestKind, InterestType};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

/// Largest accepted capitalization frequency (daily).
pub const MAX_CAPITALIZATION: u32 = 365;

/// Application-wide defaults for new bonds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Currency pre-selected for new bonds.
    pub currency: Currency,
    /// Interest basis pre-selected for new bonds.
    pub interest_type: InterestKind,
    /// Capitalization frequency used when the basis is nominal.
    pub capitalization: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            currency: Currency::PEN,
            interest_type: InterestKind::Effective,
            capitalization: 12,
        }
    }
}

impl AppConfig {
    /// Applies a partial update, returning the updated copy.
    #[must_use]
    pub fn with_update(&self, update: &ConfigUpdate) -> Self {
        Self {
            currency: update.currency.unwrap_or(self.currency),
            interest_type: update.interest_type.unwrap_or(self.interest_type),
            capitalization: update.capitalization.unwrap_or(self.capitalization),
        }
    }

    /// The values pre-filled on a new bond.
    #[must_use]
    pub fn bond_defaults(&self) -> BondDefaults {
        BondDefaults {
            currency: self.currency,
            interest_type: self.interest_type.with_capitalization(self.capitalization),
        }
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.capitalization == 0 {
            errors.push(ValidationError::with_rule(
                "capitalization",
                "must be at least 1",
                "min",
            ));
        } else if self.capitalization > MAX_CAPITALIZATION {
            errors.push(ValidationError::with_rule(
                "capitalization",
                format!("must be at most {MAX_CAPITALIZATION}"),
                "max",
            ));
        }

        errors
    }
}

/// Defaults derived from an [`AppConfig`] for a new bond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BondDefaults {
    /// Currency of the new bond.
    pub currency: Currency,
    /// Interest basis of the new bond.
    pub interest_type: InterestType,
}

/// Recognised configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    /// `currency`
    Currency,
    /// `interest_type`
    InterestType,
    /// `capitalization`
    Capitalization,
}

impl ConfigKey {
    /// All keys in display order.
    pub const ALL: [ConfigKey; 3] = [
        ConfigKey::Currency,
        ConfigKey::InterestType,
        ConfigKey::Capitalization,
    ];

    /// Returns the key name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Currency => "currency",
            Self::InterestType => "interest_type",
            Self::Capitalization => "capitalization",
        }
    }

    /// Reads this key from a config as a display string.
    pub fn get(&self, config: &AppConfig) -> String {
        match self {
            Self::Currency => config.currency.to_string(),
            Self::InterestType => config.interest_type.to_string(),
            Self::Capitalization => config.capitalization.to_string(),
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "currency" => Ok(Self::Currency),
            "interest_type" | "interest" => Ok(Self::InterestType),
            "capitalization" => Ok(Self::Capitalization),
            _ => Err(ConfigError::UnknownKey { key: s.to_string() }),
        }
    }
}

/// A partial update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigUpdate {
    /// New default currency.
    pub currency: Option<Currency>,
    /// New default interest basis.
    pub interest_type: Option<InterestKind>,
    /// New capitalization frequency.
    pub capitalization: Option<u32>,
}

impl ConfigUpdate {
    /// Builds a single-field update from a `key = value` pair.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownKey`] or [`ConfigError::InvalidValue`].
    pub fn from_pair(key: &str, value: &str) -> ConfigResult<Self> {
        let key: ConfigKey = key.parse()?;
        let invalid = |reason: String| ConfigError::invalid_value(key.as_str(), value, reason);

        let mut update = Self::default();
        match key {
            ConfigKey::Currency => {
                let currency = value
                    .parse::<Currency>()
                    .map_err(|e| invalid(e.to_string()))?;
                update.currency = Some(currency);
            }
            ConfigKey::InterestType => {
                let kind = value
                    .parse::<InterestKind>()
                    .map_err(|e| invalid(e.to_string()))?;
                update.interest_type = Some(kind);
            }
            ConfigKey::Capitalization => {
                let capitalization = value
                    .trim()
                    .parse::<u32>()
                    .map_err(|e| invalid(e.to_string()))?;
                update.capitalization = Some(capitalization);
            }
        }
        Ok(update)
    }

    /// Returns true if nothing would change.
    pub fn is_empty(&self) -> bool {
        self.currency.is_none() && self.interest_type.is_none() && self.capitalization.is_none()
    }
}
