//! Bondfolio Configuration Layer
//!
//! Application defaults for new bonds and their JSON persistence.
//!
//! # Features
//!
//! - **Defaults**: currency, interest basis and capitalization pre-filled on new bonds
//! - **Validation**: the [`Validate`] trait with per-field [`ValidationError`]s
//! - **Persistence**: [`ConfigManager`] loads and saves a JSON file; a missing
//!   file yields the defaults
//!
//! Configuration never affects valuation; it only decides which values a new
//! bond starts with.
//!
//! # Example
//!
//! ```rust
//! use bondfolio_config::{AppConfig, ConfigManager, Validate};
//!
//! let config = AppConfig::default();
//! assert!(config.is_valid());
//! assert_eq!(config.capitalization, 12);
//!
//! let manager = ConfigManager::with_config(config);
//! let defaults = manager.bond_defaults().unwrap();
//! assert_eq!(defaults.currency.code(), "PEN");
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod app;
pub mod error;
pub mod manager;

pub use app::{AppConfig, BondDefaults, ConfigKey, ConfigUpdate, MAX_CAPITALIZATION};
pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use manager::{ConfigManager, CONFIG_FILE_NAME};
