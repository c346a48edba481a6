//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

use bondfolio_analytics::AnalyticsError;
use bondfolio_bonds::BondError;
use bondfolio_config::ConfigError;
use bondfolio_storage::StorageError;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A percentage argument is out of range.
    #[error("Invalid {name}: {value}. Must be a percentage between 0 and 100.")]
    InvalidPercent {
        /// Argument name.
        name: &'static str,
        /// Value given.
        value: f64,
    },

    /// An amount argument is negative or not finite.
    #[error("Invalid {name}: {value}. Must be a non-negative amount.")]
    InvalidAmount {
        /// Argument name.
        name: &'static str,
        /// Value given.
        value: f64,
    },

    /// No bond matches the query.
    #[error("No bond matches '{0}'")]
    BondNotFound(String),

    /// More than one bond matches the query.
    #[error("'{query}' matches {matches} bonds; use a longer ID prefix")]
    AmbiguousBond {
        /// The query.
        query: String,
        /// Number of matching bonds.
        matches: usize,
    },

    /// Username or password is wrong.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Nothing to update.
    #[error("Nothing to update: pass at least one field to change")]
    EmptyUpdate,

    /// A profile option does not apply to the user's role.
    #[error("--{option} only applies to {role} accounts")]
    ProfileMismatch {
        /// The offending option.
        option: &'static str,
        /// The role it belongs to.
        role: &'static str,
    },

    /// No data directory could be determined.
    #[error("Cannot determine a data directory; pass --data-dir or set BONDFOLIO_HOME")]
    NoDataDir,

    /// Output file could not be written.
    #[error("Cannot write {path}: {source}")]
    Write {
        /// Target path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Storage error.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Valuation error.
    #[error(transparent)]
    Analytics(#[from] AnalyticsError),

    /// Bond terms error.
    #[error(transparent)]
    Bond(#[from] BondError),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Wraps an IO error with the path being written.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
