//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::commands::{AnalyzeArgs, BackupArgs, BondArgs, ConfigArgs, UserArgs};

/// Bondfolio - bullet bond valuation from the command line
#[derive(Parser)]
#[command(name = "bondfolio")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Directory holding the bond store and configuration
    #[arg(long, global = true, env = "BONDFOLIO_HOME", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Value ad-hoc bond terms (price, TCEA, TREA, duration, convexity)
    Analyze(AnalyzeArgs),

    /// Manage stored bonds
    Bond(BondArgs),

    /// Manage default settings for new bonds
    Config(ConfigArgs),

    /// Register, log in, and update user accounts
    User(UserArgs),

    /// Write a JSON backup of every bond, user, and setting
    Backup(BackupArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the value)
    Minimal,
}

impl Cli {
    /// The log filter implied by `-v`, used when `RUST_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_levels() {
        let cli = Cli::parse_from(["bondfolio", "config", "path"]);
        assert_eq!(cli.log_level(), "warn");

        let cli = Cli::parse_from(["bondfolio", "-vv", "config", "path"]);
        assert_eq!(cli.log_level(), "debug");

        let cli = Cli::parse_from(["bondfolio", "config", "path", "-vvvv"]);
        assert_eq!(cli.log_level(), "trace");
    }
}
