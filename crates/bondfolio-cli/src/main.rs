//! Bondfolio CLI - Command-line interface for bullet bond valuation.
//!
//! # Usage
//!
//! ```bash
//! # Value a 4-year annual 10% bond at a 12% market rate
//! bondfolio analyze --coupon 10 --periods 4 --market 12 --cash-flow
//!
//! # Store it and look at it again later
//! bondfolio bond add --name "Corp 2029" --coupon 10 --periods 4 --market 12
//! bondfolio bond show "Corp 2029"
//!
//! # Export the report and back everything up
//! bondfolio bond export "Corp 2029" --output corp.csv
//! bondfolio backup backup.json
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod context;
mod error;
mod export;
mod output;

use cli::{Cli, Commands};
use context::Context;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli);

    let ctx = Context::from_cli(&cli)?;
    tracing::debug!(data_dir = %ctx.data_dir().display(), "resolved data directory");

    // Execute command
    match cli.command {
        Commands::Analyze(args) => commands::analyze::execute(args, &ctx)?,
        Commands::Bond(args) => commands::bond::execute(args, &ctx)?,
        Commands::Config(args) => commands::config::execute(args, &ctx)?,
        Commands::User(args) => commands::user::execute(args, &ctx)?,
        Commands::Backup(args) => commands::backup::execute(args, &ctx)?,
    }

    Ok(())
}

/// Installs the stderr subscriber. `RUST_LOG` wins over `-v`; library `log`
/// records are forwarded through the subscriber's log bridge.
fn init_logging(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
