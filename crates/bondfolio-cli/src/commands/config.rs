//! Config command implementation.
//!
//! Manages the defaults pre-filled on new bonds.

use anyhow::Result;
use clap::{Args, Subcommand};

use bondfolio_config::{AppConfig, ConfigKey, ConfigManager, ConfigUpdate};

use crate::cli::OutputFormat;
use crate::context::Context;
use crate::output::{print_header, print_output, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Get a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// Reset configuration to defaults
    Reset,

    /// Show configuration file location
    Path,
}

/// Arguments for get subcommand.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key (currency, interest_type, capitalization)
    pub key: String,
}

/// Arguments for set subcommand.
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key (currency, interest_type, capitalization)
    pub key: String,

    /// Configuration value
    pub value: String,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, ctx: &Context) -> Result<()> {
    let manager = ctx.config()?;

    match args.command {
        ConfigCommand::Show => show(&manager.get()?, ctx.format())?,

        ConfigCommand::Get(get) => {
            let key: ConfigKey = get.key.parse()?;
            println!("{}", key.get(&manager.get()?));
        }

        ConfigCommand::Set(set) => {
            let update = ConfigUpdate::from_pair(&set.key, &set.value)?;
            let config = manager.update(&update)?;
            manager.save()?;

            let key: ConfigKey = set.key.parse()?;
            tracing::info!(key = key.as_str(), value = %key.get(&config), "configuration changed");
            ctx.success(&format!("Set {} = {}", key, key.get(&config)));
        }

        ConfigCommand::Reset => {
            let config = manager.reset()?;
            manager.save()?;
            ctx.success("Configuration reset to defaults");
            show(&config, ctx.format())?;
        }

        ConfigCommand::Path => show_path(&manager),
    }

    Ok(())
}

fn show(config: &AppConfig, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
        OutputFormat::Minimal => {
            for key in ConfigKey::ALL {
                println!("{}={}", key, key.get(config));
            }
        }
        OutputFormat::Table | OutputFormat::Csv => {
            let rows: Vec<KeyValue> = ConfigKey::ALL
                .iter()
                .map(|key| KeyValue::new(key.as_str(), key.get(config)))
                .collect();
            if format == OutputFormat::Table {
                print_header("Configuration");
            }
            print_output(&rows, format)?;
        }
    }
    Ok(())
}

fn show_path(manager: &ConfigManager) {
    match manager.path() {
        Some(path) => println!("{}", path.display()),
        None => println!("(in memory)"),
    }
}
