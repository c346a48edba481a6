//! Backup command implementation.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use bondfolio_config::AppConfig;
use bondfolio_storage::{Snapshot, StorageAdapter};

use crate::cli::OutputFormat;
use crate::context::Context;
use crate::error::CliError;

/// Arguments for the backup command.
#[derive(Args, Debug)]
pub struct BackupArgs {
    /// File to write the JSON backup to
    pub file: PathBuf,
}

/// Everything a backup holds. Passwords are blanked by the snapshot.
#[derive(Debug, Serialize)]
struct Backup<'a> {
    #[serde(flatten)]
    snapshot: &'a Snapshot,
    config: &'a AppConfig,
}

/// Execute the backup command.
pub fn execute(args: BackupArgs, ctx: &Context) -> Result<()> {
    let snapshot = ctx.storage()?.export_snapshot()?;
    let config = ctx.config()?.get()?;

    let backup = Backup {
        snapshot: &snapshot,
        config: &config,
    };

    let file = File::create(&args.file).map_err(|e| CliError::write(&args.file, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &backup)?;
    writer.flush().map_err(|e| CliError::write(&args.file, e))?;

    tracing::info!(
        path = %args.file.display(),
        bonds = snapshot.bonds.len(),
        users = snapshot.users.len(),
        "wrote backup"
    );

    match ctx.format() {
        OutputFormat::Minimal => println!("{}", args.file.display()),
        _ => ctx.success(&format!(
            "Backed up {} bonds and {} users to {}",
            snapshot.bonds.len(),
            snapshot.users.len(),
            args.file.display()
        )),
    }

    Ok(())
}
