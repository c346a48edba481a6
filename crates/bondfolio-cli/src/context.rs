//! Per-invocation state: where data lives and how output is shown.

use std::path::{Path, PathBuf};

use bondfolio_config::ConfigManager;
use bondfolio_storage::{FileStorage, StorageAdapter};

use crate::cli::{Cli, OutputFormat};
use crate::error::{CliError, CliResult};
use crate::output::{print_info, print_success};

/// Directory name under the platform data directory.
const APP_DIR: &str = "bondfolio";

/// Resolved global options shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    data_dir: PathBuf,
    format: OutputFormat,
    quiet: bool,
}

impl Context {
    /// Resolves the data directory: `--data-dir`, then `BONDFOLIO_HOME`
    /// (both handled by clap), then the platform data directory.
    pub fn from_cli(cli: &Cli) -> CliResult<Self> {
        let data_dir = match &cli.data_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir().ok_or(CliError::NoDataDir)?.join(APP_DIR),
        };

        Ok(Self {
            data_dir,
            format: cli.format,
            quiet: cli.quiet,
        })
    }

    /// The data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// The requested output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Opens the bond and user store.
    pub fn storage(&self) -> CliResult<FileStorage> {
        let storage = FileStorage::open_in_dir(&self.data_dir)?;
        tracing::debug!(backend = storage.backend_name(), path = %storage.path().display(), "opened storage");
        Ok(storage)
    }

    /// Loads the configuration, falling back to defaults.
    pub fn config(&self) -> CliResult<ConfigManager> {
        Ok(ConfigManager::load_from_dir(&self.data_dir)?)
    }

    /// Prints a success message unless `--quiet` or a machine format is active.
    pub fn success(&self, message: &str) {
        if self.chatty() {
            print_success(message);
        }
    }

    /// Prints an informational message unless `--quiet` or a machine format is active.
    pub fn info(&self, message: &str) {
        if self.chatty() {
            print_info(message);
        }
    }

    fn chatty(&self) -> bool {
        !self.quiet && self.format == OutputFormat::Table
    }
}
