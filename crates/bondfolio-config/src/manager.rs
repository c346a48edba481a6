//! Configuration manager.
//!
//! Holds the current [`AppConfig`] behind a lock and persists it as a JSON
//! file. A missing file is not an error: the defaults are used until the
//! first save.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::app::{AppConfig, BondDefaults, ConfigUpdate};
use crate::error::{ConfigError, ConfigResult, Validate};

/// File name used inside a data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Central configuration manager.
///
/// # Example
///
/// ```rust
/// use bondfolio_config::{ConfigManager, ConfigUpdate};
/// use bondfolio_core::Currency;
///
/// let manager = ConfigManager::new();
/// assert_eq!(manager.get().unwrap().currency, Currency::PEN);
///
/// let update = ConfigUpdate::from_pair("currency", "USD").unwrap();
/// manager.update(&update).unwrap();
/// assert_eq!(manager.bond_defaults().unwrap().currency, Currency::USD);
/// ```
#[derive(Debug)]
pub struct ConfigManager {
    /// Backing file, if any.
    path: Option<PathBuf>,

    /// Current configuration.
    config: RwLock<AppConfig>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// Creates an in-memory manager holding the defaults.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Creates an in-memory manager holding `config`.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            path: None,
            config: RwLock::new(config),
        }
    }

    /// Loads the configuration stored at `path`.
    ///
    /// A missing file yields the defaults; the path is remembered for
    /// [`save`](Self::save).
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read, parsed, or validated.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref().to_path_buf();

        let config = match fs::read_to_string(&path) {
            Ok(contents) => {
                let config: AppConfig = serde_json::from_str(&contents)?;
                config.validate_or_error()?;
                log::debug!("loaded configuration from {}", path.display());
                config
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no configuration at {}, using defaults", path.display());
                AppConfig::default()
            }
            Err(e) => return Err(ConfigError::io(path, e)),
        };

        Ok(Self {
            path: Some(path),
            config: RwLock::new(config),
        })
    }

    /// Loads `config.json` from a data directory.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> ConfigResult<Self> {
        Self::load(dir.as_ref().join(CONFIG_FILE_NAME))
    }

    /// The backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Writes the current configuration to the backing file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoBackingFile`] for an in-memory manager.
    pub fn save(&self) -> ConfigResult<()> {
        let path = self.path.as_deref().ok_or(ConfigError::NoBackingFile)?;
        self.save_to(path)
    }

    /// Writes the current configuration to `path`, creating parent
    /// directories as needed.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let config = self.get()?;
        let json = serde_json::to_string_pretty(&config)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
        }
        fs::write(path, json).map_err(|e| ConfigError::io(path, e))?;

        log::debug!("saved configuration to {}", path.display());
        Ok(())
    }

    /// Returns a copy of the current configuration.
    pub fn get(&self) -> ConfigResult<AppConfig> {
        let config = self
            .config
            .read()
            .map_err(|e| ConfigError::Lock(e.to_string()))?;
        Ok(config.clone())
    }

    /// Applies a partial update.
    ///
    /// The updated configuration is validated first; on failure nothing
    /// changes. Returns the new configuration.
    pub fn update(&self, update: &ConfigUpdate) -> ConfigResult<AppConfig> {
        let mut config = self
            .config
            .write()
            .map_err(|e| ConfigError::Lock(e.to_string()))?;

        let updated = config.with_update(update);
        updated.validate_or_error()?;
        *config = updated.clone();

        Ok(updated)
    }

    /// Restores the defaults.
    pub fn reset(&self) -> ConfigResult<AppConfig> {
        let mut config = self
            .config
            .write()
            .map_err(|e| ConfigError::Lock(e.to_string()))?;
        *config = AppConfig::default();
        Ok(config.clone())
    }

    /// Values pre-filled on a new bond.
    pub fn bond_defaults(&self) -> ConfigResult<BondDefaults> {
        Ok(self.get()?.bond_defaults())
    }
}
