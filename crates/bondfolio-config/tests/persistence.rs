//! File round trips for the configuration manager.

use bondfolio_config::{AppConfig, ConfigError, ConfigManager, ConfigUpdate, CONFIG_FILE_NAME};
use bondfolio_core::types::{Currency, InterestKind};
use tempfile::TempDir;

#[test]
fn missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let manager = ConfigManager::load_from_dir(dir.path()).unwrap();

    assert_eq!(manager.get().unwrap(), AppConfig::default());
    assert_eq!(manager.path().unwrap(), dir.path().join(CONFIG_FILE_NAME));
    assert!(!dir.path().join(CONFIG_FILE_NAME).exists());
}

#[test]
fn save_then_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let manager = ConfigManager::load(&path).unwrap();
    manager
        .update(&ConfigUpdate {
            currency: Some(Currency::USD),
            interest_type: Some(InterestKind::Nominal),
            capitalization: Some(2),
        })
        .unwrap();
    manager.save().unwrap();

    let reloaded = ConfigManager::load(&path).unwrap();
    let config = reloaded.get().unwrap();
    assert_eq!(config.currency, Currency::USD);
    assert_eq!(config.interest_type, InterestKind::Nominal);
    assert_eq!(config.capitalization, 2);
}

#[test]
fn corrupt_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(
        ConfigManager::load(&path),
        Err(ConfigError::Deserialization(_))
    ));
}

#[test]
fn invalid_stored_values_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, r#"{"capitalization": 0}"#).unwrap();

    assert!(matches!(
        ConfigManager::load(&path),
        Err(ConfigError::Validation { .. })
    ));
}
