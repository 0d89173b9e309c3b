//! Configuration management for the REST client core.
//!
//! This module provides configuration loading, validation, and access through a singleton pattern.
//! Configuration is read from a JSON settings document under the "rest-client" key and merged
//! with defaults.

pub mod schema;

pub use schema::RestClientConfig;

use once_cell::sync::Lazy;
use serde_json::Value;
use std::sync::RwLock;

/// Settings key holding this crate's configuration.
pub const SETTINGS_KEY: &str = "rest-client";

/// Errors produced while loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The merged configuration failed validation.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Global configuration instance.
///
/// This is lazily initialized on first access and can be updated when settings change.
static CONFIG: Lazy<RwLock<RestClientConfig>> =
    Lazy::new(|| RwLock::new(RestClientConfig::default()));

/// Loads configuration from a JSON settings value.
///
/// Reads the "rest-client" settings, merges them with defaults, validates the
/// result, and updates the global configuration. Settings that fail to
/// deserialize are logged and ignored.
///
/// # Example
///
/// ```no_run
/// use rest_client_core::config::load_config;
/// use serde_json::json;
///
/// let settings = json!({
///     "rest-client": {
///         "historyLimit": 200,
///         "defaultLanguage": "python"
///     }
/// });
///
/// let config = load_config(Some(settings)).unwrap();
/// assert_eq!(config.history_limit, 200);
/// ```
pub fn load_config(settings_json: Option<Value>) -> Result<RestClientConfig, ConfigError> {
    let mut config = RestClientConfig::default();

    if let Some(settings) = settings_json {
        if let Some(client_settings) = settings.get(SETTINGS_KEY) {
            match serde_json::from_value::<RestClientConfig>(client_settings.clone()) {
                Ok(user_config) => {
                    config = config.merge(&user_config);
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse {} settings: {}. Using defaults.",
                        SETTINGS_KEY,
                        e
                    );
                }
            }
        }
    }

    config.validate().map_err(ConfigError::Invalid)?;

    if let Ok(mut global_config) = CONFIG.write() {
        *global_config = config.clone();
    }

    Ok(config)
}

/// Gets the current global configuration.
///
/// Returns a clone of the current configuration, or the defaults if nothing
/// has been loaded yet.
pub fn get_config() -> RestClientConfig {
    CONFIG
        .read()
        .map(|c| c.clone())
        .unwrap_or_else(|_| RestClientConfig::default())
}

/// Updates the global configuration in place.
///
/// If the update leaves the configuration invalid, it is reverted to defaults.
///
/// # Example
///
/// ```no_run
/// use rest_client_core::config::update_config;
///
/// update_config(|config| {
///     config.history_limit = 50;
/// });
/// ```
pub fn update_config<F>(updater: F)
where
    F: FnOnce(&mut RestClientConfig),
{
    if let Ok(mut config) = CONFIG.write() {
        updater(&mut config);

        if let Err(e) = config.validate() {
            log::warn!("Configuration validation failed after update: {}", e);
            *config = RestClientConfig::default();
        }
    }
}

/// Resets the configuration to defaults.
pub fn reset_config() {
    if let Ok(mut config) = CONFIG.write() {
        *config = RestClientConfig::default();
    }
}
