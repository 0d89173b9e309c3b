//! Configuration schema for the REST client core.
//!
//! This module defines the configuration structure and validation logic for all
//! user-configurable settings.

use crate::codegen::Language;
use serde::{Deserialize, Serialize};

/// Main configuration structure.
///
/// All settings can be provided under the "rest-client" key of a JSON settings
/// document. Missing settings fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestClientConfig {
    /// Storage key holding the persisted variable list.
    ///
    /// Defaults to "rss-variables". Must not be empty or equal to
    /// `history_storage_key`.
    #[serde(default = "default_variables_storage_key")]
    pub variables_storage_key: String,

    /// Storage key holding the persisted request history.
    ///
    /// Defaults to "rss-history".
    #[serde(default = "default_history_storage_key")]
    pub history_storage_key: String,

    /// Maximum number of requests to keep in history.
    ///
    /// The oldest entries beyond this limit are dropped when a new request is
    /// recorded. Defaults to 1000. Must be > 0.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Language preselected in the code generator.
    ///
    /// One of `curl`, `javascript`, `xhr`, `nodejs`, `python`, `java`,
    /// `csharp`, `go`. Defaults to "curl".
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Path prefix prepended to encoded routes when building shareable links.
    ///
    /// Defaults to "/rest-client".
    #[serde(default = "default_route_prefix")]
    pub route_prefix: String,
}

impl Default for RestClientConfig {
    fn default() -> Self {
        Self {
            variables_storage_key: default_variables_storage_key(),
            history_storage_key: default_history_storage_key(),
            history_limit: default_history_limit(),
            default_language: default_language(),
            route_prefix: default_route_prefix(),
        }
    }
}

impl RestClientConfig {
    /// Validates the configuration and returns errors if any settings are invalid.
    ///
    /// # Returns
    ///
    /// `Ok(())` if all settings are valid, or `Err` with a descriptive error message.
    pub fn validate(&self) -> Result<(), String> {
        if self.variables_storage_key.is_empty() {
            return Err("variablesStorageKey must not be empty".to_string());
        }

        if self.history_storage_key.is_empty() {
            return Err("historyStorageKey must not be empty".to_string());
        }

        if self.variables_storage_key == self.history_storage_key {
            return Err("variablesStorageKey and historyStorageKey must differ".to_string());
        }

        if self.history_limit == 0 {
            return Err("historyLimit must be greater than 0".to_string());
        }

        if self.default_language.parse::<Language>().is_err() {
            return Err(format!(
                "defaultLanguage '{}' is not a supported language",
                self.default_language
            ));
        }

        Ok(())
    }

    /// Returns the configured default code generation language.
    ///
    /// Falls back to cURL if the setting does not name a supported language.
    pub fn language(&self) -> Language {
        self.default_language.parse().unwrap_or(Language::Curl)
    }

    /// Merges this configuration with another, using values from `other` where present.
    ///
    /// # Arguments
    ///
    /// * `other` - Configuration to merge with (takes precedence)
    pub fn merge(&self, other: &RestClientConfig) -> Self {
        Self {
            variables_storage_key: other.variables_storage_key.clone(),
            history_storage_key: other.history_storage_key.clone(),
            history_limit: other.history_limit,
            default_language: other.default_language.clone(),
            route_prefix: other.route_prefix.clone(),
        }
    }
}

// Default value functions for serde

fn default_variables_storage_key() -> String {
    "rss-variables".to_string()
}

fn default_history_storage_key() -> String {
    "rss-history".to_string()
}

fn default_history_limit() -> usize {
    1000
}

fn default_language() -> String {
    "curl".to_string()
}

fn default_route_prefix() -> String {
    "/rest-client".to_string()
}
