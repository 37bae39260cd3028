//! Configuration module for kontra
//!
//! Manages client settings: the API base URL, page size, debounce interval
//! and the opaque session cookie. Configuration is stored in the user's
//! config directory (`~/.config/kontra/config.toml` on Linux).

use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::LIST_PAGE_SIZE;

fn default_api_base() -> String {
    "http://localhost:3001".to_string()
}

fn default_web_base() -> String {
    "http://localhost:3000".to_string()
}

const fn default_page_size() -> u32 {
    LIST_PAGE_SIZE
}

const fn default_debounce_ms() -> u64 {
    300
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct KontraConfig {
    /// Base URL of the directory API
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Base URL of the public web frontend, used for shareable entry links
    #[serde(default = "default_web_base")]
    pub web_base: String,

    /// Page size for the explore listing
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// How long the search text must be stable before a fetch fires
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,

    /// Opaque session credential, sent verbatim with every request.
    /// Never logged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_cookie: Option<String>,
}

impl Default for KontraConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            web_base: default_web_base(),
            page_size: default_page_size(),
            debounce_ms: default_debounce_ms(),
            quiet: false,
            session_cookie: None,
        }
    }
}

impl KontraConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be
    /// determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("kontra").join("config.toml"))
    }

    /// Load configuration from file, creating the default if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or
    /// created.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save()?;
            return Ok(default_config);
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.to_path_buf()).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the
    /// configuration cannot be serialized, or the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    /// Save configuration to an explicit path
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the directory cannot be created or the file
    /// cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// The debounce interval as a `Duration`
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
