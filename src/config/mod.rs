//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/loc-picker/config.toml

pub mod defaults;

use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Picker behavior
    #[serde(default)]
    pub picker: PickerConfig,

    /// Geocoding provider settings
    #[serde(default)]
    pub geocoder: GeocoderConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Options recognized by the location picker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickerConfig {
    /// Placeholder text for the empty input
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Container to mount into; `None` uses the default container
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_id: Option<String>,

    /// Shortest trimmed input that triggers a lookup
    #[serde(default = "default_min_query_length")]
    pub min_query_length: usize,

    /// Debounce quiet interval in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Maximum number of place suggestions
    #[serde(default = "default_result_limit")]
    pub result_limit: usize,
}

/// Geocoding provider settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocoderConfig {
    /// Base URL of the Nominatim-compatible endpoint
    #[serde(default = "default_geocoder_url")]
    pub base_url: String,

    /// User-Agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Preferred result language (e.g. "en", "de"); empty means the user's locale
    #[serde(default)]
    pub language: String,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

// Default value functions for serde
fn default_placeholder() -> String {
    DEFAULT_PLACEHOLDER.to_string()
}
fn default_min_query_length() -> usize {
    DEFAULT_MIN_QUERY_LENGTH
}
fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}
fn default_result_limit() -> usize {
    DEFAULT_RESULT_LIMIT
}
fn default_geocoder_url() -> String {
    DEFAULT_GEOCODER_URL.to_string()
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            placeholder: default_placeholder(),
            container_id: None,
            min_query_length: default_min_query_length(),
            debounce_ms: default_debounce_ms(),
            result_limit: default_result_limit(),
        }
    }
}

impl PickerConfig {
    /// Container id the picker mounts into
    pub fn container(&self) -> &str {
        self.container_id.as_deref().unwrap_or(DEFAULT_CONTAINER_ID)
    }

    /// Debounce interval as a duration
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoder_url(),
            user_agent: default_user_agent(),
            language: String::new(),
        }
    }
}

impl GeocoderConfig {
    /// Language to request results in
    ///
    /// The configured language wins; otherwise the locale from `LC_ALL`,
    /// `LC_MESSAGES` or `LANG`. `None` leaves the choice to the provider.
    pub fn accept_language(&self) -> Option<String> {
        let configured = self.language.trim();
        if !configured.is_empty() {
            return Some(configured.to_string());
        }

        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.is_empty())
            .and_then(|locale| locale_language(&locale))
    }
}

/// Turn a POSIX locale such as `de_DE.UTF-8` into a language tag (`de-DE`)
///
/// `C` and `POSIX` carry no language.
pub fn locale_language(locale: &str) -> Option<String> {
    let name = locale.split(['.', '@']).next()?.trim();
    if name.is_empty() || name == "C" || name == "POSIX" {
        return None;
    }
    Some(name.replace('_', "-"))
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                Error::Config(format!("Failed to read config file: {}", e))
            })?;

            toml::from_str(&content).map_err(|e| {
                Error::Config(format!("Failed to parse config file: {}", e))
            })
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            Error::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(&path, content).map_err(|e| {
            Error::Config(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["picker", "placeholder"] => Some(self.picker.placeholder.clone()),
            ["picker", "container_id"] => Some(self.picker.container().to_string()),
            ["picker", "min_query_length"] => Some(self.picker.min_query_length.to_string()),
            ["picker", "debounce_ms"] => Some(self.picker.debounce_ms.to_string()),
            ["picker", "result_limit"] => Some(self.picker.result_limit.to_string()),

            ["geocoder", "base_url"] => Some(self.geocoder.base_url.clone()),
            ["geocoder", "user_agent"] => Some(self.geocoder.user_agent.clone()),
            ["geocoder", "language"] => Some(self.geocoder.language.clone()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["picker", "placeholder"] => {
                self.picker.placeholder = value.to_string();
            }
            ["picker", "container_id"] => {
                let value = value.trim();
                self.picker.container_id = (!value.is_empty()).then(|| value.to_string());
            }
            ["picker", "min_query_length"] => {
                self.picker.min_query_length = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid length value: {}", value))
                })?;
            }
            ["picker", "debounce_ms"] => {
                self.picker.debounce_ms = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid debounce value: {}", value))
                })?;
            }
            ["picker", "result_limit"] => {
                let limit: usize = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid limit value: {}", value))
                })?;
                if limit == 0 {
                    return Err(Error::Config("Result limit must be at least 1".to_string()));
                }
                self.picker.result_limit = limit;
            }

            ["geocoder", "base_url"] => {
                self.geocoder.base_url = value.to_string();
            }
            ["geocoder", "user_agent"] => {
                if value.trim().is_empty() {
                    return Err(Error::Config("User agent must not be empty".to_string()));
                }
                self.geocoder.user_agent = value.to_string();
            }
            ["geocoder", "language"] => {
                self.geocoder.language = value.to_string();
            }

            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid port value: {}", value))
                })?;
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "picker.placeholder",
            "picker.container_id",
            "picker.min_query_length",
            "picker.debounce_ms",
            "picker.result_limit",
            "geocoder.base_url",
            "geocoder.user_agent",
            "geocoder.language",
            "server.host",
            "server.port",
        ]
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
