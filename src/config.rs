//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::monitor::DEFAULT_WINDOW;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub monitor: MonitorConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout. Unset means requests may take as long as they take.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

/// Default backend origin
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

/// Live monitor configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MonitorConfig {
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_window_capacity")]
    pub window_capacity: usize,

    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Treat a live reading of exactly 0 as "no value"
    #[serde(default = "default_zero_is_missing")]
    pub zero_is_missing: bool,
}

fn default_poll_interval() -> u64 {
    3000 // 3 seconds
}

fn default_window_capacity() -> usize {
    DEFAULT_WINDOW
}

fn default_history_limit() -> usize {
    30
}

fn default_zero_is_missing() -> bool {
    true
}

impl MonitorConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval(),
            window_capacity: default_window_capacity(),
            history_limit: default_history_limit(),
            zero_is_missing: default_zero_is_missing(),
        }
    }
}

/// Local key/value storage configuration (terminal monitor)
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_path")]
    pub path: String,
}

fn default_storage_path() -> String {
    dirs::data_local_dir()
        .map(|p| {
            p.join("citycare")
                .join("local_storage.json")
                .to_string_lossy()
                .to_string()
        })
        .unwrap_or_else(|| "./citycare_local_storage.json".to_string())
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("citycare").join("config.toml")),
            Some(PathBuf::from("/etc/citycare/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("CITYCARE_API_URL") {
            self.backend.base_url = url;
        }

        if let Ok(interval) = std::env::var("CITYCARE_POLL_INTERVAL_MS") {
            if let Ok(ms) = interval.parse() {
                self.monitor.poll_interval_ms = ms;
            }
        }

        if let Ok(path) = std::env::var("CITYCARE_STORAGE_PATH") {
            self.storage.path = path;
        }

        if let Ok(level) = std::env::var("CITYCARE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("CITYCARE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# CityCare Configuration
#
# Environment variables override these settings:
# - CITYCARE_API_URL
# - CITYCARE_POLL_INTERVAL_MS
# - CITYCARE_STORAGE_PATH
# - CITYCARE_LOG_LEVEL
# - CITYCARE_LOG_FORMAT

[backend]
# CityCare backend origin
base_url = "http://127.0.0.1:8000"

# Per-request timeout in seconds (unset: no timeout)
# request_timeout_secs = 10

[monitor]
# Live poll interval (ms)
poll_interval_ms = 3000

# Points kept on the chart
window_capacity = 30

# Historical samples fetched when monitoring starts
history_limit = 30

# Treat a live reading of 0 as "no value"
zero_is_missing = true

[storage]
# File standing in for browser local storage
# (default: <data dir>/citycare/local_storage.json)
# path = "/var/lib/citycare/local_storage.json"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
