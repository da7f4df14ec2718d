//! Application configuration
//!
//! Configuration is assembled once at startup, either through the builder
//! methods or from `CAMPUS_TRACE_*` environment variables.

use crate::logging::LogConfig;
use app_ui::BuildMode;
use std::path::PathBuf;
use storage::{KvConfig, StorageBackend};
use thiserror::Error;
use tracing::Level;

/// Selects development or production behavior
pub const ENV_BUILD_MODE: &str = "CAMPUS_TRACE_ENV";
/// Selects the storage backend (`memory` or `sled`)
pub const ENV_STORAGE: &str = "CAMPUS_TRACE_STORAGE";
/// Directory of the sled preference database
pub const ENV_DATA_DIR: &str = "CAMPUS_TRACE_DATA_DIR";
/// Default log level
pub const ENV_LOG_LEVEL: &str = "CAMPUS_TRACE_LOG";

/// Configuration error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Unknown build mode
    #[error("Invalid CAMPUS_TRACE_ENV: {0}")]
    BuildMode(String),

    /// Unknown storage backend
    #[error("Invalid CAMPUS_TRACE_STORAGE: {0} (expected memory or sled)")]
    Storage(String),

    /// Unknown log level
    #[error("Invalid CAMPUS_TRACE_LOG: {0}")]
    LogLevel(String),
}

/// Result type for configuration
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Development or production
    pub build_mode: BuildMode,
    /// Preference storage backend
    pub storage: StorageBackend,
    /// Logging setup
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            build_mode: BuildMode::Production,
            storage: StorageBackend::default(),
            log: LogConfig::default(),
        }
    }
}

impl AppConfig {
    /// Default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the build mode
    pub fn build_mode(mut self, mode: BuildMode) -> Self {
        self.build_mode = mode;
        self
    }

    /// Set the storage backend
    pub fn storage(mut self, backend: StorageBackend) -> Self {
        self.storage = backend;
        self
    }

    /// Set the logging configuration
    pub fn log(mut self, log: LogConfig) -> Self {
        self.log = log;
        self
    }

    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through a variable lookup function
    ///
    /// Unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_BUILD_MODE) {
            config.build_mode = raw.parse().map_err(|_| ConfigError::BuildMode(raw))?;
        }

        let kv = match lookup(ENV_DATA_DIR) {
            Some(dir) => KvConfig::new(PathBuf::from(dir).join("preferences")),
            None => KvConfig::default(),
        };
        config.storage = match lookup(ENV_STORAGE).as_deref().map(str::trim) {
            None | Some("sled") => StorageBackend::Sled(kv),
            Some("memory") => StorageBackend::Memory,
            Some(other) => return Err(ConfigError::Storage(other.to_string())),
        };

        if let Some(raw) = lookup(ENV_LOG_LEVEL) {
            let level: Level = raw.parse().map_err(|_| ConfigError::LogLevel(raw))?;
            config.log = config.log.level(level);
        }

        Ok(config)
    }
}
