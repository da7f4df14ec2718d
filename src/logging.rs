//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! # Log Levels
//!
//! - `error`: Render faults caught by a fault boundary
//! - `warn`: Preference storage failures (always recovered)
//! - `info`: Startup and recovery actions
//! - `debug`: Preference changes
//!
//! `RUST_LOG` takes precedence over the configured level when set.

use std::sync::atomic::{AtomicBool, Ordering};
use tracing::Level;
use tracing_subscriber::EnvFilter;

static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Configuration for logging behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Level used when `RUST_LOG` is not set.
    pub level: Level,
    /// Whether to include the module path in log output.
    pub with_target: bool,
    /// Whether to use ANSI colors in output.
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: Level::INFO, with_target: false, with_ansi: true }
    }
}

impl LogConfig {
    /// Set the default level.
    #[must_use]
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Include or omit module paths.
    #[must_use]
    pub fn with_target(mut self, enabled: bool) -> Self {
        self.with_target = enabled;
        self
    }

    /// Enable or disable ANSI colors.
    #[must_use]
    pub fn with_ansi(mut self, enabled: bool) -> Self {
        self.with_ansi = enabled;
        self
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level.to_string().to_lowercase()))
    }
}

/// Install the global subscriber.
///
/// Returns `false` when a subscriber was already installed, by this
/// function or by the host.
pub fn init_logging(config: &LogConfig) -> bool {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return false;
    }

    tracing_subscriber::fmt()
        .with_env_filter(config.env_filter())
        .with_target(config.with_target)
        .with_ansi(config.with_ansi)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert_eq!(config.level, Level::INFO);
        assert!(!config.with_target);
        assert!(config.with_ansi);
    }

    #[test]
    fn test_builder() {
        let config = LogConfig::default().level(Level::TRACE).with_target(true).with_ansi(false);
        assert_eq!(config.level, Level::TRACE);
        assert!(config.with_target);
        assert!(!config.with_ansi);
    }

    #[test]
    fn test_second_init_is_noop() {
        let config = LogConfig::default().with_ansi(false);
        init_logging(&config);
        assert!(!init_logging(&config));
    }
}
