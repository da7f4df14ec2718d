//! CampusTrace client core
//!
//! Composes the storage and UI crates into a running client: configuration,
//! logging and the [`App`] bundle that owns the preference store and the
//! root fault boundary.
//!
//! # Example
//!
//! ```rust
//! use campus_trace::{App, AppConfig};
//! use storage::StorageBackend;
//!
//! let config = AppConfig::new().storage(StorageBackend::Memory);
//! let app = App::bootstrap(config).unwrap();
//!
//! app.preferences().toggle_appearance_mode();
//! assert!(app.root_style().has_class("dark"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod app;
pub mod config;
pub mod logging;

pub use app::App;
pub use config::{AppConfig, ConfigError};
pub use logging::{init_logging, LogConfig};
