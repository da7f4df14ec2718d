//! User interface core for CampusTrace
//!
//! This crate holds the framework-independent pieces of the client UI:
//! appearance preferences and their persistence, reflection of those
//! preferences onto the root element, and the fault boundary that keeps a
//! crashing screen from taking the whole app down.
//!
//! # Modules
//!
//! - [`theme`] - Preference dimensions, palettes, font scales, semantic colors
//! - [`preferences`] - Preference store with persistence and subscriptions
//! - [`reflection`] - Root class list and attributes derived from preferences
//! - [`fault_boundary`] - Render fault isolation and recovery
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use app_ui::{PreferenceStore, StyleReflector, ColorPalette};
//! use storage::MemoryStorage;
//!
//! let store = PreferenceStore::initialize(Arc::new(MemoryStorage::new()));
//! let reflector = StyleReflector::new();
//! store.subscribe(reflector.clone());
//!
//! store.set_color_palette(ColorPalette::Purple);
//! assert!(reflector.snapshot().has_class("theme-purple"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod fault_boundary;
pub mod preferences;
pub mod reflection;
pub mod theme;

// Re-export commonly used types
pub use theme::{
    AccentColors, AppearanceMode, ColorPalette, ContrastLevel, FontScale, FontSize,
    ParsePreferenceError, PreferenceState, ThemeColors,
};

pub use preferences::{PreferenceObserver, PreferenceStore, SubscriptionId};

pub use reflection::{apply_preferences, RootStyle, StyleReflector};

pub use fault_boundary::{
    BoundaryState, BuildMode, FallbackView, Fault, FaultBoundary, Recovery, RecoveryAction,
    Rendered,
};
