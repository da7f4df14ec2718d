//! Composition root
//!
//! Opens the configured storage backend, loads preferences, wires the root
//! style reflector and wraps the screen tree in a fault boundary.

use crate::config::AppConfig;
use anyhow::Context;
use app_ui::{
    FaultBoundary, PreferenceStore, Recovery, RecoveryAction, Rendered, RootStyle, StyleReflector,
};
use std::fmt;
use std::sync::Arc;
use storage::PreferenceStorage;

/// A running client: preferences, root style and the root fault boundary
#[derive(Debug)]
pub struct App {
    config: AppConfig,
    preferences: Arc<PreferenceStore>,
    reflector: StyleReflector,
    boundary: FaultBoundary,
}

impl App {
    /// Open the configured storage and build the app
    pub fn bootstrap(config: AppConfig) -> anyhow::Result<Self> {
        let storage = config
            .storage
            .open()
            .with_context(|| format!("failed to open {} preference storage", config.storage.name()))?;
        tracing::info!(
            storage = config.storage.name(),
            build_mode = %config.build_mode,
            "Starting CampusTrace client"
        );
        Ok(Self::with_storage(config, storage))
    }

    /// Build the app over an already opened storage
    pub fn with_storage(config: AppConfig, storage: Arc<dyn PreferenceStorage>) -> Self {
        let preferences = Arc::new(PreferenceStore::initialize(storage));
        let reflector = StyleReflector::new();
        preferences.subscribe(reflector.clone());
        let boundary = FaultBoundary::new(config.build_mode);

        Self { config, preferences, reflector, boundary }
    }

    /// Configuration the app was built with
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Shared preference store
    pub fn preferences(&self) -> &Arc<PreferenceStore> {
        &self.preferences
    }

    /// Root style as last reflected
    pub fn root_style(&self) -> RootStyle {
        self.reflector.snapshot()
    }

    /// Root fault boundary
    pub fn boundary(&self) -> &FaultBoundary {
        &self.boundary
    }

    /// Render the screen tree through the root boundary
    pub fn render<V, E, F>(&mut self, screen: F) -> Rendered<V>
    where
        F: FnOnce() -> Result<V, E>,
        E: fmt::Display,
    {
        self.boundary.render(screen)
    }

    /// Run a recovery action chosen on the fallback screen
    ///
    /// Reload rebuilds the boundary, as a fresh mount would. Preferences
    /// survive because the store is not part of the boundary's subtree.
    pub fn recover(&mut self, action: RecoveryAction) -> Recovery {
        let recovery = self.boundary.handle(action);
        if recovery == Recovery::Reloaded {
            self.boundary = FaultBoundary::new(self.config.build_mode);
        }
        recovery
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_ui::{AppearanceMode, BuildMode, ColorPalette};
    use storage::{MemoryStorage, StorageBackend};

    fn memory_app(mode: BuildMode) -> App {
        App::bootstrap(AppConfig::new().build_mode(mode).storage(StorageBackend::Memory)).unwrap()
    }

    #[test]
    fn test_bootstrap_reflects_initial_state() {
        let app = memory_app(BuildMode::Production);
        let root = app.root_style();

        assert!(root.has_class("light"));
        assert_eq!(root.attribute("data-font-size"), Some("medium"));
    }

    #[test]
    fn test_preference_changes_reach_root_style() {
        let app = memory_app(BuildMode::Production);
        app.preferences().toggle_appearance_mode();
        app.preferences().set_color_palette(ColorPalette::Blue);

        let root = app.root_style();
        assert_eq!(app.preferences().appearance_mode(), AppearanceMode::Dark);
        assert_eq!(root.class_list(), "dark theme-blue");
    }

    #[test]
    fn test_with_storage_reads_existing_values() {
        let storage = Arc::new(MemoryStorage::with_entries([("theme", "dark")]));
        let app = App::with_storage(AppConfig::new(), storage);

        assert!(app.root_style().has_class("dark"));
    }

    #[test]
    fn test_render_and_recover() {
        let mut app = memory_app(BuildMode::Development);

        let rendered = app.render(|| Err::<(), _>("profile not loaded"));
        assert!(matches!(rendered, Rendered::Fallback(_)));
        assert!(app.boundary().is_faulted());

        assert_eq!(app.recover(RecoveryAction::Reload), Recovery::Reloaded);
        assert!(!app.boundary().is_faulted());
        assert_eq!(app.render(|| Ok::<_, String>(7)), Rendered::Children(7));
    }
}
