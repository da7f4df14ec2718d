//! Preference store
//!
//! The single owner of the four appearance preferences. Consumers read
//! snapshots and call the mutators; every mutation persists its own key and
//! then notifies subscribers (the root style reflector among them).
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use app_ui::preferences::PreferenceStore;
//! use app_ui::theme::{AppearanceMode, ContrastLevel};
//! use storage::{MemoryStorage, PreferenceStorage};
//!
//! let storage = Arc::new(MemoryStorage::new());
//! let store = PreferenceStore::initialize(storage.clone());
//!
//! store.toggle_appearance_mode();
//! store.set_contrast_level(ContrastLevel::High);
//!
//! assert_eq!(store.appearance_mode(), AppearanceMode::Dark);
//! assert_eq!(storage.get("contrast").unwrap().as_deref(), Some("high"));
//! ```

use crate::theme::{
    AppearanceMode, ColorPalette, ContrastLevel, FontSize, ParsePreferenceError, PreferenceState,
};
use parking_lot::RwLock;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use storage::PreferenceStorage;
use tokio::sync::watch;

/// Storage key for the appearance mode
pub const THEME_KEY: &str = "theme";
/// Storage key for the color palette
pub const COLOR_MODE_KEY: &str = "color-mode";
/// Storage key for the font size
pub const FONT_SIZE_KEY: &str = "font-size";
/// Storage key for the contrast level
pub const CONTRAST_KEY: &str = "contrast";

/// Receives every preference change
pub trait PreferenceObserver: Send + Sync {
    /// Called with the full state after any dimension changes
    fn preferences_changed(&self, state: &PreferenceState);
}

impl<F> PreferenceObserver for F
where
    F: Fn(&PreferenceState) + Send + Sync,
{
    fn preferences_changed(&self, state: &PreferenceState) {
        self(state)
    }
}

/// Handle returned by [`PreferenceStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Process-wide holder of the appearance preferences
pub struct PreferenceStore {
    storage: Arc<dyn PreferenceStorage>,
    state: RwLock<PreferenceState>,
    observers: RwLock<Vec<(SubscriptionId, Arc<dyn PreferenceObserver>)>>,
    next_subscription: AtomicU64,
    state_tx: watch::Sender<PreferenceState>,
}

impl std::fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceStore")
            .field("state", &*self.state.read())
            .field("observers", &self.observers.read().len())
            .finish()
    }
}

impl PreferenceStore {
    /// Load every dimension from storage, falling back to defaults
    ///
    /// Each key is read on its own, so one missing or corrupt value never
    /// affects the others.
    pub fn initialize(storage: Arc<dyn PreferenceStorage>) -> Self {
        let state = PreferenceState {
            appearance_mode: read_dimension(storage.as_ref(), THEME_KEY),
            color_palette: read_dimension(storage.as_ref(), COLOR_MODE_KEY),
            font_size: read_dimension(storage.as_ref(), FONT_SIZE_KEY),
            contrast_level: read_dimension(storage.as_ref(), CONTRAST_KEY),
        };
        tracing::debug!(?state, "Preferences initialized");

        let (state_tx, _) = watch::channel(state);

        Self {
            storage,
            state: RwLock::new(state),
            observers: RwLock::new(Vec::new()),
            next_subscription: AtomicU64::new(0),
            state_tx,
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> PreferenceState {
        *self.state.read()
    }

    /// Current appearance mode
    pub fn appearance_mode(&self) -> AppearanceMode {
        self.state.read().appearance_mode
    }

    /// Current color palette
    pub fn color_palette(&self) -> ColorPalette {
        self.state.read().color_palette
    }

    /// Current font size
    pub fn font_size(&self) -> FontSize {
        self.state.read().font_size
    }

    /// Current contrast level
    pub fn contrast_level(&self) -> ContrastLevel {
        self.state.read().contrast_level
    }

    /// Set the appearance mode
    pub fn set_appearance_mode(&self, mode: AppearanceMode) {
        self.update(THEME_KEY, |state| {
            state.appearance_mode = mode;
            mode.as_str()
        });
    }

    /// Flip between light and dark, returning the new mode
    pub fn toggle_appearance_mode(&self) -> AppearanceMode {
        let state = self.update(THEME_KEY, |state| {
            state.appearance_mode = state.appearance_mode.toggled();
            state.appearance_mode.as_str()
        });
        state.appearance_mode
    }

    /// Set the color palette
    pub fn set_color_palette(&self, palette: ColorPalette) {
        self.update(COLOR_MODE_KEY, |state| {
            state.color_palette = palette;
            palette.as_str()
        });
    }

    /// Set the font size
    pub fn set_font_size(&self, size: FontSize) {
        self.update(FONT_SIZE_KEY, |state| {
            state.font_size = size;
            size.as_str()
        });
    }

    /// Set the contrast level
    pub fn set_contrast_level(&self, level: ContrastLevel) {
        self.update(CONTRAST_KEY, |state| {
            state.contrast_level = level;
            level.as_str()
        });
    }

    /// Flip between normal and high contrast, returning the new level
    pub fn toggle_high_contrast(&self) -> ContrastLevel {
        let state = self.update(CONTRAST_KEY, |state| {
            state.contrast_level = state.contrast_level.toggled();
            state.contrast_level.as_str()
        });
        state.contrast_level
    }

    /// Register an observer
    ///
    /// The observer is called once right away with the current state and
    /// then after every mutation, in registration order.
    pub fn subscribe(&self, observer: impl PreferenceObserver + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        let observer: Arc<dyn PreferenceObserver> = Arc::new(observer);

        self.observers.write().push((id, Arc::clone(&observer)));
        observer.preferences_changed(&self.state());
        id
    }

    /// Remove an observer. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.observers.write();
        let before = observers.len();
        observers.retain(|(existing, _)| *existing != id);
        observers.len() != before
    }

    /// Receiver that always holds the latest state
    pub fn watch(&self) -> watch::Receiver<PreferenceState> {
        self.state_tx.subscribe()
    }

    fn update<F>(&self, key: &'static str, mutate: F) -> PreferenceState
    where
        F: FnOnce(&mut PreferenceState) -> &'static str,
    {
        let (snapshot, value) = {
            let mut state = self.state.write();
            let value = mutate(&mut state);
            (*state, value)
        };
        tracing::debug!(key, value, "Preference changed");

        if let Err(e) = self.storage.set(key, value) {
            tracing::warn!(key, value, error = %e, "Failed to persist preference");
        }

        self.notify(&snapshot);
        snapshot
    }

    fn notify(&self, state: &PreferenceState) {
        self.state_tx.send_replace(*state);

        // Observers run without the lock held so they may subscribe or read.
        let observers: Vec<Arc<dyn PreferenceObserver>> =
            self.observers.read().iter().map(|(_, o)| Arc::clone(o)).collect();
        for observer in observers {
            observer.preferences_changed(state);
        }
    }
}

fn read_dimension<T>(storage: &dyn PreferenceStorage, key: &str) -> T
where
    T: FromStr<Err = ParsePreferenceError> + Default,
{
    match storage.get(key) {
        Ok(Some(raw)) => raw.parse().unwrap_or_else(|e: ParsePreferenceError| {
            tracing::warn!(key, error = %e, "Ignoring persisted preference");
            T::default()
        }),
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read preference");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;
    use mockall::predicate::eq;
    use parking_lot::Mutex;
    use storage::{MemoryStorage, StorageError};

    mock! {
        pub Storage {}

        impl PreferenceStorage for Storage {
            fn get(&self, key: &str) -> storage::backend::Result<Option<String>>;
            fn set(&self, key: &str, value: &str) -> storage::backend::Result<()>;
        }
    }

    fn memory_store() -> (Arc<MemoryStorage>, PreferenceStore) {
        let storage = Arc::new(MemoryStorage::new());
        let store = PreferenceStore::initialize(storage.clone());
        (storage, store)
    }

    #[test]
    fn test_initialize_empty_storage_uses_defaults() {
        let (storage, store) = memory_store();
        assert_eq!(store.state(), PreferenceState::default());
        // Initialization never writes.
        assert!(storage.is_empty());
    }

    #[test]
    fn test_initialize_reads_each_key() {
        let storage = Arc::new(MemoryStorage::with_entries([
            (THEME_KEY, "dark"),
            (COLOR_MODE_KEY, "purple"),
            (FONT_SIZE_KEY, "large"),
            (CONTRAST_KEY, "high"),
        ]));
        let store = PreferenceStore::initialize(storage);

        assert_eq!(store.appearance_mode(), AppearanceMode::Dark);
        assert_eq!(store.color_palette(), ColorPalette::Purple);
        assert_eq!(store.font_size(), FontSize::Large);
        assert_eq!(store.contrast_level(), ContrastLevel::High);
    }

    #[test]
    fn test_corrupt_value_falls_back_for_that_dimension_only() {
        let storage = Arc::new(MemoryStorage::with_entries([
            (THEME_KEY, "sepia"),
            (FONT_SIZE_KEY, "small"),
        ]));
        let store = PreferenceStore::initialize(storage);

        assert_eq!(store.appearance_mode(), AppearanceMode::Light);
        assert_eq!(store.font_size(), FontSize::Small);
    }

    #[test]
    fn test_read_failure_falls_back_for_that_dimension_only() {
        let mut mock = MockStorage::new();
        mock.expect_get()
            .with(eq(COLOR_MODE_KEY))
            .returning(|_| Err(StorageError::Unavailable("locked".to_string())));
        mock.expect_get().with(eq(THEME_KEY)).returning(|_| Ok(Some("dark".to_string())));
        mock.expect_get().with(eq(FONT_SIZE_KEY)).returning(|_| Ok(None));
        mock.expect_get().with(eq(CONTRAST_KEY)).returning(|_| Ok(Some("high".to_string())));

        let store = PreferenceStore::initialize(Arc::new(mock));

        assert_eq!(store.appearance_mode(), AppearanceMode::Dark);
        assert_eq!(store.contrast_level(), ContrastLevel::High);
        assert_eq!(store.color_palette(), ColorPalette::Default);
        assert_eq!(store.font_size(), FontSize::Medium);
    }

    #[test]
    fn test_each_setter_writes_only_its_key() {
        let mut mock = MockStorage::new();
        mock.expect_get().returning(|_| Ok(None));
        mock.expect_set()
            .with(eq(FONT_SIZE_KEY), eq("xlarge"))
            .times(1)
            .returning(|_, _| Ok(()));

        let store = PreferenceStore::initialize(Arc::new(mock));
        store.set_font_size(FontSize::XLarge);

        assert_eq!(store.font_size(), FontSize::XLarge);
    }

    #[test]
    fn test_write_failure_keeps_memory_authoritative() {
        let mut mock = MockStorage::new();
        mock.expect_get().returning(|_| Ok(None));
        mock.expect_set()
            .returning(|_, _| Err(StorageError::Unavailable("quota exceeded".to_string())));

        let store = PreferenceStore::initialize(Arc::new(mock));
        store.set_color_palette(ColorPalette::Green);
        store.set_contrast_level(ContrastLevel::High);

        assert_eq!(store.color_palette(), ColorPalette::Green);
        assert_eq!(store.contrast_level(), ContrastLevel::High);
    }

    #[test]
    fn test_toggle_twice_restores_mode() {
        let (storage, store) = memory_store();

        assert_eq!(store.toggle_appearance_mode(), AppearanceMode::Dark);
        assert_eq!(storage.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
        assert_eq!(store.toggle_appearance_mode(), AppearanceMode::Light);
        assert_eq!(storage.get(THEME_KEY).unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_five_toggles_flip_mode() {
        let (_, store) = memory_store();
        let original = store.appearance_mode();

        for _ in 0..5 {
            store.toggle_appearance_mode();
        }

        assert_eq!(store.appearance_mode(), original.toggled());
    }

    #[test]
    fn test_set_appearance_mode() {
        let (storage, store) = memory_store();
        store.set_appearance_mode(AppearanceMode::Dark);
        assert_eq!(store.appearance_mode(), AppearanceMode::Dark);
        assert_eq!(storage.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_toggle_high_contrast() {
        let (storage, store) = memory_store();

        assert_eq!(store.toggle_high_contrast(), ContrastLevel::High);
        assert_eq!(storage.get(CONTRAST_KEY).unwrap().as_deref(), Some("high"));
        assert_eq!(store.toggle_high_contrast(), ContrastLevel::Normal);
        assert_eq!(storage.get(CONTRAST_KEY).unwrap().as_deref(), Some("normal"));
    }

    #[test]
    fn test_setter_leaves_other_dimensions_alone() {
        let (storage, store) = memory_store();
        store.set_color_palette(ColorPalette::Pink);

        let state = store.state();
        assert_eq!(state.color_palette, ColorPalette::Pink);
        assert_eq!(state.appearance_mode, AppearanceMode::Light);
        assert_eq!(state.font_size, FontSize::Medium);
        assert_eq!(state.contrast_level, ContrastLevel::Normal);
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_subscribe_receives_current_then_changes() {
        let (_, store) = memory_store();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        store.subscribe(move |state: &PreferenceState| sink.lock().push(*state));
        store.set_font_size(FontSize::Small);

        let seen = seen.lock();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], PreferenceState::default());
        assert_eq!(seen[1].font_size, FontSize::Small);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let (_, store) = memory_store();
        let calls = Arc::new(AtomicU64::new(0));

        let counter = Arc::clone(&calls);
        let id = store.subscribe(move |_: &PreferenceState| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));

        store.toggle_appearance_mode();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_observers_notified_in_registration_order() {
        let (_, store) = memory_store();
        let order = Arc::new(Mutex::new(Vec::new()));

        for name in ["first", "second"] {
            let order = Arc::clone(&order);
            store.subscribe(move |_: &PreferenceState| order.lock().push(name));
        }
        order.lock().clear();

        store.set_contrast_level(ContrastLevel::High);
        assert_eq!(*order.lock(), vec!["first", "second"]);
    }

    #[test]
    fn test_watch_tracks_latest_state() {
        let (_, store) = memory_store();
        let rx = store.watch();

        store.set_color_palette(ColorPalette::Blue);
        store.set_appearance_mode(AppearanceMode::Dark);

        let latest = *rx.borrow();
        assert_eq!(latest.color_palette, ColorPalette::Blue);
        assert_eq!(latest.appearance_mode, AppearanceMode::Dark);
    }
}
