//! In-memory string store
//!
//! Mirrors the browser's local storage: a flat map of string keys to string
//! values that lives as long as the process.

use crate::backend::{PreferenceStorage, Result};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Process-local preference storage
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with entries
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self { entries: RwLock::new(entries) }
    }

    /// Copy of all stored entries
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.entries.read().clone()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl PreferenceStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store() {
        let storage = MemoryStorage::new();
        assert!(storage.is_empty());
        assert_eq!(storage.get("theme").unwrap(), None);
    }

    #[test]
    fn test_set_overwrites() {
        let storage = MemoryStorage::new();
        storage.set("theme", "dark").unwrap();
        storage.set("theme", "light").unwrap();

        assert_eq!(storage.len(), 1);
        assert_eq!(storage.get("theme").unwrap(), Some("light".to_string()));
    }

    #[test]
    fn test_with_entries() {
        let storage = MemoryStorage::with_entries([("contrast", "high"), ("font-size", "small")]);

        let snapshot = storage.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get("contrast").map(String::as_str), Some("high"));
    }
}
