//! Storage capability used by the preference store
//!
//! The preference store only ever needs to read and write single string
//! values by key. Which backend provides that is decided once, when the
//! application is composed, through [`StorageBackend`].

use crate::kv::{KvConfig, KvError, KvStore};
use crate::memory::MemoryStorage;
use std::sync::Arc;
use thiserror::Error;

/// Storage error types
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying key-value store failed
    #[error(transparent)]
    Kv(#[from] KvError),

    /// Backend cannot be reached at all
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Result type for storage operations
pub type Result<T> = std::result::Result<T, StorageError>;

/// String key-value capability
pub trait PreferenceStorage: Send + Sync {
    /// Read the value stored under `key`, `None` when absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl PreferenceStorage for KvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(KvStore::get::<String>(self, key)?)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        Ok(KvStore::set(self, key, &value)?)
    }
}

impl<S: PreferenceStorage + ?Sized> PreferenceStorage for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// Backend selection, resolved at composition time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// Process-local map; the web session store
    Memory,
    /// Sled database on the device
    Sled(KvConfig),
}

impl Default for StorageBackend {
    fn default() -> Self {
        StorageBackend::Sled(KvConfig::default())
    }
}

impl StorageBackend {
    /// Open the selected backend
    pub fn open(&self) -> Result<Arc<dyn PreferenceStorage>> {
        match self {
            StorageBackend::Memory => Ok(Arc::new(MemoryStorage::new())),
            StorageBackend::Sled(config) => Ok(Arc::new(KvStore::new(config.clone())?)),
        }
    }

    /// Short name used in logs and configuration
    pub fn name(&self) -> &'static str {
        match self {
            StorageBackend::Memory => "memory",
            StorageBackend::Sled(_) => "sled",
        }
    }
}
