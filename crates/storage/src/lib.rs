//! Storage layer for CampusTrace
//!
//! This crate provides the key-value capability the preference store
//! persists through, with a sled-backed device store and an in-memory
//! store for web sessions and tests.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod kv;
pub mod memory;

pub use backend::{PreferenceStorage, StorageBackend, StorageError};
pub use kv::{KvConfig, KvError, KvStore};
pub use memory::MemoryStorage;
