//! The save slot abstraction.
//!
//! A [`SaveStore`] is an opaque string key/value slot. The tank is stored as
//! one JSON document under a single key; the store never interprets it.

use std::future::Future;

use crate::dragonfly::DragonflyStore;
use crate::error::StoreError;
use crate::file::FileStore;
use crate::memory::MemoryStore;

/// A string key/value slot.
pub trait SaveStore: Send + Sync {
    /// Read the value at `key`, or `None` when nothing is stored.
    fn load(&self, key: &str) -> impl Future<Output = Result<Option<String>, StoreError>> + Send;

    /// Overwrite the value at `key`.
    fn save(&self, key: &str, value: &str) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Any of the built-in backends, selected at runtime from configuration.
#[derive(Clone)]
pub enum AnyStore {
    /// Process memory.
    Memory(MemoryStore),
    /// One file per key.
    File(FileStore),
    /// `Dragonfly` (Redis-compatible).
    Dragonfly(DragonflyStore),
}

impl AnyStore {
    /// Short backend name for logging.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::File(_) => "file",
            Self::Dragonfly(_) => "dragonfly",
        }
    }
}

impl SaveStore for AnyStore {
    async fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self {
            Self::Memory(store) => store.load(key).await,
            Self::File(store) => store.load(key).await,
            Self::Dragonfly(store) => store.load(key).await,
        }
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        match self {
            Self::Memory(store) => store.save(key, value).await,
            Self::File(store) => store.save(key, value).await,
            Self::Dragonfly(store) => store.save(key, value).await,
        }
    }
}
