//! In-memory storage backend.

use async_trait::async_trait;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use super::{CartStorage, StorageError};

/// Non-durable blob store; used by tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blobs: Mutex<FxHashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with one key, for restore tests.
    #[must_use]
    pub fn with_blob(key: impl Into<String>, blob: impl Into<Vec<u8>>) -> Self {
        let storage = Self::new();
        storage.blobs.lock().insert(key.into(), blob.into());
        storage
    }
}

#[async_trait]
impl CartStorage for MemoryStorage {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.blobs.lock().get(key).cloned())
    }

    async fn write(&self, key: &str, blob: &[u8]) -> Result<(), StorageError> {
        self.blobs.lock().insert(key.to_string(), blob.to_vec());

        Ok(())
    }
}
