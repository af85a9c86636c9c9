//! Persistent cart storage.
//!
//! The engine persists the cart line list as a single JSON blob under one
//! fixed key. The store is a plain key-value surface with no transactional
//! guarantees; last write wins. Missing or malformed content is never an
//! error at the engine boundary; it restores as an empty cart.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

mod file;
mod memory;
pub mod records;

pub use file::JsonFileStorage;
pub use memory::MemoryStorage;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failure.
    #[error("storage i/o error")]
    Io(#[from] std::io::Error),
}

/// Key-value blob store the cart is persisted in.
#[automock]
#[async_trait]
pub trait CartStorage: Send + Sync {
    /// Reads the blob stored under `key`, or `None` when absent.
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Writes `blob` under `key`, replacing any previous value.
    async fn write(&self, key: &str, blob: &[u8]) -> Result<(), StorageError>;
}
