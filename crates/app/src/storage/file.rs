//! JSON file storage backend.

use std::{
    io,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tokio::fs;

use super::{CartStorage, StorageError};

/// File-per-key blob store rooted at a directory.
///
/// The local-storage analogue for a desktop process: each key maps to
/// `<root>/<key>.json`. The root directory is created lazily on first
/// write.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    root: PathBuf,
}

impl JsonFileStorage {
    /// Creates a store rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    /// The root directory of the store.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl CartStorage for JsonFileStorage {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        match fs::read(self.path_for(key)).await {
            Ok(blob) => Ok(Some(blob)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    async fn write(&self, key: &str, blob: &[u8]) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root).await?;
        fs::write(self.path_for(key), blob).await?;

        Ok(())
    }
}
