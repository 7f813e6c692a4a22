//! Filesystem-backed object store
//!
//! Keys are `/`-separated paths resolved under a root directory. Writes
//! create intermediate directories; listing walks the tree and returns keys
//! relative to the root.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;

use crate::error::StoreError;
use crate::ObjectStore;

/// Object store rooted at a local directory
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Create a store rooted at `root` (created lazily on first write)
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

fn io_error(path: &Path, source: io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        source,
    }
}

#[async_trait]
impl ObjectStore for FsStore {
    async fn list(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let mut keys = Vec::new();

        // A store that has never been written to lists as empty
        if fs::metadata(&self.root).await.is_err() {
            return Ok(keys);
        }

        let mut pending = vec![self.root.clone()];
        while let Some(dir) = pending.pop() {
            let mut entries = fs::read_dir(&dir).await.map_err(|e| io_error(&dir, e))?;
            while let Some(entry) = entries.next_entry().await.map_err(|e| io_error(&dir, e))? {
                let path = entry.path();
                let file_type = entry.file_type().await.map_err(|e| io_error(&path, e))?;
                if file_type.is_dir() {
                    pending.push(path);
                } else {
                    let rel = path.strip_prefix(&self.root).unwrap_or(&path);
                    let key = rel.to_string_lossy().replace('\\', "/");
                    if key.starts_with(prefix) {
                        keys.push(key);
                    }
                }
            }
        }

        tracing::debug!(prefix, count = keys.len(), "listed objects");
        Ok(keys)
    }

    async fn read(&self, key: &str) -> Result<Bytes, StoreError> {
        let path = self.resolve(key);
        match fs::read(&path).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StoreError::NotFound {
                key: key.to_string(),
            }),
            Err(e) => Err(io_error(&path, e)),
        }
    }

    async fn write(&self, key: &str, data: &[u8]) -> Result<(), StoreError> {
        let path = self.resolve(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error(parent, e))?;
        }
        fs::write(&path, data).await.map_err(|e| io_error(&path, e))
    }
}

#[cfg(test)]
#[path = "fs_test.rs"]
mod fs_test;
