//! In-memory object store
//!
//! Backs pipeline tests and local experiments without touching disk.

use std::collections::BTreeMap;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;

use crate::error::StoreError;
use crate::ObjectStore;

/// Object store held entirely in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: Mutex<BTreeMap<String, Bytes>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects
    pub fn len(&self) -> usize {
        self.objects.lock().len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.objects.lock().is_empty()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn list(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        Ok(self
            .objects
            .lock()
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn read(&self, key: &str) -> Result<Bytes, StoreError> {
        self.objects
            .lock()
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                key: key.to_string(),
            })
    }

    async fn write(&self, key: &str, data: &[u8]) -> Result<(), StoreError> {
        self.objects
            .lock()
            .insert(key.to_string(), Bytes::copy_from_slice(data));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_read_list() {
        let store = MemoryStore::new();
        store.write("a/one.json", b"1").await.unwrap();
        store.write("a/two.json", b"2").await.unwrap();
        store.write("b/three.json", b"3").await.unwrap();

        assert_eq!(store.len(), 3);
        assert_eq!(&store.read("a/two.json").await.unwrap()[..], b"2");
        assert_eq!(store.list("a/").await.unwrap().len(), 2);
        assert!(store.list("c/").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_read_missing() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.read("missing").await,
            Err(StoreError::NotFound { .. })
        ));
    }
}
