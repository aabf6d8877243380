//! In-process backend, used by tests and by `backend = "memory"`.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::debug;

use super::factory::{StoreConfig, StoreFactory};
use super::repository::{SnapshotStore, StoreError};

#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn blobs(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.blobs
            .lock()
            .map_err(|e| StoreError::Database(format!("memory store poisoned: {e}")))
    }
}

#[async_trait]
impl SnapshotStore for MemoryStore {
    async fn load(&self, key: &str) -> Result<String, StoreError> {
        self.blobs()?
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    async fn save(&self, key: &str, blob: &str) -> Result<(), StoreError> {
        debug!(key, bytes = blob.len(), "Saving form state in memory");
        self.blobs()?.insert(key.to_string(), blob.to_string());
        Ok(())
    }

    async fn clear(&self, key: &str) -> Result<(), StoreError> {
        self.blobs()?.remove(key);
        Ok(())
    }
}

/// Registers [`MemoryStore`] under the `memory` backend name.
pub struct MemoryStoreFactory;

#[async_trait]
impl StoreFactory for MemoryStoreFactory {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(&self, _config: &StoreConfig) -> Result<Box<dyn SnapshotStore>, StoreError> {
        Ok(Box::new(MemoryStore::new()))
    }
}
