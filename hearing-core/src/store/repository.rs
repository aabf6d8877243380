use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("No form state saved under '{0}'")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Keyed storage for serialized form blobs.
///
/// Each key holds at most one blob; saving replaces it whole.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// The blob saved under `key`, or [`StoreError::NotFound`].
    async fn load(&self, key: &str) -> Result<String, StoreError>;

    async fn save(&self, key: &str, blob: &str) -> Result<(), StoreError>;

    /// Removes the blob under `key`. Clearing an absent key is not an error.
    async fn clear(&self, key: &str) -> Result<(), StoreError>;
}
