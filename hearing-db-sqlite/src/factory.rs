use async_trait::async_trait;
use hearing_core::store::{SnapshotStore, StoreConfig, StoreError, StoreFactory};

use crate::repository::SqliteSnapshotStore;

/// [`StoreFactory`] for SQLite.
///
/// Register this with a [`hearing_core::StoreRegistry`] to make the
/// `"sqlite"` backend available:
///
/// ```rust,no_run
/// use hearing_core::StoreRegistry;
/// use hearing_db_sqlite::SqliteStoreFactory;
///
/// let mut registry = StoreRegistry::new();
/// registry.register(Box::new(SqliteStoreFactory));
/// ```
pub struct SqliteStoreFactory;

#[async_trait]
impl StoreFactory for SqliteStoreFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Open the database in `config.connection_string` and migrate it.
    ///
    /// Accepts a file path (created if missing) or `":memory:"`.
    async fn create(&self, config: &StoreConfig) -> Result<Box<dyn SnapshotStore>, StoreError> {
        let store = SqliteSnapshotStore::new(&config.connection_string)
            .await
            .map_err(|e| StoreError::Connection(format!("{e:#}")))?;
        store
            .run_migrations()
            .await
            .map_err(|e| StoreError::Database(format!("{e:#}")))?;
        Ok(Box::new(store))
    }
}

#[cfg(test)]
mod tests {
    use hearing_core::store::{StoreConfig, StoreFactory};

    use super::SqliteStoreFactory;

    #[test]
    fn backend_name_is_sqlite() {
        assert_eq!(SqliteStoreFactory.backend_name(), "sqlite");
    }

    #[tokio::test]
    async fn creates_in_memory_store() {
        let config = StoreConfig {
            backend: "sqlite".to_string(),
            connection_string: ":memory:".to_string(),
        };

        let result = SqliteStoreFactory.create(&config).await;
        assert!(result.is_ok(), "failed to create in-memory store: {:#?}", result.err());
    }
}
