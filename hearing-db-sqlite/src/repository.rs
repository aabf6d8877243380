use std::str::FromStr;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hearing_core::{SnapshotStore, StoreError};
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::debug;

const MEMORY: &str = ":memory:";

pub struct SqliteSnapshotStore {
    pool: SqlitePool,
}

impl SqliteSnapshotStore {
    /// Opens `database`, a file path (created if missing) or `:memory:`.
    pub async fn new(database: &str) -> Result<Self> {
        if database == MEMORY || database == "sqlite::memory:" {
            // Each in-memory connection is its own database.
            let pool = SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect("sqlite::memory:")
                .await
                .context("Failed to open in-memory database")?;
            return Ok(Self { pool });
        }

        let options = SqliteConnectOptions::from_str(database)
            .with_context(|| format!("Invalid database path: {database}"))?
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to database: {database}"))?;
        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// When the blob under `key` was last saved.
    pub async fn saved_at(&self, key: &str) -> Result<DateTime<Utc>, StoreError> {
        let row = sqlx::query("SELECT saved_at FROM form_state WHERE state_key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;

        row.try_get("saved_at")
            .map_err(|e| StoreError::Database(e.to_string()))
    }
}

#[async_trait]
impl SnapshotStore for SqliteSnapshotStore {
    async fn load(&self, key: &str) -> Result<String, StoreError> {
        let row = sqlx::query("SELECT blob FROM form_state WHERE state_key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;

        row.try_get("blob")
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    async fn save(&self, key: &str, blob: &str) -> Result<(), StoreError> {
        let saved_at = Utc::now();
        sqlx::query(
            "INSERT INTO form_state (state_key, blob, saved_at) VALUES (?, ?, ?)
             ON CONFLICT(state_key) DO UPDATE SET blob = excluded.blob, saved_at = excluded.saved_at",
        )
        .bind(key)
        .bind(blob)
        .bind(saved_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        debug!(key, bytes = blob.len(), "Saved form state to SQLite");
        Ok(())
    }

    async fn clear(&self, key: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM form_state WHERE state_key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        debug!(key, removed = result.rows_affected(), "Cleared form state in SQLite");
        Ok(())
    }
}
