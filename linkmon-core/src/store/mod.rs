//! Status storage with SQLite persistence.
//!
//! The StatusStore owns the durable log of device status snapshots. No other
//! component touches persisted data; everything goes through its four
//! operations: save, latest, recent, recent_for_device.
//!
//! Payloads are stored as opaque serialized documents and never decomposed
//! into columns beyond `timestamp` and `device_id`. That keeps the schema
//! decoupled from the evolving shape of device telemetry, at the cost of not
//! being able to query on payload fields.
//!
//! The store emits no logs and no metrics of its own; observability belongs
//! to its callers.

use crate::error::{LinkmonError, Result};
use crate::types::StatusRecord;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{ConnectOptions, Row};
use std::path::Path;
use std::str::FromStr;

pub mod migrations;


/// Window applied by `recent` when the caller supplies no usable limit.
pub const DEFAULT_RECENT_LIMIT: i64 = 100;

/// Window applied by `recent_for_device` when the caller supplies no usable limit.
pub const DEFAULT_DEVICE_LIMIT: i64 = 50;

/// Append-only store of status records.
///
/// Cloning is cheap; all clones share one connection pool, and every
/// operation is safe under concurrent callers without external locking.
#[derive(Clone)]
pub struct StatusStore {
    pool: SqlitePool,
}

impl StatusStore {
    /// Open a store with an in-memory database (for tests).
    pub async fn open_in_memory() -> Result<Self> {
        Self::open(":memory:").await
    }

    /// Get a reference to the underlying SQLite pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Open a store backed by a database file at the given path.
    pub async fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref();

        // Create parent directory if it doesn't exist (but not for :memory:)
        if db_path != Path::new(":memory:") {
            if let Some(parent) = db_path.parent() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    LinkmonError::InvalidConfig {
                        reason: format!("Failed to create directory {}: {}", parent.display(), e),
                    }
                })?;
            }
        }

        // Configure SQLite connection
        let mut options = SqliteConnectOptions::from_str(db_path.to_str().ok_or_else(|| {
            LinkmonError::InvalidConfig { reason: "Invalid database path".to_string() }
        })?)
        .map_err(|e| LinkmonError::Storage(e.to_string()))?;

        options = options.create_if_missing(true).log_statements(tracing::log::LevelFilter::Debug);

        // Create connection pool
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| LinkmonError::Storage(e.to_string()))?;

        let store = Self { pool };
        migrations::run(&store.pool).await?;
        Ok(store)
    }

    /// Close the store, draining the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Append one record to the log.
    ///
    /// The record is durably written before this returns. A failed save
    /// leaves the log untouched; there is no partial write to observe.
    /// Identical records are appended again, never deduplicated.
    pub async fn save(&self, record: &StatusRecord) -> Result<()> {
        record.validate()?;

        let data = serde_json::to_string(&record.payload)
            .map_err(|e| LinkmonError::Storage(format!("Failed to serialize payload: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO status_reports (timestamp, device_id, data)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&record.timestamp)
        .bind(&record.device_id)
        .bind(data)
        .execute(&self.pool)
        .await
        .map_err(|e| LinkmonError::Storage(e.to_string()))?;

        Ok(())
    }

    /// The single newest record across all devices, if any.
    pub async fn latest(&self) -> Result<Option<StatusRecord>> {
        let row = sqlx::query(
            r#"
            SELECT timestamp, device_id, data FROM status_reports
            ORDER BY timestamp DESC, id DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| LinkmonError::Storage(e.to_string()))?;

        row.map(row_to_record).transpose()
    }

    /// Up to `limit` records across all devices, newest first.
    ///
    /// A non-positive limit falls back to [`DEFAULT_RECENT_LIMIT`]. An empty
    /// store yields an empty vec, not an error.
    pub async fn recent(&self, limit: i64) -> Result<Vec<StatusRecord>> {
        let limit = if limit > 0 { limit } else { DEFAULT_RECENT_LIMIT };

        let rows = sqlx::query(
            r#"
            SELECT timestamp, device_id, data FROM status_reports
            ORDER BY timestamp DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| LinkmonError::Storage(e.to_string()))?;

        rows.into_iter().map(row_to_record).collect()
    }

    /// Up to `limit` records for one device, newest first.
    ///
    /// Matching is exact; an unknown device yields an empty vec. A
    /// non-positive limit falls back to [`DEFAULT_DEVICE_LIMIT`].
    pub async fn recent_for_device(
        &self,
        device_id: &str,
        limit: i64,
    ) -> Result<Vec<StatusRecord>> {
        let limit = if limit > 0 { limit } else { DEFAULT_DEVICE_LIMIT };

        let rows = sqlx::query(
            r#"
            SELECT timestamp, device_id, data FROM status_reports
            WHERE device_id = ?
            ORDER BY timestamp DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(device_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| LinkmonError::Storage(e.to_string()))?;

        rows.into_iter().map(row_to_record).collect()
    }
}

fn row_to_record(row: SqliteRow) -> Result<StatusRecord> {
    let data: String = row.get("data");
    let payload = serde_json::from_str(&data)
        .map_err(|e| LinkmonError::Storage(format!("Failed to deserialize payload: {}", e)))?;

    Ok(StatusRecord {
        timestamp: row.get("timestamp"),
        device_id: row.get("device_id"),
        payload,
    })
}
