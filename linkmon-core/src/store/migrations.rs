//! Database schema setup.

use crate::error::{LinkmonError, Result};
use sqlx::SqlitePool;

const SCHEMA_VERSION: i64 = 1;

pub async fn run(pool: &SqlitePool) -> Result<()> {
    // Create schema_version table if not exists
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| LinkmonError::MigrationFailed { reason: e.to_string() })?;

    // Get current schema version
    let current_version: Option<i64> =
        sqlx::query_scalar("SELECT version FROM schema_version LIMIT 1")
            .fetch_optional(pool)
            .await
            .map_err(|e| LinkmonError::MigrationFailed { reason: e.to_string() })?;

    let current_version = current_version.unwrap_or(0);

    if current_version >= SCHEMA_VERSION {
        return Ok(());
    }

    if current_version < 1 {
        migrate_to_v1(pool).await?;
    }

    Ok(())
}

async fn migrate_to_v1(pool: &SqlitePool) -> Result<()> {
    // Append-only status log. The payload goes into `data` verbatim;
    // timestamp and device_id are the only indexed columns.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS status_reports (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            timestamp TEXT NOT NULL,
            device_id TEXT NOT NULL,
            data TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| LinkmonError::MigrationFailed { reason: e.to_string() })?;

    // Ordering index: latest/recent must not scan the whole log
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_status_reports_timestamp ON status_reports(timestamp DESC)",
    )
    .execute(pool)
    .await
    .map_err(|e| LinkmonError::MigrationFailed { reason: e.to_string() })?;

    // Lookup index for per-device history
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_status_reports_device ON status_reports(device_id)",
    )
    .execute(pool)
    .await
    .map_err(|e| LinkmonError::MigrationFailed { reason: e.to_string() })?;

    // Update schema version
    sqlx::query("DELETE FROM schema_version")
        .execute(pool)
        .await
        .map_err(|e| LinkmonError::MigrationFailed { reason: e.to_string() })?;

    sqlx::query("INSERT INTO schema_version (version) VALUES (?)")
        .bind(1i64)
        .execute(pool)
        .await
        .map_err(|e| LinkmonError::MigrationFailed { reason: e.to_string() })?;

    Ok(())
}
