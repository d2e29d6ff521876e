use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::debug;

use super::{SessionStore, TOKEN_KEY};
use crate::error::ApiError;

/// Durable token storage backed by a single-row SQLite table.
#[derive(Clone, Debug)]
pub struct SqliteSessionStore {
    db: SqlitePool,
}

impl SqliteSessionStore {
    /// Opens (creating if missing) the database at `database_url` and runs
    /// the embedded migrations.
    pub async fn connect(database_url: &str) -> Result<Self, ApiError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // One connection keeps `sqlite::memory:` databases alive and shared.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::from_pool(pool).await
    }

    pub async fn from_pool(db: SqlitePool) -> Result<Self, ApiError> {
        sqlx::migrate!("./migrations")
            .run(&db)
            .await
            .map_err(|e| ApiError::Session(e.into()))?;
        Ok(Self { db })
    }

    /// When the current token was written, if one is stored.
    pub async fn updated_at(&self) -> Result<Option<String>, ApiError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT updated_at FROM session WHERE key = ?")
            .bind(TOKEN_KEY)
            .fetch_optional(&self.db)
            .await?;
        Ok(row.map(|(ts,)| ts))
    }
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    async fn get(&self) -> Result<Option<String>, ApiError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM session WHERE key = ?")
            .bind(TOKEN_KEY)
            .fetch_optional(&self.db)
            .await?;
        Ok(row.map(|(value,)| value))
    }

    async fn set(&self, token: &str) -> Result<(), ApiError> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            r#"
            INSERT INTO session (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(TOKEN_KEY)
        .bind(token)
        .bind(&now)
        .execute(&self.db)
        .await?;

        debug!("session token stored at {}", now);
        Ok(())
    }

    async fn clear(&self) -> Result<(), ApiError> {
        let removed = sqlx::query("DELETE FROM session WHERE key = ?")
            .bind(TOKEN_KEY)
            .execute(&self.db)
            .await?
            .rows_affected();

        if removed > 0 {
            debug!("session token cleared");
        }
        Ok(())
    }
}
