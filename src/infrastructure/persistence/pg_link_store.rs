//! PostgreSQL implementation of the link store.

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::domain::entities::LinkRecord;
use crate::domain::repositories::{LinkStore, StoreError, StoreResult};

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Backend(e.to_string())
    }
}

#[derive(sqlx::FromRow)]
struct LinkRow {
    short_code: String,
    original_url: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl From<LinkRow> for LinkRecord {
    fn from(row: LinkRow) -> Self {
        LinkRecord {
            short_code: row.short_code,
            original_url: row.original_url,
            created_at: row.created_at,
            expires_at: row.expires_at,
        }
    }
}

/// PostgreSQL store keeping one row per short code in the `links` table.
pub struct PgLinkStore {
    pool: Arc<PgPool>,
}

impl PgLinkStore {
    /// Wraps an existing pool. The schema must already be migrated.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Opens a connection pool sized from `config` and applies migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if no database URL is configured, the connection
    /// fails, or a migration cannot be applied.
    pub async fn connect(config: &Config) -> anyhow::Result<Self> {
        let database_url = config
            .database_url
            .as_deref()
            .context("DATABASE_URL is required for the postgres store")?;

        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
            .idle_timeout(Some(Duration::from_secs(config.db_idle_timeout)))
            .max_lifetime(Some(Duration::from_secs(config.db_max_lifetime)))
            .connect(database_url)
            .await
            .context("Failed to connect to PostgreSQL")?;
        tracing::info!("Connected to database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to apply migrations")?;

        Ok(Self::new(Arc::new(pool)))
    }
}

#[async_trait]
impl LinkStore for PgLinkStore {
    async fn get(&self, code: &str) -> StoreResult<Option<LinkRecord>> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT short_code, original_url, created_at, expires_at
            FROM links
            WHERE short_code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(LinkRecord::from))
    }

    async fn put(&self, code: &str, record: LinkRecord) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO links (short_code, original_url, created_at, expires_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (short_code) DO UPDATE
            SET original_url = EXCLUDED.original_url,
                created_at   = EXCLUDED.created_at,
                expires_at   = EXCLUDED.expires_at
            "#,
        )
        .bind(code)
        .bind(&record.original_url)
        .bind(record.created_at)
        .bind(record.expires_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn delete(&self, code: &str) -> StoreResult<()> {
        sqlx::query("DELETE FROM links WHERE short_code = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database pool closed");
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
