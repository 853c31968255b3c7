//! Link store implementations.
//!
//! Concrete implementations of [`LinkStore`]:
//!
//! - [`PgLinkStore`] - PostgreSQL table via SQLx
//! - [`RedisLinkStore`] - JSON documents in Redis
//! - [`MemoryLinkStore`] - process-local map
//!
//! [`connect_store`] picks and opens one according to [`Config::store_backend`].

pub mod memory_link_store;
pub mod pg_link_store;
pub mod redis_link_store;

pub use memory_link_store::MemoryLinkStore;
pub use pg_link_store::PgLinkStore;
pub use redis_link_store::RedisLinkStore;

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::config::{Config, StoreBackend};
use crate::domain::repositories::LinkStore;

/// Opens the configured store backend.
///
/// # Errors
///
/// Returns an error if the selected backend lacks credentials or cannot be
/// reached. There is no silent fallback to another backend.
pub async fn connect_store(config: &Config) -> Result<Arc<dyn LinkStore>> {
    let store: Arc<dyn LinkStore> = match config.store_backend {
        StoreBackend::Postgres => Arc::new(PgLinkStore::connect(config).await?),
        StoreBackend::Redis => {
            let redis_url = config
                .redis_url
                .as_deref()
                .context("REDIS_URL is required for the redis store")?;
            Arc::new(
                RedisLinkStore::connect(redis_url)
                    .await
                    .context("Failed to connect to Redis")?,
            )
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory link store; links are lost on restart");
            Arc::new(MemoryLinkStore::new())
        }
    };

    tracing::info!("Link store ready ({})", store.backend());
    Ok(store)
}
