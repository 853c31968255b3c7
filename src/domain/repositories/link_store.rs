//! Store trait for short-link records.

use crate::domain::entities::LinkRecord;
use async_trait::async_trait;

/// Errors raised by a [`LinkStore`] backend.
///
/// These never reach HTTP clients directly; the registry logs them and
/// reports [`crate::error::AppError::StoreUnavailable`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(String),

    #[error("stored document for '{code}' is corrupt: {reason}")]
    Corrupt { code: String, reason: String },

    #[error("store {operation} timed out after {timeout_ms}ms")]
    Timeout {
        operation: &'static str,
        timeout_ms: u64,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Key-value store holding one [`LinkRecord`] per short code.
///
/// Every operation touches a single key; no multi-key transactions are
/// offered. The store knows nothing about expiry: expired records are
/// returned like any other and it is up to the caller to delete them.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkStore`] - PostgreSQL table
/// - [`crate::infrastructure::persistence::RedisLinkStore`] - Redis JSON documents
/// - [`crate::infrastructure::persistence::MemoryLinkStore`] - process-local map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Returns the record stored under `code`, live or expired.
    async fn get(&self, code: &str) -> StoreResult<Option<LinkRecord>>;

    /// Writes `record` under `code`, replacing whatever was there.
    async fn put(&self, code: &str, record: LinkRecord) -> StoreResult<()>;

    /// Removes the record under `code`. Deleting a missing key succeeds.
    async fn delete(&self, code: &str) -> StoreResult<()>;

    /// Round-trips to the backend to prove it is reachable.
    async fn ping(&self) -> StoreResult<()>;

    /// Releases backend resources at shutdown.
    async fn close(&self) {}

    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;
}
