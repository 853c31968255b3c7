//! Expiring link creation and resolution.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{SubsecRound, Utc};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{LinkRecord, NewLink};
use crate::domain::repositories::{LinkStore, StoreError, StoreResult};
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, is_well_formed_code, validate_custom_code};
use crate::utils::url_validator::validate_url;

/// Shortest allowed lifetime, in days.
pub const MIN_TTL_DAYS: i64 = 1;

/// Longest allowed lifetime, in days.
pub const MAX_TTL_DAYS: i64 = 30;

/// Store call timeout used when none is configured.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Creates and resolves expiring short links on top of a [`LinkStore`].
///
/// The registry keeps no mutable state of its own; everything durable lives in
/// the store. A record is live while `now < expires_at`. Expired records are
/// treated as absent and deleted whenever a lookup or a custom-code claim
/// runs into them.
///
/// Every store call is bounded by `store_timeout`; a timeout is reported as
/// [`AppError::StoreUnavailable`].
///
/// # Concurrency
///
/// Claiming a custom code is a read followed by an unconditional write, so two
/// concurrent requests for the same free code can both succeed and the later
/// write wins.
pub struct LinkRegistry<S: LinkStore + ?Sized = dyn LinkStore> {
    store: Arc<S>,
    store_timeout: Duration,
}

impl<S: LinkStore + ?Sized> LinkRegistry<S> {
    pub fn new(store: Arc<S>, store_timeout: Duration) -> Self {
        Self {
            store,
            store_timeout,
        }
    }

    /// Name of the backing store, for logs and health output.
    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    /// Creates a link and persists it.
    ///
    /// # Flow
    ///
    /// 1. Validate TTL (1-30 days) and destination URL
    /// 2. With a custom code: validate it, reject it if a live record holds it,
    ///    delete an expired holder
    /// 3. Without one: generate a random code (no collision check)
    /// 4. Write the record, overwriting whatever is stored under the code
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidTtl`] if `ttl_days` is outside 1-30
    /// - [`AppError::InvalidUrl`] if the destination is not an absolute URL with a host
    /// - [`AppError::InvalidIdentifier`] if the custom code is malformed or reserved
    /// - [`AppError::IdentifierTaken`] if a live record already uses the custom code
    /// - [`AppError::StoreUnavailable`] on backend failure or timeout
    ///
    /// Validation failures happen before any store access.
    pub async fn create(&self, new_link: NewLink) -> Result<LinkRecord, AppError> {
        validate_ttl(new_link.ttl_days)?;

        validate_url(&new_link.original_url).map_err(|e| {
            AppError::invalid_url("Invalid URL", json!({ "reason": e.to_string() }))
        })?;

        if let Some(custom) = &new_link.custom_code {
            validate_custom_code(custom)?;
        }

        let code = match new_link.custom_code {
            Some(custom) => self.claim_custom_code(custom).await?,
            None => generate_code(),
        };

        let record = LinkRecord::new(
            code,
            new_link.original_url.trim().to_string(),
            Utc::now().trunc_subsecs(3),
            new_link.ttl_days,
        );

        self.call("put", self.store.put(&record.short_code, record.clone()))
            .await?;

        info!(
            code = %record.short_code,
            expires_at = %record.expires_at,
            "Link created"
        );

        Ok(record)
    }

    /// Resolves a short code to its destination URL.
    ///
    /// An expired record is deleted (best effort) and reported exactly like a
    /// missing one. Codes that this service could never have issued are
    /// rejected without touching the store.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the code is absent, malformed, or expired
    /// - [`AppError::StoreUnavailable`] if the lookup fails
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        if !is_well_formed_code(code) {
            debug!(code, "Rejected malformed short code");
            return Err(AppError::link_not_found());
        }

        let record = self
            .call("get", self.store.get(code))
            .await?
            .ok_or_else(AppError::link_not_found)?;

        if record.is_expired_at(Utc::now()) {
            match self.call("delete", self.store.delete(code)).await {
                Ok(()) => info!(code, expired_at = %record.expires_at, "Deleted expired link"),
                Err(e) => warn!(code, error = %e, "Failed to delete expired link"),
            }
            return Err(AppError::link_not_found());
        }

        Ok(record.original_url)
    }

    /// Returns the stored record for `code` as-is, live or expired.
    ///
    /// Read-only: unlike [`Self::resolve`] this never deletes anything.
    pub async fn inspect(&self, code: &str) -> Result<Option<LinkRecord>, AppError> {
        Ok(self.call("get", self.store.get(code)).await?)
    }

    /// Deletes the record for `code`, whether live or expired.
    pub async fn remove(&self, code: &str) -> Result<(), AppError> {
        self.call("delete", self.store.delete(code)).await?;
        info!(code, "Link removed");
        Ok(())
    }

    /// Pings the store within the configured timeout.
    pub async fn health_check(&self) -> StoreResult<()> {
        self.call("ping", self.store.ping()).await
    }

    /// Closes the underlying store.
    pub async fn close(&self) {
        self.store.close().await;
    }

    /// Makes `code` available for a new record or reports it as taken.
    async fn claim_custom_code(&self, code: String) -> Result<String, AppError> {
        let Some(existing) = self.call("get", self.store.get(&code)).await? else {
            return Ok(code);
        };

        if existing.is_live_at(Utc::now()) {
            return Err(AppError::identifier_taken(
                "Custom ID is already taken",
                json!({ "code": code }),
            ));
        }

        self.call("delete", self.store.delete(&code)).await?;
        info!(code, expired_at = %existing.expires_at, "Reclaimed expired custom code");

        Ok(code)
    }

    async fn call<T>(
        &self,
        operation: &'static str,
        fut: impl Future<Output = StoreResult<T>>,
    ) -> StoreResult<T> {
        tokio::time::timeout(self.store_timeout, fut)
            .await
            .map_err(|_| StoreError::Timeout {
                operation,
                timeout_ms: self.store_timeout.as_millis() as u64,
            })?
    }
}

fn validate_ttl(ttl_days: i64) -> Result<(), AppError> {
    if !(MIN_TTL_DAYS..=MAX_TTL_DAYS).contains(&ttl_days) {
        return Err(AppError::invalid_ttl(
            "Invalid expiry days",
            json!({ "provided": ttl_days, "min": MIN_TTL_DAYS, "max": MAX_TTL_DAYS }),
        ));
    }
    Ok(())
}
