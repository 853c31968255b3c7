//! Redis implementation of the link store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info};

use crate::domain::entities::LinkRecord;
use crate::domain::repositories::{LinkStore, StoreError, StoreResult};

impl From<redis::RedisError> for StoreError {
    fn from(e: redis::RedisError) -> Self {
        StoreError::Backend(e.to_string())
    }
}

const KEY_PREFIX: &str = "link:";

fn link_key(code: &str) -> String {
    format!("{}{}", KEY_PREFIX, code)
}

/// Server-side expiry for a record written at `now`: the remaining lifetime
/// rounded up to whole seconds, or `None` once the record is already past
/// `expires_at` (the key is then written without expiry and left for the
/// registry to delete).
fn key_ttl_seconds(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> Option<u64> {
    let remaining = (expires_at - now).num_seconds();
    (remaining >= 0).then(|| remaining as u64 + 1)
}

fn encode_record(code: &str, record: &LinkRecord) -> StoreResult<String> {
    serde_json::to_string(record).map_err(|e| StoreError::Corrupt {
        code: code.to_string(),
        reason: e.to_string(),
    })
}

fn decode_record(code: &str, doc: &str) -> StoreResult<LinkRecord> {
    serde_json::from_str(doc).map_err(|e| StoreError::Corrupt {
        code: code.to_string(),
        reason: e.to_string(),
    })
}

/// Redis store keeping each record as a JSON document under `link:{code}`.
///
/// Keys also get a server-side expiry matching the record's remaining
/// lifetime (rounded up), so Redis frees space for links nobody visits again.
/// Expiry decisions are still made by the registry from `expiresAt`.
pub struct RedisLinkStore {
    client: ConnectionManager,
}

impl RedisLinkStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] if the URL is invalid, the connection
    /// cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> StoreResult<Self> {
        let client = Client::open(redis_url)?;
        let manager = ConnectionManager::new(client).await?;

        let mut test_conn = manager.clone();
        test_conn.ping::<()>().await?;

        info!("Connected to Redis");

        Ok(Self { client: manager })
    }
}

#[async_trait]
impl LinkStore for RedisLinkStore {
    async fn get(&self, code: &str) -> StoreResult<Option<LinkRecord>> {
        let mut conn = self.client.clone();

        let Some(doc) = conn
            .get::<_, Option<String>>(link_key(code))
            .await?
        else {
            return Ok(None);
        };

        decode_record(code, &doc).map(Some)
    }

    async fn put(&self, code: &str, record: LinkRecord) -> StoreResult<()> {
        let key = link_key(code);
        let doc = encode_record(code, &record)?;
        let mut conn = self.client.clone();

        match key_ttl_seconds(record.expires_at, Utc::now()) {
            Some(ttl) => conn.set_ex::<_, _, ()>(&key, doc, ttl).await?,
            None => conn.set::<_, _, ()>(&key, doc).await?,
        }

        debug!(code, "Stored link document");
        Ok(())
    }

    async fn delete(&self, code: &str) -> StoreResult<()> {
        let mut conn = self.client.clone();
        conn.del::<_, i32>(link_key(code)).await?;
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        let mut conn = self.client.clone();
        conn.ping::<()>().await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_link_key() {
        assert_eq!(link_key("abc123"), "link:abc123");
        assert_eq!(link_key("spring-sale"), "link:spring-sale");
    }

    #[test]
    fn test_key_ttl_rounds_remaining_lifetime_up() {
        let expires_at = created() + Duration::days(1);

        assert_eq!(key_ttl_seconds(expires_at, created()), Some(86_401));
        assert_eq!(
            key_ttl_seconds(expires_at, expires_at - Duration::milliseconds(500)),
            Some(1)
        );
        assert_eq!(key_ttl_seconds(expires_at, expires_at), Some(1));
    }

    #[test]
    fn test_key_ttl_absent_once_expired() {
        let expires_at = created() + Duration::days(1);

        assert_eq!(
            key_ttl_seconds(expires_at, expires_at + Duration::seconds(1)),
            None
        );
        assert_eq!(
            key_ttl_seconds(expires_at, expires_at + Duration::days(3)),
            None
        );
    }

    #[test]
    fn test_document_shape() {
        let record = LinkRecord::new(
            "abc123".to_string(),
            "https://example.com".to_string(),
            created(),
            7,
        );

        let doc: serde_json::Value =
            serde_json::from_str(&encode_record("abc123", &record).unwrap()).unwrap();

        assert_eq!(
            doc,
            json!({
                "shortCode": "abc123",
                "originalUrl": "https://example.com",
                "createdAt": "2025-01-01T12:00:00Z",
                "expiresAt": "2025-01-08T12:00:00Z"
            })
        );

        let back = decode_record("abc123", &doc.to_string()).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_unparsable_document_is_corrupt() {
        for doc in ["not json", r#"{"shortCode":"abc123"}"#, "https://example.com"] {
            let err = decode_record("abc123", doc).unwrap_err();
            assert!(
                matches!(err, StoreError::Corrupt { ref code, .. } if code == "abc123"),
                "{doc}"
            );
        }
    }
}
