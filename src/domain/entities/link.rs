//! Link entity representing an expiring short-code mapping.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A stored mapping from a short code to a destination URL.
///
/// Records are written once and never mutated. The serialized form is the
/// persisted document shape:
///
/// ```json
/// {
///   "shortCode": "aZ3_k9",
///   "originalUrl": "https://example.com",
///   "createdAt": "2025-01-01T00:00:00Z",
///   "expiresAt": "2025-01-08T00:00:00Z"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRecord {
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl LinkRecord {
    /// Builds a record that expires `ttl_days` whole days after `created_at`.
    pub fn new(
        short_code: String,
        original_url: String,
        created_at: DateTime<Utc>,
        ttl_days: i64,
    ) -> Self {
        Self {
            short_code,
            original_url,
            created_at,
            expires_at: created_at + Duration::days(ttl_days),
        }
    }

    /// A record is live strictly before its expiry instant.
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_live_at(now)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Input for creating a link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub original_url: String,
    pub ttl_days: i64,
    /// Caller-requested short code; `None` means one is generated.
    pub custom_code: Option<String>,
}
