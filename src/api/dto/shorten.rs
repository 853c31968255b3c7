//! DTOs for link shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::application::services::{MAX_TTL_DAYS, MIN_TTL_DAYS};
use crate::domain::entities::{LinkRecord, NewLink};
use crate::error::AppError;

fn default_expiry_days() -> f64 {
    1.0
}

/// Request to shorten a single URL.
///
/// Shape checks only; URL syntax, TTL range and custom ID rules are enforced
/// by [`crate::application::services::LinkRegistry::create`].
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    /// Destination URL to redirect to.
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub original_url: String,

    /// Lifetime in days (1-30). Defaults to one day when omitted.
    ///
    /// Read as any JSON number so that `2.0` is accepted and `2.5` is
    /// reported as an invalid TTL rather than a malformed body.
    #[serde(default = "default_expiry_days")]
    pub expiry_days: f64,

    /// Requested short code, only honoured when `use_custom` is set.
    #[validate(length(max = 64, message = "Custom ID must be 1-64 characters"))]
    pub custom_id: Option<String>,

    #[serde(default)]
    pub use_custom: bool,
}

impl ShortenRequest {
    /// Converts the request into registry input, dropping `custom_id`
    /// unless `use_custom` is set.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidTtl`] if `expiry_days` is not a whole number
    /// - [`AppError::InvalidIdentifier`] if `use_custom` is set without a `custom_id`
    pub fn into_new_link(self) -> Result<NewLink, AppError> {
        let days = self.expiry_days;
        if !days.is_finite() || days.fract() != 0.0 {
            return Err(AppError::invalid_ttl(
                "Invalid expiry days",
                json!({ "provided": days, "min": MIN_TTL_DAYS, "max": MAX_TTL_DAYS }),
            ));
        }

        let custom_code = match (self.use_custom, self.custom_id) {
            (true, Some(custom)) => Some(custom),
            (true, None) => {
                return Err(AppError::invalid_identifier(
                    "Custom ID is required when useCustom is set",
                    json!({ "field": "customId" }),
                ));
            }
            (false, _) => None,
        };

        Ok(NewLink {
            original_url: self.original_url,
            // Out-of-range values saturate and are rejected by the registry
            ttl_days: days as i64,
            custom_code,
        })
    }
}

/// Created link as returned to the client.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub id: String,
    pub short_url: String,
    pub original_url: String,
    pub expires_at: DateTime<Utc>,
}

impl ShortenResponse {
    pub fn from_record(record: LinkRecord, short_url: String) -> Self {
        Self {
            id: record.short_code,
            short_url,
            original_url: record.original_url,
            expires_at: record.expires_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_optional_fields_missing() {
        let req: ShortenRequest =
            serde_json::from_value(json!({ "originalUrl": "https://example.com" })).unwrap();

        assert_eq!(req.expiry_days, 1.0);
        assert!(!req.use_custom);
        assert!(req.custom_id.is_none());
    }

    #[test]
    fn test_custom_id_ignored_without_use_custom() {
        let req: ShortenRequest = serde_json::from_value(json!({
            "originalUrl": "https://example.com",
            "expiryDays": 7,
            "customId": "promo",
            "useCustom": false
        }))
        .unwrap();

        let new_link = req.into_new_link().unwrap();
        assert_eq!(new_link.ttl_days, 7);
        assert!(new_link.custom_code.is_none());
    }

    #[test]
    fn test_custom_id_used_with_use_custom() {
        let req: ShortenRequest = serde_json::from_value(json!({
            "originalUrl": "https://example.com",
            "customId": "promo",
            "useCustom": true
        }))
        .unwrap();

        assert_eq!(
            req.into_new_link().unwrap().custom_code.as_deref(),
            Some("promo")
        );
    }

    #[test]
    fn test_use_custom_without_custom_id_rejected() {
        for body in [
            json!({ "originalUrl": "https://example.com", "useCustom": true }),
            json!({ "originalUrl": "https://example.com", "customId": null, "useCustom": true }),
        ] {
            let req: ShortenRequest = serde_json::from_value(body).unwrap();
            assert!(matches!(
                req.into_new_link(),
                Err(AppError::InvalidIdentifier { .. })
            ));
        }
    }

    #[test]
    fn test_whole_float_expiry_accepted() {
        let req: ShortenRequest = serde_json::from_value(json!({
            "originalUrl": "https://example.com",
            "expiryDays": 2.0
        }))
        .unwrap();

        assert_eq!(req.into_new_link().unwrap().ttl_days, 2);
    }

    #[test]
    fn test_fractional_expiry_is_invalid_ttl() {
        let req: ShortenRequest = serde_json::from_value(json!({
            "originalUrl": "https://example.com",
            "expiryDays": 2.5
        }))
        .unwrap();

        assert!(matches!(
            req.into_new_link(),
            Err(AppError::InvalidTtl { .. })
        ));
    }

    #[test]
    fn test_overlong_url_rejected() {
        let req = ShortenRequest {
            original_url: format!("https://example.com/{}", "a".repeat(2048)),
            expiry_days: 1.0,
            custom_id: None,
            use_custom: false,
        };

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_non_integer_expiry_rejected() {
        let result = serde_json::from_value::<ShortenRequest>(json!({
            "originalUrl": "https://example.com",
            "expiryDays": "seven"
        }));

        assert!(result.is_err());
    }
}
