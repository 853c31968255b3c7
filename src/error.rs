//! Application error type and its HTTP mapping.
//!
//! Every layer above the store returns [`AppError`]. Each variant carries a
//! client-facing `message` and optional structured `details`; backend failures
//! are collapsed into [`AppError::StoreUnavailable`] with a generic message so
//! that no storage internals reach the client.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::repositories::StoreError;

/// Error body returned by every failing endpoint.
///
/// ```json
/// { "error": "Link not found", "code": "not_found" }
/// ```
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "is_empty_details")]
    pub details: Value,
}

fn is_empty_details(details: &Value) -> bool {
    match details {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Request body is malformed or fails shape validation.
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    InvalidUrl { message: String, details: Value },

    #[error("{message}")]
    InvalidTtl { message: String, details: Value },

    /// Custom identifier has an illegal length, character, or is reserved.
    #[error("{message}")]
    InvalidIdentifier { message: String, details: Value },

    /// A live record already holds the requested custom identifier.
    #[error("{message}")]
    IdentifierTaken { message: String, details: Value },

    /// Identifier is absent or its record has expired.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("{message}")]
    StoreUnavailable { message: String, details: Value },
}

impl AppError {
    pub fn validation(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn invalid_url(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidUrl {
            message: message.into(),
            details,
        }
    }

    pub fn invalid_ttl(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidTtl {
            message: message.into(),
            details,
        }
    }

    pub fn invalid_identifier(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidIdentifier {
            message: message.into(),
            details,
        }
    }

    pub fn identifier_taken(message: impl Into<String>, details: Value) -> Self {
        Self::IdentifierTaken {
            message: message.into(),
            details,
        }
    }

    /// The single not-found error used for both absent and expired links.
    pub fn link_not_found() -> Self {
        Self::NotFound {
            message: "Link not found".to_string(),
            details: Value::Null,
        }
    }

    pub fn store_unavailable() -> Self {
        Self::StoreUnavailable {
            message: "Internal server error".to_string(),
            details: Value::Null,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. }
            | Self::InvalidUrl { .. }
            | Self::InvalidTtl { .. }
            | Self::InvalidIdentifier { .. } => StatusCode::BAD_REQUEST,
            Self::IdentifierTaken { .. } => StatusCode::CONFLICT,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::StoreUnavailable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error code included in the response body.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::InvalidUrl { .. } => "invalid_url",
            Self::InvalidTtl { .. } => "invalid_ttl",
            Self::InvalidIdentifier { .. } => "invalid_identifier",
            Self::IdentifierTaken { .. } => "identifier_taken",
            Self::NotFound { .. } => "not_found",
            Self::StoreUnavailable { .. } => "store_unavailable",
        }
    }

    pub fn to_error_body(&self) -> ErrorBody {
        let (message, details) = match self {
            Self::Validation { message, details }
            | Self::InvalidUrl { message, details }
            | Self::InvalidTtl { message, details }
            | Self::InvalidIdentifier { message, details }
            | Self::IdentifierTaken { message, details }
            | Self::NotFound { message, details }
            | Self::StoreUnavailable { message, details } => (message, details),
        };

        ErrorBody {
            error: message.clone(),
            code: self.code(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_error_body())).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        tracing::error!(error = %e, "Link store failure");
        AppError::store_unavailable()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = e.field_errors().keys().map(|k| k.to_string()).collect();
        fields.sort();
        AppError::validation("Invalid request body", json!({ "fields": fields }))
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::validation("Invalid request body", json!({ "reason": e.body_text() }))
    }
}
