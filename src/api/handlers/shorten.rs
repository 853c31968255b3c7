//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::request_origin::{request_origin, short_url};

/// Creates an expiring short link.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "originalUrl": "https://example.com/some/long/path",
///   "expiryDays": 7,          // optional, 1-30, default 1
///   "customId": "spring-sale", // optional
///   "useCustom": true          // optional, default false
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "id": "spring-sale",
///   "shortUrl": "https://sho.rt/spring-sale",
///   "originalUrl": "https://example.com/some/long/path",
///   "expiresAt": "2025-01-08T12:00:00.123Z"
/// }
/// ```
///
/// # Errors
///
/// - 400 if the body is malformed, the URL or TTL is invalid, or the custom ID is
///   illegal or missing while `useCustom` is set
/// - 409 if a live link already uses the custom ID
/// - 500 if the store fails
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let record = state.link_registry.create(payload.into_new_link()?).await?;

    let origin = request_origin(&headers, state.public_base_url.as_deref());
    let short_url = short_url(&origin, &record.short_code);

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse::from_record(record, short_url)),
    ))
}
