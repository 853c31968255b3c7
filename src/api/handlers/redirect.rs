//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::debug;
use url::Url;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Response
///
/// `302 Found` with the destination in `Location`.
///
/// # Errors
///
/// - 404 `{"error": "Link not found", ...}` if the code is unknown or expired
/// - 500 if the store fails
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let original_url = state.link_registry.resolve(&code).await?;

    debug!(code, "Redirecting");

    Ok((StatusCode::FOUND, [(header::LOCATION, location(&original_url))]).into_response())
}

/// Answers any path or method with no route as a missing short link.
///
/// `GET /shorten` and multi-segment paths like `/a/b` can never name a link,
/// so they get the same 404 body as an unknown code.
pub async fn not_found_handler() -> AppError {
    AppError::link_not_found()
}

/// Builds the `Location` value for a stored destination.
///
/// The submitted string is used verbatim when it is plain ASCII and a legal
/// header value. Otherwise (non-ASCII hosts or paths) the serialized URL is
/// used, which is punycoded and percent-encoded. `HeaderValue::from_str`
/// accepts raw UTF-8 bytes, so the ASCII check has to come first.
fn location(original_url: &str) -> HeaderValue {
    if original_url.is_ascii()
        && let Ok(value) = HeaderValue::from_str(original_url)
    {
        return value;
    }

    Url::parse(original_url)
        .ok()
        .and_then(|url| HeaderValue::from_str(url.as_str()).ok())
        .unwrap_or_else(|| HeaderValue::from_static("/"))
}
