//! API route configuration.

use crate::api::handlers::{redirect_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Public link routes.
///
/// # Endpoints
///
/// - `POST /shorten` - Create an expiring short link
/// - `GET  /{code}`  - Redirect to the link's destination
///
/// Static segments take precedence over `/{code}`, which is why `shorten`
/// and `health` are reserved as custom IDs.
pub fn link_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/{code}", get(redirect_handler))
}
