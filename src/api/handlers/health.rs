//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Store reachable
/// - **503 Service Unavailable**: Store ping failed or timed out
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "store": {
///       "status": "ok",
///       "message": "Connected (postgres)"
///     }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let store_check = check_store(&state).await;

    let healthy = store_check.status == "ok";

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks { store: store_check },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Pings the link store.
///
/// Backend error text is logged but not echoed back.
async fn check_store(state: &AppState) -> CheckStatus {
    let backend = state.link_registry.backend();

    match state.link_registry.health_check().await {
        Ok(()) => CheckStatus {
            status: "ok".to_string(),
            message: Some(format!("Connected ({})", backend)),
        },
        Err(e) => {
            tracing::error!(backend, error = %e, "Store health check failed");
            CheckStatus {
                status: "error".to_string(),
                message: Some(format!("Store unreachable ({})", backend)),
            }
        }
    }
}
