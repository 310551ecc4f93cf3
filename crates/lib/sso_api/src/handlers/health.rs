//! Liveness endpoint.

use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use tracing::debug;

/// `GET /health`: plain-text liveness probe. Touches no dependencies.
pub async fn health_handler() -> impl IntoResponse {
    debug!("health check request");
    ([(CONTENT_TYPE, "text/plain; charset=utf-8")], "OK")
}
