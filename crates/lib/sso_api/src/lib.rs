//! # sso_api
//!
//! HTTP API library for SSO.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;

use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use sso_core::AuthService;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::error::AppError;
use crate::handlers::{auth, health};

/// Route paths.
pub mod routes {
    pub const POST_LOGIN: &str = "/login";
    pub const POST_REGISTER: &str = "/register";
    pub const POST_IS_ADMIN: &str = "/isadmin";
    pub const GET_HEALTH: &str = "/health";
}

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Authentication service shared with the other front ends.
    pub auth: Arc<AuthService>,
    /// API configuration.
    pub config: ApiConfig,
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let timeout =
        TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, state.config.request_timeout);

    Router::new()
        .route(routes::POST_LOGIN, post(auth::login_handler))
        .route(routes::POST_REGISTER, post(auth::register_handler))
        .route(routes::POST_IS_ADMIN, post(auth::is_admin_handler))
        .route(routes::GET_HEALTH, get(health::health_handler))
        .layer(timeout)
        .layer(middleware::map_response(timeout_body))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Give the empty 408 produced by the timeout layer the standard error body.
async fn timeout_body(resp: Response) -> Response {
    if resp.status() == StatusCode::REQUEST_TIMEOUT {
        AppError::Timeout.into_response()
    } else {
        resp
    }
}
