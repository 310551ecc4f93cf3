//! Authentication request handlers.
//!
//! Each handler validates the body structurally, then delegates to
//! [`AuthService`](sso_core::AuthService). No credential logic lives here.

use axum::Json;
use axum::extract::State;
use sso_core::validation;

use crate::AppState;
use crate::error::AppResult;
use crate::extract::AppJson;
use crate::models::{
    IsAdminRequest, IsAdminResponse, LoginRequest, LoginResponse, RegisterRequest,
    RegisterResponse,
};

/// `POST /login`: exchange email + password for a token scoped to `app_id`.
pub async fn login_handler(
    State(state): State<AppState>,
    AppJson(body): AppJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    validation::validate_login(&body.email, &body.password, body.app_id)?;
    let token = state
        .auth
        .login(&body.email, &body.password, body.app_id)
        .await?;
    Ok(Json(LoginResponse { token }))
}

/// `POST /register`: create a new user account.
pub async fn register_handler(
    State(state): State<AppState>,
    AppJson(body): AppJson<RegisterRequest>,
) -> AppResult<Json<RegisterResponse>> {
    validation::validate_register(&body.email, &body.name, &body.password)?;
    let user_id = state
        .auth
        .register_new_user(&body.email, &body.name, &body.password)
        .await?;
    Ok(Json(RegisterResponse { user_id }))
}

/// `POST /isadmin`: report whether a user holds the admin flag.
pub async fn is_admin_handler(
    State(state): State<AppState>,
    AppJson(body): AppJson<IsAdminRequest>,
) -> AppResult<Json<IsAdminResponse>> {
    validation::validate_is_admin(body.user_id)?;
    let is_admin = state.auth.is_admin(body.user_id).await?;
    Ok(Json(IsAdminResponse { is_admin }))
}
