//! JWT token issuing.
//!
//! Tokens are HS256-signed with the secret of the application they are
//! issued for, so only holders of that secret can verify them.

use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use super::AuthError;
use crate::models::{App, TokenClaims, User};

/// Longest token lifetime accepted: ten years.
pub const MAX_TTL: Duration = Duration::from_secs(10 * 365 * 24 * 60 * 60);

/// Issue a signed token for `user` scoped to `app`, expiring `ttl` from now.
pub fn issue(user: &User, app: &App, ttl: Duration) -> Result<String, AuthError> {
    issue_at(user, app, ttl, Utc::now())
}

/// Issue a token as if the current time were `now`.
pub fn issue_at(
    user: &User,
    app: &App,
    ttl: Duration,
    now: DateTime<Utc>,
) -> Result<String, AuthError> {
    if app.secret.is_empty() {
        return Err(AuthError::Internal(format!(
            "app {} has an empty signing secret",
            app.id
        )));
    }
    let exp = chrono::Duration::from_std(ttl)
        .ok()
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| AuthError::Internal(format!("token ttl out of range: {ttl:?}")))?;

    let claims = TokenClaims {
        uid: user.id,
        email: user.email.clone(),
        app_id: app.id,
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(app.secret.as_bytes()),
    )
    .map_err(|e| AuthError::Internal(format!("jwt encode: {e}")))
}
