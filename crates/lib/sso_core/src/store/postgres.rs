//! PostgreSQL credential store.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::{AppProvider, UserProvider, UserSaver};
use crate::error::AuthError;
use crate::models::{App, User};

/// Credential store backed by a shared connection pool.
///
/// Queries are cancelled when the calling future is dropped, so a request
/// deadline upstream aborts the database call and releases the connection.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Provision an application record, returning its ID.
    pub async fn create_app(&self, name: &str, secret: &str) -> Result<i32, AuthError> {
        sqlx::query_scalar::<_, i32>("INSERT INTO apps (name, secret) VALUES ($1, $2) RETURNING id")
            .bind(name)
            .bind(secret)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| internal("create app", e))
    }
}

fn internal(what: &str, e: sqlx::Error) -> AuthError {
    AuthError::Internal(format!("{what}: {e}"))
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[async_trait]
impl UserSaver for PgStore {
    async fn save_user(&self, email: &str, name: &str, pass_hash: &[u8]) -> Result<i64, AuthError> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO users (email, name, pass_hash) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(email)
        .bind(name)
        .bind(pass_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                debug!(email, "insert rejected by unique constraint");
                AuthError::UserExists
            } else {
                internal("save user", e)
            }
        })
    }
}

#[async_trait]
impl UserProvider for PgStore {
    async fn user_by_email(&self, email: &str) -> Result<User, AuthError> {
        let row = sqlx::query_as::<_, (i64, String, String, Vec<u8>, bool)>(
            "SELECT id, email, name, pass_hash, is_admin FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| internal("fetch user", e))?;

        let (id, email, name, pass_hash, is_admin) = row.ok_or(AuthError::NotFound("user"))?;
        Ok(User {
            id,
            email,
            name,
            pass_hash,
            is_admin,
        })
    }

    async fn is_admin(&self, user_id: i64) -> Result<bool, AuthError> {
        sqlx::query_scalar::<_, bool>("SELECT is_admin FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| internal("fetch admin flag", e))?
            .ok_or(AuthError::NotFound("user"))
    }
}

#[async_trait]
impl AppProvider for PgStore {
    async fn app_by_id(&self, app_id: i32) -> Result<App, AuthError> {
        let row = sqlx::query_as::<_, (i32, String, String)>(
            "SELECT id, name, secret FROM apps WHERE id = $1",
        )
        .bind(app_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| internal("fetch app", e))?;

        let (id, name, secret) = row.ok_or(AuthError::NotFound("app"))?;
        Ok(App { id, name, secret })
    }
}
