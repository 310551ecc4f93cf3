//! Authentication service: login, registration and privilege lookup.
//!
//! Orchestrates the credential store capabilities and the token issuer and
//! owns all domain error mapping. Holds no per-request state.

use std::sync::Arc;
use std::time::Duration;

use tracing::{Instrument, Span, error, info, info_span, warn};

use crate::error::{AuthError, Result};
use crate::password::{self, DEFAULT_COST};
use crate::store::{AppProvider, CredentialStore, UserProvider, UserSaver};
use crate::token;

/// Tunables handed in by the process bootstrap.
#[derive(Debug, Clone, Copy)]
pub struct AuthConfig {
    /// Lifetime of issued tokens.
    pub token_ttl: Duration,
    /// bcrypt work factor used for new password hashes.
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    pub fn new(token_ttl: Duration) -> Self {
        Self {
            token_ttl,
            bcrypt_cost: DEFAULT_COST,
        }
    }

    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }
}

/// Authentication service.
pub struct AuthService {
    log: Span,
    user_saver: Arc<dyn UserSaver>,
    user_provider: Arc<dyn UserProvider>,
    app_provider: Arc<dyn AppProvider>,
    config: AuthConfig,
}

impl AuthService {
    /// Build a service from individual capabilities.
    ///
    /// `log` is the parent span for every operation span the service opens.
    pub fn new(
        log: Span,
        user_saver: Arc<dyn UserSaver>,
        user_provider: Arc<dyn UserProvider>,
        app_provider: Arc<dyn AppProvider>,
        config: AuthConfig,
    ) -> Self {
        Self {
            log,
            user_saver,
            user_provider,
            app_provider,
            config,
        }
    }

    /// Build a service backed by one store that provides every capability.
    pub fn with_store<S: CredentialStore + 'static>(
        log: Span,
        store: Arc<S>,
        config: AuthConfig,
    ) -> Self {
        Self::new(log, store.clone(), store.clone(), store, config)
    }

    /// Check credentials and issue a token scoped to `app_id`.
    ///
    /// An unknown email and a wrong password both yield
    /// [`AuthError::InvalidCredentials`]. An unknown application yields
    /// [`AuthError::InvalidArgument`], since the ID comes from the caller.
    pub async fn login(&self, email: &str, password: &str, app_id: i32) -> Result<String> {
        let span = info_span!(parent: &self.log, "auth.login", email, app_id);
        async {
            info!("attempting to login user");

            let user = match self.user_provider.user_by_email(email).await {
                Ok(user) => user,
                Err(AuthError::NotFound(_)) => {
                    warn!("user not found");
                    return Err(AuthError::InvalidCredentials);
                }
                Err(e) => {
                    error!(error = %e, "failed to fetch user");
                    return Err(into_internal(e));
                }
            };

            let matches =
                password::verify_password_blocking(password.to_owned(), user.pass_hash.clone())
                    .await
                    .inspect_err(|e| error!(error = %e, "failed to verify password"))?;
            if !matches {
                warn!(user_id = user.id, "invalid credentials");
                return Err(AuthError::InvalidCredentials);
            }

            let app = match self.app_provider.app_by_id(app_id).await {
                Ok(app) => app,
                Err(AuthError::NotFound(_)) => {
                    warn!("app not found");
                    return Err(AuthError::InvalidArgument("invalid app id".into()));
                }
                Err(e) => {
                    error!(error = %e, "failed to fetch app");
                    return Err(into_internal(e));
                }
            };

            let token = token::issue(&user, &app, self.config.token_ttl)
                .inspect_err(|e| error!(error = %e, "failed to create token"))?;

            info!(user_id = user.id, "user logged in");
            Ok(token)
        }
        .instrument(span)
        .await
    }

    /// Register a new user and return its ID.
    ///
    /// Duplicate emails surface as [`AuthError::UserExists`], decided by the
    /// store's atomic uniqueness check.
    pub async fn register_new_user(&self, email: &str, name: &str, password: &str) -> Result<i64> {
        let span = info_span!(parent: &self.log, "auth.register", email);
        async {
            info!("registering new user");

            let pass_hash =
                password::hash_password_blocking(password.to_owned(), self.config.bcrypt_cost)
                    .await
                    .inspect_err(|e| error!(error = %e, "failed to hash password"))?;

            match self.user_saver.save_user(email, name, &pass_hash).await {
                Ok(user_id) => {
                    info!(user_id, "registered user");
                    Ok(user_id)
                }
                Err(AuthError::UserExists) => {
                    warn!("user already exists");
                    Err(AuthError::UserExists)
                }
                Err(e) => {
                    error!(error = %e, "failed to save user");
                    Err(into_internal(e))
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Whether the user holds the admin flag.
    pub async fn is_admin(&self, user_id: i64) -> Result<bool> {
        let span = info_span!(parent: &self.log, "auth.is_admin", user_id);
        async {
            info!("checking if user is admin");

            match self.user_provider.is_admin(user_id).await {
                Ok(is_admin) => {
                    info!(is_admin, "checked admin flag");
                    Ok(is_admin)
                }
                Err(e @ AuthError::NotFound(_)) => {
                    warn!("user not found");
                    Err(e)
                }
                Err(e) => {
                    error!(error = %e, "failed to fetch admin flag");
                    Err(into_internal(e))
                }
            }
        }
        .instrument(span)
        .await
    }
}

/// Collapse an unexpected store error into `Internal`.
fn into_internal(e: AuthError) -> AuthError {
    match e {
        AuthError::Internal(_) => e,
        other => AuthError::Internal(format!("unexpected store error: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{App, User};
    use crate::store::MemoryStore;
    use async_trait::async_trait;

    /// Store whose every call fails with a connectivity-style error.
    struct BrokenStore;

    #[async_trait]
    impl UserSaver for BrokenStore {
        async fn save_user(&self, _: &str, _: &str, _: &[u8]) -> Result<i64> {
            Err(AuthError::Internal("connection refused".into()))
        }
    }

    #[async_trait]
    impl UserProvider for BrokenStore {
        async fn user_by_email(&self, _: &str) -> Result<User> {
            Err(AuthError::Internal("connection refused".into()))
        }

        async fn is_admin(&self, _: i64) -> Result<bool> {
            Err(AuthError::Internal("connection refused".into()))
        }
    }

    #[async_trait]
    impl AppProvider for BrokenStore {
        async fn app_by_id(&self, _: i32) -> Result<App> {
            Err(AuthError::Internal("connection refused".into()))
        }
    }

    fn config() -> AuthConfig {
        AuthConfig::new(Duration::from_secs(3600)).with_bcrypt_cost(4)
    }

    #[tokio::test]
    async fn storage_failures_are_internal_not_credentials() {
        let svc = AuthService::with_store(Span::none(), Arc::new(BrokenStore), config());

        assert!(matches!(
            svc.login("a@x.com", "pw", 1).await.unwrap_err(),
            AuthError::Internal(_)
        ));
        assert!(matches!(
            svc.register_new_user("a@x.com", "A", "pw").await.unwrap_err(),
            AuthError::Internal(_)
        ));
        assert!(matches!(svc.is_admin(1).await.unwrap_err(), AuthError::Internal(_)));
    }

    #[tokio::test]
    async fn app_lookup_failure_reports_the_app_error() {
        let users = Arc::new(MemoryStore::new());
        let svc = AuthService::new(
            Span::none(),
            users.clone(),
            users.clone(),
            Arc::new(BrokenStore),
            config(),
        );
        svc.register_new_user("a@x.com", "A", "pw").await.unwrap();

        let err = svc.login("a@x.com", "pw", 1).await.unwrap_err();
        assert!(matches!(err, AuthError::Internal(ref m) if m.contains("connection refused")));
    }

    #[tokio::test]
    async fn unknown_app_is_invalid_argument() {
        let store = Arc::new(MemoryStore::new());
        let svc = AuthService::with_store(Span::none(), store.clone(), config());
        svc.register_new_user("a@x.com", "A", "pw").await.unwrap();

        let err = svc.login("a@x.com", "pw", 77).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn stored_hash_is_not_the_password() {
        let store = Arc::new(MemoryStore::new());
        let svc = AuthService::with_store(Span::none(), store.clone(), config());
        svc.register_new_user("a@x.com", "A", "plaintext-pw").await.unwrap();

        let user = store.user_by_email("a@x.com").await.unwrap();
        assert_ne!(user.pass_hash, b"plaintext-pw".to_vec());
        assert!(password::verify_password("plaintext-pw", &user.pass_hash).unwrap());
    }

    #[test]
    fn into_internal_keeps_internal_message() {
        let e = into_internal(AuthError::Internal("boom".into()));
        assert!(matches!(e, AuthError::Internal(ref m) if m == "boom"));
        let e = into_internal(AuthError::InvalidCredentials);
        assert!(matches!(e, AuthError::Internal(_)));
    }
}
