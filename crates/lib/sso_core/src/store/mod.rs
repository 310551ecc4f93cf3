//! Credential persistence.
//!
//! The service depends on three narrow capabilities rather than one store
//! interface. A concrete store implements all three; [`CredentialStore`]
//! names that combination.
//!
//! Error contract for every implementation: `NotFound` when no row matches,
//! `UserExists` when the email uniqueness constraint rejects an insert, and
//! `Internal` for anything else. Uniqueness must be enforced atomically by
//! the store itself.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::AuthError;
use crate::models::{App, User};

/// Persists new users.
#[async_trait]
pub trait UserSaver: Send + Sync {
    /// Insert a user and return its ID.
    async fn save_user(&self, email: &str, name: &str, pass_hash: &[u8]) -> Result<i64, AuthError>;
}

/// Reads users and their privilege flag.
#[async_trait]
pub trait UserProvider: Send + Sync {
    async fn user_by_email(&self, email: &str) -> Result<User, AuthError>;

    async fn is_admin(&self, user_id: i64) -> Result<bool, AuthError>;
}

/// Reads application records.
#[async_trait]
pub trait AppProvider: Send + Sync {
    async fn app_by_id(&self, app_id: i32) -> Result<App, AuthError>;
}

/// A store offering every capability the service needs.
pub trait CredentialStore: UserSaver + UserProvider + AppProvider {}

impl<T: UserSaver + UserProvider + AppProvider> CredentialStore for T {}

pub use memory::MemoryStore;
pub use postgres::PgStore;
