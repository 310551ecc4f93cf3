//! Domain error kinds shared by the store, the service and the adapters.

use thiserror::Error;

/// Result type for authentication operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Authentication errors.
///
/// Callers branch on the variant only. The payload of `Internal` is a
/// diagnostic for logs and must never be sent to a client.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The named entity ("user", "app") does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Unknown email or wrong password. The two cases are not distinguished.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User already exists")]
    UserExists,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Short, stable tag for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::NotFound(_) => "not_found",
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::UserExists => "user_exists",
            AuthError::InvalidArgument(_) => "invalid_argument",
            AuthError::Internal(_) => "internal",
        }
    }
}

impl From<tokio::task::JoinError> for AuthError {
    fn from(e: tokio::task::JoinError) -> Self {
        AuthError::Internal(format!("blocking task: {e}"))
    }
}
