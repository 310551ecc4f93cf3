//! Domain error → gRPC status mapping.

use sso_core::AuthError;
use tonic::{Code, Status};
use tracing::{error, warn};

/// Map a domain error onto a status, logging it under the operation name.
///
/// Internal details are logged, never returned.
pub fn to_status(op: &'static str, err: AuthError) -> Status {
    let kind = err.kind();
    match err {
        AuthError::InvalidCredentials => {
            warn!(op, kind, "invalid credentials");
            Status::new(Code::InvalidArgument, "invalid email or password")
        }
        AuthError::UserExists => {
            warn!(op, kind, "user already exists");
            Status::new(Code::AlreadyExists, "user already exists")
        }
        AuthError::NotFound(what) => {
            warn!(op, kind, what, "not found");
            Status::new(Code::NotFound, format!("{what} not found"))
        }
        AuthError::InvalidArgument(msg) => {
            warn!(op, kind, reason = %msg, "invalid argument");
            Status::new(Code::InvalidArgument, msg)
        }
        AuthError::Internal(detail) => {
            error!(op, kind, detail = %detail, "request failed");
            Status::new(Code::Internal, "internal server error")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_codes() {
        let cases = [
            (AuthError::InvalidCredentials, Code::InvalidArgument),
            (AuthError::UserExists, Code::AlreadyExists),
            (AuthError::NotFound("user"), Code::NotFound),
            (AuthError::InvalidArgument("bad".into()), Code::InvalidArgument),
            (AuthError::Internal("db down".into()), Code::Internal),
        ];
        for (err, code) in cases {
            assert_eq!(to_status("test", err).code(), code);
        }
    }

    #[test]
    fn internal_detail_is_not_exposed() {
        let status = to_status("test", AuthError::Internal("SELECT secret FROM apps".into()));
        assert_eq!(status.message(), "internal server error");
    }
}
