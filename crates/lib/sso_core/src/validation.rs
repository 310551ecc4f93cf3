//! Structural request validation shared by the transport adapters.
//!
//! Runs before any call into [`AuthService`](crate::AuthService); every
//! failure is [`AuthError::InvalidArgument`].

use email_address::EmailAddress;

use super::AuthError;
use crate::password::MAX_PASSWORD_BYTES;

fn invalid(msg: &str) -> AuthError {
    AuthError::InvalidArgument(msg.to_string())
}

pub fn validate_email(email: &str) -> Result<(), AuthError> {
    if EmailAddress::is_valid(email) {
        Ok(())
    } else {
        Err(invalid("invalid email"))
    }
}

pub fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.is_empty() {
        return Err(invalid("invalid password"));
    }
    Ok(())
}

pub fn validate_login(email: &str, password: &str, app_id: i32) -> Result<(), AuthError> {
    validate_email(email)?;
    validate_password(password)?;
    if app_id == 0 {
        return Err(invalid("invalid app id"));
    }
    Ok(())
}

/// Registration also caps the password at bcrypt's input limit, since any
/// bytes past it would be silently ignored.
pub fn validate_register(email: &str, name: &str, password: &str) -> Result<(), AuthError> {
    validate_email(email)?;
    if name.is_empty() {
        return Err(invalid("invalid name"));
    }
    validate_password(password)?;
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(invalid("password is too long"));
    }
    Ok(())
}

pub fn validate_is_admin(user_id: i64) -> Result<(), AuthError> {
    if user_id == 0 {
        return Err(invalid("invalid user id"));
    }
    Ok(())
}
