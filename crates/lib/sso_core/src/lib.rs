//! # sso_core
//!
//! Core authentication logic for SSO.
//!
//! Credential verification, registration, token minting and privilege
//! lookup, independent of the transport that exposes them.

pub mod db;
pub mod error;
pub mod migrate;
pub mod models;
pub mod password;
pub mod service;
pub mod store;
pub mod token;
pub mod validation;

pub use error::{AuthError, Result};
pub use service::{AuthConfig, AuthService};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
