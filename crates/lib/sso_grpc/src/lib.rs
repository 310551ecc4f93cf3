//! # sso_grpc
//!
//! gRPC API library for SSO.
//!
//! Exposes [`AuthService`](sso_core::AuthService) as the `auth.Auth` tonic
//! service. Requests are validated structurally before the core sees them.

pub mod proto;
pub mod server;
pub mod status;

pub use proto::auth_server::AuthServer;
pub use server::AuthGrpc;

use std::sync::Arc;

use sso_core::AuthService;

/// Wrap the service for mounting on a `tonic::transport::Server`.
pub fn auth_server(auth: Arc<AuthService>) -> AuthServer<AuthGrpc> {
    AuthServer::new(AuthGrpc::new(auth))
}
