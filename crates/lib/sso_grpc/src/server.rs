//! `auth.Auth` service implementation.

use std::sync::Arc;

use sso_core::{AuthService, validation};
use tonic::{Request, Response, Status};
use tracing::debug;

use crate::proto::auth_server::Auth;
use crate::proto::{
    HealthRequest, HealthResponse, IsAdminRequest, IsAdminResponse, LoginRequest, LoginResponse,
    RegisterRequest, RegisterResponse,
};
use crate::status::to_status;

/// gRPC front end over a shared [`AuthService`].
#[derive(Clone)]
pub struct AuthGrpc {
    auth: Arc<AuthService>,
}

impl AuthGrpc {
    pub fn new(auth: Arc<AuthService>) -> Self {
        Self { auth }
    }
}

#[tonic::async_trait]
impl Auth for AuthGrpc {
    async fn register(
        &self,
        request: Request<RegisterRequest>,
    ) -> Result<Response<RegisterResponse>, Status> {
        const OP: &str = "grpc.Register";
        let req = request.into_inner();

        validation::validate_register(&req.email, &req.name, &req.password)
            .map_err(|e| to_status(OP, e))?;
        let user_id = self
            .auth
            .register_new_user(&req.email, &req.name, &req.password)
            .await
            .map_err(|e| to_status(OP, e))?;

        Ok(Response::new(RegisterResponse { user_id }))
    }

    async fn login(
        &self,
        request: Request<LoginRequest>,
    ) -> Result<Response<LoginResponse>, Status> {
        const OP: &str = "grpc.Login";
        let req = request.into_inner();

        validation::validate_login(&req.email, &req.password, req.app_id)
            .map_err(|e| to_status(OP, e))?;
        let token = self
            .auth
            .login(&req.email, &req.password, req.app_id)
            .await
            .map_err(|e| to_status(OP, e))?;

        Ok(Response::new(LoginResponse { token }))
    }

    async fn is_admin(
        &self,
        request: Request<IsAdminRequest>,
    ) -> Result<Response<IsAdminResponse>, Status> {
        const OP: &str = "grpc.IsAdmin";
        let req = request.into_inner();

        validation::validate_is_admin(req.user_id).map_err(|e| to_status(OP, e))?;
        let is_admin = self
            .auth
            .is_admin(req.user_id)
            .await
            .map_err(|e| to_status(OP, e))?;

        Ok(Response::new(IsAdminResponse { is_admin }))
    }

    async fn health(
        &self,
        _request: Request<HealthRequest>,
    ) -> Result<Response<HealthResponse>, Status> {
        debug!("health check request");
        Ok(Response::new(HealthResponse {
            status: "OK".to_string(),
        }))
    }
}
