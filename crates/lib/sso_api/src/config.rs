//! API server configuration.

use std::time::Duration;

/// Configuration for the HTTP front end.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "0.0.0.0:8080").
    pub bind_addr: String,
    /// Requests still running after this long are aborted with 408.
    pub request_timeout: Duration,
}

impl ApiConfig {
    pub fn new(port: u16, request_timeout: Duration) -> Self {
        Self {
            bind_addr: format!("0.0.0.0:{port}"),
            request_timeout,
        }
    }
}
