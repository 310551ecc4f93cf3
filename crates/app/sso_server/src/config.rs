//! Server configuration loaded from a YAML file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use sso_core::AuthConfig;
use sso_core::db::DbConfig;
use sso_core::password::DEFAULT_COST;
use sso_core::token::MAX_TTL;
use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Deployment environment; selects the log format and default level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Env {
    #[default]
    Local,
    Dev,
    Prod,
}

fn default_bcrypt_cost() -> u32 {
    DEFAULT_COST
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize)]
pub struct GrpcConfig {
    pub port: u16,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub port: u16,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Top-level server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub env: Env,
    /// Lifetime of issued tokens, in seconds.
    pub token_ttl_secs: u64,
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
    pub grpc: GrpcConfig,
    pub http_server: HttpConfig,
    pub postgres: DbConfig,
}

impl Config {
    /// Read and validate the config file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&raw)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.token_ttl_secs == 0 {
            return Err(ConfigError::Invalid("token_ttl_secs must be positive".into()));
        }
        if self.token_ttl_secs > MAX_TTL.as_secs() {
            return Err(ConfigError::Invalid(format!(
                "token_ttl_secs must not exceed {}",
                MAX_TTL.as_secs()
            )));
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::Invalid(format!(
                "bcrypt_cost must be within 4..=31, got {}",
                self.bcrypt_cost
            )));
        }
        if self.grpc.timeout_secs == 0 || self.http_server.timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeouts must be positive".into()));
        }
        if self.grpc.port != 0 && self.grpc.port == self.http_server.port {
            return Err(ConfigError::Invalid(format!(
                "grpc and http_server share port {}",
                self.grpc.port
            )));
        }
        self.postgres
            .connect_options()
            .map_err(|e| ConfigError::Invalid(format!("postgres: {e}")))?;
        Ok(())
    }

    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig::new(Duration::from_secs(self.token_ttl_secs)).with_bcrypt_cost(self.bcrypt_cost)
    }
}
