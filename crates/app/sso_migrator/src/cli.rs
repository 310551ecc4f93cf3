use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};
use sqlx::postgres::{PgConnectOptions, PgSslMode};

use crate::{Error, Result};

#[derive(Parser, Debug)]
#[command(name = "sso_migrator", about = "SSO database migrations", version)]
pub struct Cli {
    #[command(flatten)]
    pub db: DbArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply pending migrations.
    Up {
        /// Read migrations from this directory instead of the embedded set.
        #[arg(long)]
        migrations: Option<PathBuf>,
    },
    /// Register a client application and print its id.
    AddApp {
        #[arg(long)]
        name: String,
        /// Key used to sign tokens issued for this application.
        #[arg(long)]
        secret: String,
    },
}

/// Connection flags. `--database-url` wins over the individual parts.
#[derive(Args, Debug)]
pub struct DbArgs {
    #[arg(long, env = "DATABASE_URL", global = true)]
    pub database_url: Option<String>,

    #[arg(long, default_value = "localhost", global = true)]
    pub host: String,

    #[arg(long, default_value_t = 5432, global = true)]
    pub port: u16,

    #[arg(long, default_value = "postgres", global = true)]
    pub user: String,

    #[arg(long, default_value = "admin", global = true)]
    pub password: String,

    #[arg(long, default_value = sso_core::db::DEFAULT_DATABASE, global = true)]
    pub dbname: String,

    /// libpq-style SSL mode.
    #[arg(long, default_value = "disable", global = true)]
    pub ssl: String,
}

impl DbArgs {
    pub fn connect_options(&self) -> Result<PgConnectOptions> {
        if let Some(url) = &self.database_url {
            return Ok(PgConnectOptions::from_str(url)?);
        }
        let ssl_mode = PgSslMode::from_str(&self.ssl)
            .map_err(|_| Error::Custom(format!("unknown ssl mode: {}", self.ssl)))?;
        Ok(PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.dbname)
            .ssl_mode(ssl_mode))
    }
}
