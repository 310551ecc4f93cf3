//! SSO migrator binary.
//!
//! Applies schema migrations and provisions application records.

pub use self::error::{Error, Result};
mod error;

use clap::Parser;
use cli::{Cli, Commands};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sso_core::store::PgStore;
use tracing::{error, info};

mod cli;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run(Cli::parse()).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(args: Cli) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect_with(args.db.connect_options()?)
        .await?;

    match args.command {
        Commands::Up { migrations } => {
            let before = applied_count(&pool).await?;
            match migrations {
                Some(dir) => {
                    info!(dir = %dir.display(), "loading migrations");
                    Migrator::new(dir.as_path()).await?.run(&pool).await?;
                }
                None => sso_core::migrate::migrate(&pool).await?,
            }
            if applied_count(&pool).await? == before {
                println!("No new migrations to apply");
            } else {
                println!("Migrations applied successfully");
            }
        }
        Commands::AddApp { name, secret } => {
            if name.trim().is_empty() || secret.is_empty() {
                return Err(Error::Custom("app name and secret must be non-empty".into()));
            }
            let id = PgStore::new(pool).create_app(&name, &secret).await?;
            info!(app_id = id, name = %name, "app registered");
            println!("{id}");
        }
    }

    Ok(())
}

/// Number of migrations recorded by sqlx; zero before the first run.
async fn applied_count(pool: &PgPool) -> Result<i64> {
    let exists: bool =
        sqlx::query_scalar("SELECT to_regclass('_sqlx_migrations') IS NOT NULL")
            .fetch_one(pool)
            .await?;
    if !exists {
        return Ok(0);
    }
    Ok(sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await?)
}
