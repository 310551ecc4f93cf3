//! Database migration support.
//!
//! Embeds and runs SQL migrations from `sso_core/migrations/`.

use sqlx::PgPool;
use sqlx::migrate::{MigrateError, Migrator};

/// Migrations compiled into the binary.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run all embedded database migrations against the given pool.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}
