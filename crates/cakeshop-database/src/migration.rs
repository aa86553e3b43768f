//! Schema migrations, applied at startup before the pool is handed out.

use sqlx::PgPool;
use tracing::info;

use cakeshop_core::error::{AppError, ErrorKind};
use cakeshop_core::result::AppResult;

/// Apply any migrations under `migrations/` the database has not seen
/// yet. Idempotent; sqlx tracks applied versions in its own table.
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Schema migration failed", e))?;

    info!("Database schema is up to date");
    Ok(())
}
