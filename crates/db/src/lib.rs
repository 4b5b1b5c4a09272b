//! PostgreSQL persistence for formbox.
//!
//! Exposes pool construction, embedded migrations, entity models and
//! repositories. All SQL lives in the repository types; handlers never
//! write queries.

pub mod models;
pub mod repositories;

use sqlx::postgres::PgPoolOptions;

/// Shared connection pool type used across crates.
pub type DbPool = sqlx::PgPool;

/// Default maximum number of pooled connections.
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(DEFAULT_MAX_CONNECTIONS)
        .connect(database_url)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all embedded migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::debug!("Database migrations up to date");
    Ok(())
}
