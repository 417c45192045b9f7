//! Database access layer: models, repositories, the relation toggle engine,
//! and the soft-delete lifecycle.
//!
//! Repositories are zero-sized structs with async methods taking `&PgPool`.
//! Two deliberate exceptions to plain CRUD live here as well:
//!
//! - [`toggle::ToggleEngine`] is the only writer of the `relations` table and
//!   of the denormalized counter columns.
//! - [`lifecycle::Lifecycle`] is the only module that flips `deleted_at`.

pub mod lifecycle;
pub mod models;
pub mod reconcile;
pub mod repositories;
pub mod toggle;

use sqlx::postgres::PgPoolOptions;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Cheap connectivity probe used by the health endpoint and startup.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply any pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
