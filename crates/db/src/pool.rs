//! SQLite connection pool.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::DbError;

/// Type alias for the shared SQLite pool used across the whole application.
pub type DbPool = SqlitePool;

/// Create a new connection pool from the given `database_url`.
///
/// `max_connections` controls the pool ceiling. The database file is created
/// when missing and foreign keys are enforced on every connection, which is
/// what makes show rows cascade with their venue or artist.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, DbError> {
    info!("Connecting to database (max_connections={})", max_connections);
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Run embedded SQLx migrations located in `./migrations` (relative to the
/// workspace root at build time).
pub async fn run_migrations(pool: &DbPool) -> Result<(), DbError> {
    info!("Running database migrations");
    sqlx::migrate!("../../migrations").run(pool).await?;
    Ok(())
}

/// In-memory database with the schema applied, for tests.
///
/// A single connection is used because every `sqlite::memory:` connection
/// opens its own private database.
pub async fn memory_pool() -> Result<DbPool, DbError> {
    let pool = create_pool("sqlite::memory:", 1).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}
