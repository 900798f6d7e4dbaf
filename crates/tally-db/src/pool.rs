//! Database connection pool

use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Database connection pool type alias
pub type DbPool = PgPool;

/// Embedded schema migrations, run by the service at startup
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

/// Create a new database connection pool
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}
