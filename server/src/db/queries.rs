//! Database Queries
//!
//! Runtime queries (no compile-time `DATABASE_URL` required).

use sqlx::PgPool;
use tracing::error;

use super::models::ServerInfo;

/// Log and return a database error with context.
macro_rules! db_error {
    ($query:expr) => {
        |e| {
            error!(query = $query, error = %e, "Database query failed");
            e
        }
    };
}

/// Run a trivial query to verify connectivity.
pub async fn ping(pool: &PgPool) -> sqlx::Result<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map_err(db_error!("ping"))?;
    Ok(())
}

/// Fetch the database server's clock and the connected database name.
pub async fn server_info(pool: &PgPool) -> sqlx::Result<ServerInfo> {
    sqlx::query_as::<_, ServerInfo>(
        "SELECT NOW() AS current_time, current_database()::TEXT AS database_name",
    )
    .fetch_one(pool)
    .await
    .map_err(db_error!("server_info"))
}
