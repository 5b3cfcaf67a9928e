//! Database Layer
//!
//! `PostgreSQL` connection pool lifecycle and health checks. The pool is created
//! once at startup, handed to whoever needs it, and closed on shutdown.

mod models;
mod queries;

use std::time::Duration;

use anyhow::Result;
pub use models::*;
pub use queries::*;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{error, info};

/// Create `PostgreSQL` connection pool with health configuration.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .min_connections(1)
        .max_connections(20)
        // Prevent hanging requests on pool exhaustion
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(600))
        .test_before_acquire(true)
        .connect(database_url)
        .await
        .map_err(|e| {
            error!(error = %e, "Database connection failed");
            e
        })?;

    info!("Connected to PostgreSQL");
    Ok(pool)
}

/// Run database migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations completed");
    Ok(())
}

/// Probe the database and report its status. Never fails.
pub async fn health_check(pool: &PgPool) -> HealthReport {
    match ping(pool).await {
        Ok(()) => HealthReport::healthy(),
        Err(e) => HealthReport::unhealthy(e.to_string()),
    }
}

/// Close all pooled connections.
pub async fn close_pool(pool: &PgPool) {
    pool.close().await;
    info!("Database disconnected");
}
