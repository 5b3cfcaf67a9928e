//! `SocialHub` Server - Main Entry Point
//!
//! Multi-tenant social media management API backend.

use anyhow::Result;
use std::net::SocketAddr;
use tracing::{info, warn};

use socialhub_server::{api, config, db, observability, ratelimit};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env()?;

    observability::init_tracing(config.environment)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.environment,
        address = %config.bind_address,
        "Starting SocialHub Server"
    );

    // Initialize database
    let db_pool = db::create_pool(&config.database_url).await?;
    db::run_migrations(&db_pool).await?;
    db::ping(&db_pool).await?;
    info!("Database query test successful");

    // Initialize rate limiter (optional)
    let rate_limiter = {
        use ratelimit::{RateLimitConfig, RateLimiter};

        let rl_config = RateLimitConfig::from_env();
        if rl_config.enabled {
            let limiter = RateLimiter::new(rl_config);
            limiter.spawn_purge_task();
            Some(limiter)
        } else {
            info!("Rate limiting disabled by configuration");
            None
        }
    };

    // Build application state and router
    let state = api::AppState::new(db_pool.clone(), config.clone(), rate_limiter);
    let app = api::create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!(url = %config.public_url, api = %config.api_base_url(), "Server listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    db::close_pool(&db_pool).await;
    info!("Server shutdown complete");

    Ok(())
}

/// Resolves on SIGINT (Ctrl+C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("SIGINT received, shutting down gracefully"),
        () = terminate => info!("SIGTERM received, shutting down gracefully"),
    }
}
