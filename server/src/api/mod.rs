//! API Router and Application State
//!
//! Central routing configuration and shared state.

mod error;
mod security;
mod status;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::warn;

pub use error::{ApiError, ErrorResponse};
pub use security::security_headers;

use crate::{
    config::Config,
    permissions::{self, PermissionEvaluator, PgPermissionStore},
    ratelimit::{rate_limit_by_ip, RateLimiter},
};

/// Routes listed in the 404 response.
pub const AVAILABLE_ROUTES: [&str; 4] = ["/", "/health", "/test-db", "/api/v1/permissions"];

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,
    /// Server configuration
    pub config: Arc<Config>,
    /// Combined permission evaluator
    pub permissions: PermissionEvaluator,
    /// Rate limiter (optional)
    pub rate_limiter: Option<RateLimiter>,
}

impl AppState {
    /// Create new application state.
    ///
    /// Permission checks read from the same pool.
    #[must_use]
    pub fn new(db: PgPool, config: Config, rate_limiter: Option<RateLimiter>) -> Self {
        let permissions = PermissionEvaluator::from_store(PgPermissionStore::new(db.clone()));
        Self {
            db,
            config: Arc::new(config),
            permissions,
            rate_limiter,
        }
    }

    /// Replace the permission evaluator.
    #[must_use]
    pub fn with_permissions(mut self, permissions: PermissionEvaluator) -> Self {
        self.permissions = permissions;
        self
    }
}

/// Build the CORS layer from configured origins.
fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .max_age(Duration::from_secs(600))
}

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);
    let max_body_size = state.config.max_body_size;

    let api_routes = Router::new().nest("/permissions", permissions::handlers::router());

    Router::new()
        .route("/", get(status::root))
        .route("/health", get(status::health_check))
        .route("/test-db", get(status::test_db))
        .nest("/api/v1", api_routes)
        .fallback(status::not_found)
        // Middleware (last added runs first)
        .layer(from_fn_with_state(state.clone(), rate_limit_by_ip))
        .layer(from_fn(security_headers))
        .layer(DefaultBodyLimit::max(max_body_size))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}
