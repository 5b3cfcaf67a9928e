//! Service status endpoints: landing page, health, database probe, 404.

use axum::{
    extract::{OriginalUri, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::error;

use super::{ApiError, AppState, AVAILABLE_ROUTES};
use crate::db;

const SERVICE_NAME: &str = "Social Media SaaS Platform API";

/// Landing page.
///
/// GET /
pub async fn root(State(state): State<AppState>) -> Html<String> {
    let endpoints = [
        "GET /health - Health Check",
        "GET /test-db - Database Connectivity",
        "GET /api/v1/permissions/check - Combined Permission Check",
    ]
    .iter()
    .map(|e| format!(r#"<div class="endpoint">{e}</div>"#))
    .collect::<Vec<_>>()
    .join("\n          ");

    Html(format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <title>Social Media SaaS Platform</title>
    <style>
      body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; margin: 40px; }}
      .container {{ max-width: 600px; margin: 0 auto; }}
      .header {{ color: #2563eb; border-bottom: 2px solid #e5e7eb; padding-bottom: 20px; }}
      .info {{ background: #f8fafc; padding: 20px; border-radius: 8px; margin: 20px 0; }}
      .endpoint {{ background: #1f2937; color: #f9fafb; padding: 8px 12px; border-radius: 4px; margin: 4px 0; font-family: monospace; }}
    </style>
  </head>
  <body>
    <div class="container">
      <div class="header">
        <h1>{SERVICE_NAME}</h1>
        <p>Social media management with role-based and per-account access control</p>
      </div>
      <div class="info">
        <p><strong>Version:</strong> {version}</p>
        <p><strong>Environment:</strong> {environment}</p>
        <p><strong>Database:</strong> PostgreSQL</p>
        <p><strong>API Base:</strong> <code>/api/v1</code></p>
      </div>
      <div class="endpoints">
        <h3>Available Endpoints:</h3>
          {endpoints}
      </div>
    </div>
  </body>
</html>
"#,
        version = env!("CARGO_PKG_VERSION"),
        environment = state.config.environment,
    ))
}

/// Healthy response body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: DateTime<Utc>,
    pub environment: &'static str,
    pub database: &'static str,
    pub version: &'static str,
}

/// Unhealthy response body.
#[derive(Debug, Serialize)]
pub struct HealthErrorResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: DateTime<Utc>,
    pub error: String,
}

/// Health check endpoint.
///
/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Response {
    let report = db::health_check(&state.db).await;

    match report.error {
        None => Json(HealthResponse {
            status: "OK",
            message: "Social Media SaaS Platform API is running",
            timestamp: report.timestamp,
            environment: state.config.environment.as_str(),
            database: "Connected",
            version: env!("CARGO_PKG_VERSION"),
        })
        .into_response(),
        Some(err) => {
            error!(error = %err, "Health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthErrorResponse {
                    status: "ERROR",
                    message: "Database connection failed",
                    timestamp: report.timestamp,
                    error: err,
                }),
            )
                .into_response()
        }
    }
}

/// Database probe response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestDbResponse {
    pub message: &'static str,
    pub current_time: DateTime<Utc>,
    pub database: String,
}

/// Query the database clock and name.
///
/// GET /test-db
pub async fn test_db(State(state): State<AppState>) -> Result<Json<TestDbResponse>, ApiError> {
    let info = db::server_info(&state.db).await.map_err(|e| {
        error!(error = %e, "Database connection error");
        e
    })?;

    Ok(Json(TestDbResponse {
        message: "Database connection successful",
        current_time: info.current_time,
        database: info.database_name,
    }))
}

/// Unknown route response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotFoundResponse {
    pub error: &'static str,
    pub message: String,
    pub available_routes: &'static [&'static str],
}

/// Fallback for unmatched routes.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> (StatusCode, Json<NotFoundResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(NotFoundResponse {
            error: "Route not found",
            message: format!("The route {} does not exist on this server", uri.path()),
            available_routes: &AVAILABLE_ROUTES,
        }),
    )
}
