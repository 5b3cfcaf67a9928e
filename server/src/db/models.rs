//! Database Models

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Database health status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Result of a database health probe.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl HealthReport {
    #[must_use]
    pub fn healthy() -> Self {
        Self {
            status: HealthStatus::Healthy,
            error: None,
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn unhealthy(error: String) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            error: Some(error),
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}

/// Server-side clock and database name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ServerInfo {
    pub current_time: DateTime<Utc>,
    pub database_name: String,
}
