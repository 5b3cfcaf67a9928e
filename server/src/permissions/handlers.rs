//! Permission API handlers.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use super::evaluator::PermissionDecision;
use super::helpers::{require_granted, PermissionDenied};
use super::models::{AccountId, UserId};
use crate::api::AppState;

/// Query parameters for a combined permission check.
#[derive(Debug, Deserialize)]
pub struct CheckPermissionQuery {
    pub user_id: UserId,
    pub account_id: AccountId,
    pub system_permission: String,
    /// Account permission key, e.g. `can_publish`.
    pub account_permission: String,
}

/// Permission routes, mounted under `/api/v1/permissions`.
pub fn router() -> Router<AppState> {
    Router::new().route("/check", get(check_permission))
}

/// Run a combined permission check.
///
/// GET /api/v1/permissions/check
///
/// Answers 200 with the decision when granted, 403 with the decision when denied.
#[tracing::instrument(skip(state))]
pub async fn check_permission(
    State(state): State<AppState>,
    Query(query): Query<CheckPermissionQuery>,
) -> Result<Json<PermissionDecision>, PermissionDenied> {
    let decision = state
        .permissions
        .evaluate_key(
            query.user_id,
            query.account_id,
            &query.system_permission,
            &query.account_permission,
        )
        .await;

    require_granted(decision).map(Json)
}
