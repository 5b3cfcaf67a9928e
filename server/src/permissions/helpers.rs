//! Permission guards for API handlers.
//!
//! Turn a [`PermissionDecision`] into a handler result so denials become 403s.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use super::account::AccountPermission;
use super::evaluator::{DecisionOutcome, PermissionDecision, PermissionEvaluator};
use super::models::{AccountId, UserId};

/// A combined permission check denied the action.
#[derive(Debug, Error)]
#[error("{}", .0.reason())]
pub struct PermissionDenied(pub PermissionDecision);

/// Client-facing message for a failed check. Store error details are logged only.
pub const CHECK_FAILED_MESSAGE: &str = "Permission check failed";

/// Decision as exposed in a 403 body.
#[derive(Debug, Serialize)]
pub struct DeniedDecision {
    pub granted: bool,
    pub reason: String,
    pub outcome: DecisionOutcome,
}

/// Body of a 403 response.
#[derive(Debug, Serialize)]
pub struct PermissionDeniedResponse {
    pub error: &'static str,
    pub message: String,
    pub decision: DeniedDecision,
}

/// Reason safe to return to callers.
fn client_reason(decision: &PermissionDecision) -> &str {
    match decision.outcome() {
        DecisionOutcome::CheckFailed => CHECK_FAILED_MESSAGE,
        _ => decision.reason(),
    }
}

impl IntoResponse for PermissionDenied {
    fn into_response(self) -> Response {
        let reason = client_reason(&self.0).to_string();
        let body = Json(PermissionDeniedResponse {
            error: "FORBIDDEN",
            message: reason.clone(),
            decision: DeniedDecision {
                granted: self.0.is_granted(),
                reason,
                outcome: self.0.outcome(),
            },
        });
        (StatusCode::FORBIDDEN, body).into_response()
    }
}

/// Pass a granted decision through, or reject it.
pub fn require_granted(decision: PermissionDecision) -> Result<PermissionDecision, PermissionDenied> {
    if decision.is_granted() {
        Ok(decision)
    } else {
        info!(
            outcome = ?decision.outcome(),
            reason = decision.reason(),
            "Permission denied"
        );
        Err(PermissionDenied(decision))
    }
}

/// Evaluate a combined permission and require it to be granted.
///
/// # Example
///
/// ```ignore
/// // In an API handler:
/// require_combined_permission(
///     &state.permissions,
///     user_id,
///     account_id,
///     "publish_content",
///     AccountPermission::CanPublish,
/// )
/// .await?;
/// ```
pub async fn require_combined_permission(
    evaluator: &PermissionEvaluator,
    user_id: UserId,
    account_id: AccountId,
    system_permission: &str,
    account_permission: AccountPermission,
) -> Result<PermissionDecision, PermissionDenied> {
    require_granted(
        evaluator
            .evaluate(user_id, account_id, system_permission, account_permission)
            .await,
    )
}
