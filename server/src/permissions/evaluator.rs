//! Combined permission evaluation.
//!
//! An action is allowed only when the user's role grants the required system
//! permission AND the user's membership in the target account carries the
//! required account permission flag.
//!
//! Evaluation fails closed: every ambiguity or store failure produces a denial.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error};

use super::account::AccountPermission;
use super::models::{AccountId, UserId};
use super::store::{AccountMembershipStore, StoreError, UserDirectory};

/// Machine-readable tag for a [`PermissionDecision`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionOutcome {
    /// Both checks passed.
    Granted,
    /// User missing, inactive, or soft-deleted.
    UserNotFoundOrInactive,
    /// Role does not grant the required system permission.
    MissingSystemPermission,
    /// User has no membership in the target account.
    NoAccountMembership,
    /// Membership exists but lacks the required flag.
    MissingAccountPermission,
    /// The requested account permission key is not recognized.
    UnknownAccountPermission,
    /// A store lookup failed.
    CheckFailed,
}

/// Result of a combined permission check.
///
/// `granted` is true exactly when the outcome is [`DecisionOutcome::Granted`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionDecision {
    granted: bool,
    reason: String,
    outcome: DecisionOutcome,
}

impl PermissionDecision {
    fn new(outcome: DecisionOutcome, reason: impl Into<String>) -> Self {
        Self {
            granted: outcome == DecisionOutcome::Granted,
            reason: reason.into(),
            outcome,
        }
    }

    fn granted() -> Self {
        Self::new(
            DecisionOutcome::Granted,
            "User has both system and account permissions",
        )
    }

    fn user_not_found() -> Self {
        Self::new(
            DecisionOutcome::UserNotFoundOrInactive,
            "User not found or inactive",
        )
    }

    fn missing_system_permission(name: &str) -> Self {
        Self::new(
            DecisionOutcome::MissingSystemPermission,
            format!("User lacks system permission: {name}"),
        )
    }

    fn no_account_membership() -> Self {
        Self::new(
            DecisionOutcome::NoAccountMembership,
            "User not associated with this account",
        )
    }

    fn missing_account_permission(outcome: DecisionOutcome, key: &str) -> Self {
        Self::new(outcome, format!("User lacks account permission: {key}"))
    }

    fn check_failed(err: &StoreError) -> Self {
        Self::new(
            DecisionOutcome::CheckFailed,
            format!("Permission check failed: {err}"),
        )
    }

    /// Whether the action is allowed.
    #[must_use]
    pub const fn is_granted(&self) -> bool {
        self.granted
    }

    /// Human-readable explanation, intended for logs and diagnostics.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    #[must_use]
    pub const fn outcome(&self) -> DecisionOutcome {
        self.outcome
    }
}

/// Decides system-AND-account authorization for one action.
///
/// Holds no state between calls and is safe to share across tasks.
#[derive(Debug, Clone)]
pub struct PermissionEvaluator {
    users: Arc<dyn UserDirectory>,
    memberships: Arc<dyn AccountMembershipStore>,
}

impl PermissionEvaluator {
    #[must_use]
    pub fn new(
        users: Arc<dyn UserDirectory>,
        memberships: Arc<dyn AccountMembershipStore>,
    ) -> Self {
        Self { users, memberships }
    }

    /// Build an evaluator backed by a single store implementing both contracts.
    #[must_use]
    pub fn from_store<S>(store: S) -> Self
    where
        S: UserDirectory + AccountMembershipStore + 'static,
    {
        let store = Arc::new(store);
        Self {
            users: store.clone(),
            memberships: store,
        }
    }

    /// Check that `user_id` holds `system_permission` and, within `account_id`,
    /// `account_permission`.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let decision = evaluator
    ///     .evaluate(user_id, account_id, "manage_billing", AccountPermission::CanPublish)
    ///     .await;
    /// if !decision.is_granted() {
    ///     tracing::info!(reason = decision.reason(), "Denied");
    /// }
    /// ```
    #[tracing::instrument(skip(self))]
    pub async fn evaluate(
        &self,
        user_id: UserId,
        account_id: AccountId,
        system_permission: &str,
        account_permission: AccountPermission,
    ) -> PermissionDecision {
        self.decide(user_id, account_id, system_permission, Ok(account_permission))
            .await
    }

    /// Like [`evaluate`](Self::evaluate), but takes the account permission as its
    /// string key.
    ///
    /// Unrecognized keys are denied at the account-permission step, tagged
    /// [`DecisionOutcome::UnknownAccountPermission`].
    #[tracing::instrument(skip(self))]
    pub async fn evaluate_key(
        &self,
        user_id: UserId,
        account_id: AccountId,
        system_permission: &str,
        account_permission_key: &str,
    ) -> PermissionDecision {
        let requested = account_permission_key
            .parse::<AccountPermission>()
            .map_err(|_| account_permission_key);
        self.decide(user_id, account_id, system_permission, requested)
            .await
    }

    async fn decide(
        &self,
        user_id: UserId,
        account_id: AccountId,
        system_permission: &str,
        requested: Result<AccountPermission, &str>,
    ) -> PermissionDecision {
        match self
            .resolve(user_id, account_id, system_permission, requested)
            .await
        {
            Ok(decision) => {
                debug!(
                    user_id,
                    account_id,
                    granted = decision.granted,
                    outcome = ?decision.outcome,
                    "Combined permission checked"
                );
                decision
            }
            Err(e) => {
                error!(user_id, account_id, error = %e, "Error checking combined permission");
                PermissionDecision::check_failed(&e)
            }
        }
    }

    async fn resolve(
        &self,
        user_id: UserId,
        account_id: AccountId,
        system_permission: &str,
        requested: Result<AccountPermission, &str>,
    ) -> Result<PermissionDecision, StoreError> {
        let Some(user) = self.users.active_user_with_role_permissions(user_id).await? else {
            return Ok(PermissionDecision::user_not_found());
        };

        if !user.has_system_permission(system_permission) {
            return Ok(PermissionDecision::missing_system_permission(
                system_permission,
            ));
        }

        let Some(membership) = self.memberships.membership(account_id, user_id).await? else {
            return Ok(PermissionDecision::no_account_membership());
        };

        let decision = match requested {
            Ok(permission) if permission.is_granted_by(&membership) => {
                PermissionDecision::granted()
            }
            Ok(permission) => PermissionDecision::missing_account_permission(
                DecisionOutcome::MissingAccountPermission,
                permission.key(),
            ),
            Err(key) => PermissionDecision::missing_account_permission(
                DecisionOutcome::UnknownAccountPermission,
                key,
            ),
        };

        Ok(decision)
    }
}
