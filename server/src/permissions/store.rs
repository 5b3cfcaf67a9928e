//! Read contracts the permission evaluator depends on.
//!
//! Implemented for `PostgreSQL` by [`PgPermissionStore`](super::PgPermissionStore).

use std::fmt::Debug;

use async_trait::async_trait;
use thiserror::Error;

use super::models::{AccountId, AccountMembership, UserId, UserWithPermissions};

/// Failure reading permission data from a backing store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database query or connectivity error.
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    /// Any other backend failure.
    #[error("{0}")]
    Backend(String),
}

/// Source of users with their role permissions.
#[async_trait]
pub trait UserDirectory: Debug + Send + Sync {
    /// Load a user with role and granted permission names.
    ///
    /// Returns `None` when the user does not exist, is inactive, or is soft-deleted.
    async fn active_user_with_role_permissions(
        &self,
        user_id: UserId,
    ) -> Result<Option<UserWithPermissions>, StoreError>;
}

/// Source of account memberships.
#[async_trait]
pub trait AccountMembershipStore: Debug + Send + Sync {
    /// Load the membership for a (account, user) pair, if any.
    async fn membership(
        &self,
        account_id: AccountId,
        user_id: UserId,
    ) -> Result<Option<AccountMembership>, StoreError>;
}
