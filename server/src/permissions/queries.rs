//! Database queries for the permission system.
//!
//! Runtime queries (no compile-time `DATABASE_URL` required).

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::error;

use super::models::{AccountId, AccountMembership, UserId, UserWithPermissions};
use super::store::{AccountMembershipStore, StoreError, UserDirectory};

/// Find an active, non-deleted user together with their role's permission names.
#[tracing::instrument(skip(pool))]
pub async fn find_active_user_with_role_permissions(
    pool: &PgPool,
    user_id: UserId,
) -> sqlx::Result<Option<UserWithPermissions>> {
    sqlx::query_as::<_, UserWithPermissions>(
        r"
        SELECT
            u.id,
            u.email,
            r.id AS role_id,
            r.name AS role_name,
            COALESCE(
                array_agg(p.name ORDER BY p.name) FILTER (WHERE p.name IS NOT NULL),
                '{}'
            ) AS permissions
        FROM users u
        INNER JOIN roles r ON r.id = u.role_id
        LEFT JOIN role_permissions rp ON rp.role_id = r.id
        LEFT JOIN permissions p ON p.id = rp.permission_id
        WHERE u.id = $1
          AND u.is_active = TRUE
          AND u.deleted_at IS NULL
        GROUP BY u.id, u.email, r.id, r.name
        ",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        error!(query = "find_active_user_with_role_permissions", user_id, error = %e, "Database query failed");
        e
    })
}

/// Find the membership linking a user to an account.
#[tracing::instrument(skip(pool))]
pub async fn find_account_membership(
    pool: &PgPool,
    account_id: AccountId,
    user_id: UserId,
) -> sqlx::Result<Option<AccountMembership>> {
    sqlx::query_as::<_, AccountMembership>(
        r"
        SELECT account_id, user_id, can_create, can_edit, can_delete,
               can_publish, can_respond, can_analyze
        FROM account_users
        WHERE account_id = $1 AND user_id = $2
        ",
    )
    .bind(account_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        error!(query = "find_account_membership", account_id, user_id, error = %e, "Database query failed");
        e
    })
}

/// `PostgreSQL`-backed implementation of both permission read contracts.
#[derive(Debug, Clone)]
pub struct PgPermissionStore {
    pool: PgPool,
}

impl PgPermissionStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PgPermissionStore {
    async fn active_user_with_role_permissions(
        &self,
        user_id: UserId,
    ) -> Result<Option<UserWithPermissions>, StoreError> {
        Ok(find_active_user_with_role_permissions(&self.pool, user_id).await?)
    }
}

#[async_trait]
impl AccountMembershipStore for PgPermissionStore {
    async fn membership(
        &self,
        account_id: AccountId,
        user_id: UserId,
    ) -> Result<Option<AccountMembership>, StoreError> {
        Ok(find_account_membership(&self.pool, account_id, user_id).await?)
    }
}
