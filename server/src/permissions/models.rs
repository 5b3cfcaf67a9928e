//! Database models for the permission system.

use serde::Serialize;
use sqlx::FromRow;

/// User identifier (`users.id`).
pub type UserId = i64;

/// Account identifier (`accounts.id`).
pub type AccountId = i64;

/// Active user joined with their role and the role's granted permission names.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserWithPermissions {
    pub id: UserId,
    pub email: String,
    pub role_id: i64,
    pub role_name: String,
    /// Names of the system permissions granted to the role.
    pub permissions: Vec<String>,
}

impl UserWithPermissions {
    /// Check whether the user's role grants the named system permission.
    ///
    /// Exact string match; there is no hierarchy or wildcard.
    #[must_use]
    pub fn has_system_permission(&self, name: &str) -> bool {
        self.permissions.iter().any(|granted| granted == name)
    }
}

/// Account membership with its capability flags.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct AccountMembership {
    pub account_id: AccountId,
    pub user_id: UserId,
    pub can_create: bool,
    pub can_edit: bool,
    pub can_delete: bool,
    pub can_publish: bool,
    pub can_respond: bool,
    pub can_analyze: bool,
}
