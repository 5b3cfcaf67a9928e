//! Account-scoped permissions.
//!
//! These capabilities are granted per account membership, distinct from the
//! system permissions a role carries platform-wide.

use std::fmt;
use std::str::FromStr;

use super::models::AccountMembership;

/// Capability flag on an account membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountPermission {
    /// Create drafts and scheduled posts
    CanCreate,
    /// Edit existing posts
    CanEdit,
    /// Delete posts
    CanDelete,
    /// Publish posts to the connected platform
    CanPublish,
    /// Reply to comments and messages
    CanRespond,
    /// View analytics for the account
    CanAnalyze,
}

impl AccountPermission {
    /// Returns the wire key for this permission.
    ///
    /// # Examples
    ///
    /// ```
    /// use socialhub_server::permissions::AccountPermission;
    ///
    /// assert_eq!(AccountPermission::CanPublish.key(), "can_publish");
    /// ```
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::CanCreate => "can_create",
            Self::CanEdit => "can_edit",
            Self::CanDelete => "can_delete",
            Self::CanPublish => "can_publish",
            Self::CanRespond => "can_respond",
            Self::CanAnalyze => "can_analyze",
        }
    }

    /// Returns all account permissions as a slice.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::CanCreate,
            Self::CanEdit,
            Self::CanDelete,
            Self::CanPublish,
            Self::CanRespond,
            Self::CanAnalyze,
        ]
    }

    /// Reads the membership flag backing this permission.
    #[must_use]
    pub const fn is_granted_by(&self, membership: &AccountMembership) -> bool {
        match self {
            Self::CanCreate => membership.can_create,
            Self::CanEdit => membership.can_edit,
            Self::CanDelete => membership.can_delete,
            Self::CanPublish => membership.can_publish,
            Self::CanRespond => membership.can_respond,
            Self::CanAnalyze => membership.can_analyze,
        }
    }
}

impl fmt::Display for AccountPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Returned when a string does not name an account permission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown account permission: {0}")]
pub struct UnknownAccountPermission(pub String);

impl FromStr for AccountPermission {
    type Err = UnknownAccountPermission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|perm| perm.key() == s)
            .ok_or_else(|| UnknownAccountPermission(s.to_string()))
    }
}
