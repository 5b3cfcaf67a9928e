//! Permission system types and utilities.
//!
//! Two-tier permission model:
//! - System permissions: granted to a user's role, platform-wide
//! - Account permissions: capability flags on a user's membership in one account
//!
//! An action guarded by both requires both.

pub mod account;
pub mod evaluator;
pub mod handlers;
pub mod helpers;
pub mod models;
pub mod queries;
pub mod store;

pub use account::{AccountPermission, UnknownAccountPermission};
pub use evaluator::{DecisionOutcome, PermissionDecision, PermissionEvaluator};
pub use helpers::{require_combined_permission, require_granted, PermissionDenied};
pub use models::*;
pub use queries::{find_account_membership, find_active_user_with_role_permissions, PgPermissionStore};
pub use store::{AccountMembershipStore, StoreError, UserDirectory};
