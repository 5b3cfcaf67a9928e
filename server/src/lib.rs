//! `SocialHub` Server
//!
//! Multi-tenant social media management API. Authorization combines a
//! platform-wide role permission with a per-account membership capability.

pub mod api;
pub mod config;
pub mod db;
pub mod observability;
pub mod permissions;
pub mod ratelimit;
