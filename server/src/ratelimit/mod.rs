//! Rate limiting module for protecting against abuse.
//!
//! Fixed-window request counting per client IP, held in process memory.

pub mod config;
pub mod constants;
pub mod error;
pub mod ip;
pub mod limiter;
pub mod middleware;
pub mod types;

pub use config::*;
pub use constants::*;
pub use error::*;
pub use ip::*;
pub use limiter::*;
pub use middleware::rate_limit_by_ip;
pub use types::*;
