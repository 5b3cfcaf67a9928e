//! Rate limiting constants.

/// IPv6 prefix segments for rate limiting (uses /64)
pub const IPV6_PREFIX_SEGMENTS: usize = 4;

/// Default window length (15 minutes)
pub const DEFAULT_WINDOW_MS: u64 = 15 * 60 * 1000;

/// Default requests allowed per window
pub const DEFAULT_MAX_REQUESTS: u32 = 100;

/// How often expired windows are dropped
pub const PURGE_INTERVAL_SECS: u64 = 60;

/// Message returned to rate-limited clients
pub const RATE_LIMIT_MESSAGE: &str = "Too many requests from this IP, please try again later.";
