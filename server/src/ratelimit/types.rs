//! Rate limiting types.

/// Result of a rate limit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitResult {
    /// Whether the request is allowed
    pub allowed: bool,
    /// Maximum requests allowed in the window (0 when limiting is bypassed)
    pub limit: u32,
    /// Remaining requests in the current window
    pub remaining: u32,
    /// Seconds to wait before retrying (0 if allowed)
    pub retry_after: u64,
}

impl RateLimitResult {
    /// Result for requests that are not subject to limiting.
    #[must_use]
    pub const fn bypassed() -> Self {
        Self {
            allowed: true,
            limit: 0,
            remaining: 0,
            retry_after: 0,
        }
    }
}

