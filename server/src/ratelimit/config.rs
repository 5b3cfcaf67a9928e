//! Rate limiting configuration.

use std::collections::HashSet;
use std::time::Duration;

use crate::ratelimit::constants::{DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW_MS};

/// Configuration for the rate limiting system.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Whether rate limiting is enabled
    pub enabled: bool,
    /// Whether to trust X-Forwarded-For headers
    pub trust_proxy: bool,
    /// IP addresses that bypass rate limiting (an IPv6 entry covers its /64)
    pub allowlist: HashSet<String>,
    /// Maximum requests allowed per client in one window
    pub max_requests: u32,
    /// Window length
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            trust_proxy: false,
            allowlist: HashSet::new(),
            max_requests: DEFAULT_MAX_REQUESTS,
            window: Duration::from_millis(DEFAULT_WINDOW_MS),
        }
    }
}

impl RateLimitConfig {
    /// Creates configuration from environment variables.
    ///
    /// Environment variables:
    /// - `RATE_LIMIT_ENABLED`: Enable/disable rate limiting (default: true)
    /// - `RATE_LIMIT_WINDOW_MS`: Window length in milliseconds (default: 900000)
    /// - `RATE_LIMIT_MAX_REQUESTS`: Requests per IP per window (default: 100)
    /// - `RATE_LIMIT_TRUST_PROXY`: Trust X-Forwarded-For headers (default: false)
    /// - `RATE_LIMIT_ALLOWLIST`: Comma-separated IP allowlist
    ///
    /// Unparseable or zero values fall back to the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("RATE_LIMIT_ENABLED") {
            config.enabled = val.parse().unwrap_or(true);
        }
        if let Ok(val) = std::env::var("RATE_LIMIT_TRUST_PROXY") {
            config.trust_proxy = val.parse().unwrap_or(false);
        }
        if let Ok(val) = std::env::var("RATE_LIMIT_ALLOWLIST") {
            config.allowlist = val
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Some(window_ms) = parse_positive::<u64>("RATE_LIMIT_WINDOW_MS") {
            config.window = Duration::from_millis(window_ms);
        }
        if let Some(max) = parse_positive::<u32>("RATE_LIMIT_MAX_REQUESTS") {
            config.max_requests = max;
        }

        config
    }
}

fn parse_positive<T>(var: &str) -> Option<T>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    std::env::var(var)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .filter(|v| *v > T::default())
}
