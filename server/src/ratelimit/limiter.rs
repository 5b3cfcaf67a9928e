//! Core rate limiter service.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::ratelimit::{
    normalize_allowlist_entry, RateLimitConfig, RateLimitResult, PURGE_INTERVAL_SECS,
};

/// Request count for one client in the current window.
#[derive(Debug, Clone, Copy)]
struct Window {
    started_at: Instant,
    count: u32,
}

/// Fixed-window rate limiter keyed by client identifier.
///
/// Cheap to clone; clones share the same counters.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    config: Arc<RateLimitConfig>,
    windows: Arc<DashMap<String, Window>>,
}

impl RateLimiter {
    /// Allowlist entries are normalized like client IPs, so an IPv6 entry
    /// covers its /64.
    pub fn new(mut config: RateLimitConfig) -> Self {
        config.allowlist = config
            .allowlist
            .iter()
            .map(|entry| normalize_allowlist_entry(entry))
            .collect();
        Self {
            config: Arc::new(config),
            windows: Arc::new(DashMap::new()),
        }
    }

    /// Returns the rate limiter configuration.
    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Checks and increments the counter for `identifier`.
    pub fn check(&self, identifier: &str) -> RateLimitResult {
        self.check_at(identifier, Instant::now())
    }

    /// Checks and increments the counter as of `now`.
    pub fn check_at(&self, identifier: &str, now: Instant) -> RateLimitResult {
        if !self.config.enabled {
            return RateLimitResult::bypassed();
        }

        if self.config.allowlist.contains(identifier) {
            debug!(ip = %identifier, "IP in allowlist, bypassing rate limit");
            return RateLimitResult::bypassed();
        }

        let window_len = self.config.window;
        let limit = self.config.max_requests;

        // The entry guard holds the shard lock, so check-and-increment is atomic.
        let mut entry = self
            .windows
            .entry(identifier.to_string())
            .or_insert(Window {
                started_at: now,
                count: 0,
            });

        if now.saturating_duration_since(entry.started_at) >= window_len {
            *entry = Window {
                started_at: now,
                count: 0,
            };
        }

        let reset_in = window_len.saturating_sub(now.saturating_duration_since(entry.started_at));

        if entry.count >= limit {
            return RateLimitResult {
                allowed: false,
                limit,
                remaining: 0,
                retry_after: ceil_secs(reset_in),
            };
        }

        entry.count += 1;
        RateLimitResult {
            allowed: true,
            limit,
            remaining: limit - entry.count,
            retry_after: 0,
        }
    }

    /// Drops windows that have fully elapsed. Returns the number removed.
    pub fn purge_expired(&self, now: Instant) -> usize {
        let window_len = self.config.window;
        let before = self.windows.len();
        self.windows
            .retain(|_, w| now.saturating_duration_since(w.started_at) < window_len);
        before.saturating_sub(self.windows.len())
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.windows.len()
    }

    /// Spawns a background task that periodically purges expired windows.
    pub fn spawn_purge_task(&self) -> JoinHandle<()> {
        let limiter = self.clone();
        info!(
            max_requests = limiter.config.max_requests,
            window_secs = limiter.config.window.as_secs(),
            "Rate limiter purge task started"
        );
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(PURGE_INTERVAL_SECS));
            loop {
                interval.tick().await;
                let removed = limiter.purge_expired(Instant::now());
                if removed > 0 {
                    debug!(removed, "Purged expired rate limit windows");
                }
            }
        })
    }
}

/// Round a duration up to whole seconds, at least 1.
fn ceil_secs(duration: Duration) -> u64 {
    let secs = duration.as_secs() + u64::from(duration.subsec_nanos() > 0);
    secs.max(1)
}
