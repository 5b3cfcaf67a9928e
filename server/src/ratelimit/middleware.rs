//! Axum middleware for rate limiting.

use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use std::net::SocketAddr;
use tracing::debug;

use crate::api::AppState;
use crate::ratelimit::{extract_client_ip, normalize_ip, RateLimitError};

/// Middleware to rate limit requests by client IP address.
///
/// # Behavior
///
/// - If rate limiter is not configured (`state.rate_limiter` is `None`), requests pass through.
/// - If the limit is exceeded, returns `429 Too Many Requests` with `Retry-After`.
/// - Otherwise adds `X-RateLimit-Limit` / `X-RateLimit-Remaining` to the response.
#[tracing::instrument(skip(state, request, next))]
pub async fn rate_limit_by_ip(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, RateLimitError> {
    let Some(ref rate_limiter) = state.rate_limiter else {
        return Ok(next.run(request).await);
    };

    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0);
    let client_ip = extract_client_ip(request.headers(), peer, rate_limiter.config().trust_proxy);
    let normalized_ip = normalize_ip(client_ip);

    let result = rate_limiter.check(&normalized_ip);

    if !result.allowed {
        debug!(
            ip = %normalized_ip,
            retry_after = result.retry_after,
            "Rate limit exceeded"
        );
        return Err(RateLimitError::LimitExceeded(result));
    }

    let mut response = next.run(request).await;
    if result.limit > 0 {
        let headers = response.headers_mut();
        headers.insert("X-RateLimit-Limit", HeaderValue::from(result.limit));
        headers.insert("X-RateLimit-Remaining", HeaderValue::from(result.remaining));
    }
    Ok(response)
}
