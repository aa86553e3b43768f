//! Sliding-window rate limiter.
//!
//! Two instances run per process: a general limiter over all routes and
//! a stricter one over `/auth/*`. The auth limiter forgives requests
//! that succeed, so only failures burn the small auth budget.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use dashmap::DashMap;

use cakeshop_core::config::rate_limit::RateLimitPolicy;
use cakeshop_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Map size at which a full sweep of drained clients runs. The key
/// space is open-ended (forwarded addresses), so entries must not
/// accumulate forever.
const SWEEP_SIZE: usize = 1024;

/// Per-client sliding window over request timestamps.
#[derive(Debug)]
pub struct RateLimiter {
    window: Duration,
    max_requests: u32,
    hits: DashMap<String, VecDeque<Instant>>,
}

impl RateLimiter {
    pub fn new(policy: &RateLimitPolicy) -> Self {
        Self {
            window: Duration::from_secs(policy.window_seconds),
            max_requests: policy.max_requests,
            hits: DashMap::new(),
        }
    }

    /// Record a hit for `key`. Returns how long the client must wait
    /// when the budget is exhausted.
    ///
    /// The DashMap entry guard makes check-and-record atomic per key.
    pub fn check(&self, key: &str) -> Result<(), Duration> {
        let now = Instant::now();
        self.sweep(now);
        let mut entry = self.hits.entry(key.to_string()).or_default();

        // checked_sub: Instant underflows early in process lifetime.
        if let Some(cutoff) = now.checked_sub(self.window) {
            while entry.front().is_some_and(|&t| t < cutoff) {
                entry.pop_front();
            }
        }

        if entry.len() >= self.max_requests as usize {
            let retry_after = entry
                .front()
                .map(|&oldest| (oldest + self.window).saturating_duration_since(now))
                .unwrap_or(self.window);
            return Err(retry_after);
        }

        entry.push_back(now);
        Ok(())
    }

    /// Remove the most recent hit for `key`. Called when an auth request
    /// succeeds so legitimate traffic does not consume the budget.
    pub fn forgive(&self, key: &str) {
        let drained = match self.hits.get_mut(key) {
            Some(mut entry) => {
                entry.pop_back();
                entry.is_empty()
            }
            None => return,
        };
        // The guard is dropped before removal; remove_if re-checks under
        // the shard lock in case another request just landed.
        if drained {
            self.hits.remove_if(key, |_, hits| hits.is_empty());
        }
    }

    /// Drop clients whose windows have fully drained. Skipped while the
    /// map is small; must run before any entry guard for `key` is taken.
    fn sweep(&self, now: Instant) {
        if self.hits.len() < SWEEP_SIZE {
            return;
        }
        if let Some(cutoff) = now.checked_sub(self.window) {
            self.hits
                .retain(|_, hits| hits.back().is_some_and(|&t| t >= cutoff));
        }
    }

    #[cfg(test)]
    fn tracked_clients(&self) -> usize {
        self.hits.len()
    }
}

/// General limiter over every route.
pub async fn general_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let key = client_key(&request);
    match state.general_limiter.check(&key) {
        Ok(()) => next.run(request).await,
        Err(retry_after) => too_many_requests(retry_after),
    }
}

/// Stricter limiter for `/auth/*`, forgiving successful requests.
pub async fn auth_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let key = client_key(&request);
    if let Err(retry_after) = state.auth_limiter.check(&key) {
        return too_many_requests(retry_after);
    }

    let response = next.run(request).await;
    if response.status().is_success() {
        state.auth_limiter.forgive(&key);
    }
    response
}

fn too_many_requests(retry_after: Duration) -> Response {
    let mut response = ApiError(AppError::rate_limited(
        "Too many requests, please slow down",
    ))
    .into_response();
    if let Ok(value) = retry_after.as_secs().max(1).to_string().parse() {
        response.headers_mut().insert("retry-after", value);
    }
    debug_assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    response
}

/// Rate-limit key: forwarded client IP when present, else the socket
/// peer.
fn client_key(request: &Request) -> String {
    if let Some(forwarded) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
    {
        let forwarded = forwarded.trim();
        if !forwarded.is_empty() {
            return forwarded.to_string();
        }
    }
    request
        .extensions()
        .get::<axum::extract::ConnectInfo<std::net::SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
