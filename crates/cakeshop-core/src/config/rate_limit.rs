//! Rate-limit configuration.

use serde::{Deserialize, Serialize};

/// Rate-limit settings: a general policy applied to all traffic and a
/// stricter policy applied only to authentication-adjacent routes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Policy for all routes.
    #[serde(default = "RateLimitPolicy::general_default")]
    pub general: RateLimitPolicy,
    /// Stricter policy for `/auth/*` routes. Successful requests are not
    /// counted against this budget.
    #[serde(default = "RateLimitPolicy::auth_default")]
    pub auth: RateLimitPolicy,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            general: RateLimitPolicy::general_default(),
            auth: RateLimitPolicy::auth_default(),
        }
    }
}

/// A single sliding-window policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitPolicy {
    /// Window length in seconds.
    pub window_seconds: u64,
    /// Maximum requests per client within the window.
    pub max_requests: u32,
}

impl RateLimitPolicy {
    fn general_default() -> Self {
        Self {
            window_seconds: 900,
            max_requests: 300,
        }
    }

    fn auth_default() -> Self {
        Self {
            window_seconds: 900,
            max_requests: 20,
        }
    }
}
