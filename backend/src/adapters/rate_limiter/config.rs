//! Rate limit configuration types.

use serde::{Deserialize, Serialize};

use crate::ports::RateLimitScope;

/// Limits per scope over a fixed window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Whether requests are throttled at all.
    pub enabled: bool,
    /// Requests per window for anonymous callers, keyed by IP.
    pub per_ip: u32,
    /// Requests per window for authenticated callers.
    pub per_user: u32,
    /// Window duration in seconds.
    pub window_secs: u32,
}

impl RateLimitConfig {
    /// Limit for the given scope.
    pub fn limit_for(&self, scope: RateLimitScope) -> u32 {
        match scope {
            RateLimitScope::Ip => self.per_ip,
            RateLimitScope::User => self.per_user,
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            per_ip: 60,
            per_user: 120,
            window_secs: 60,
        }
    }
}
