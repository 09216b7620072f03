//! In-memory rate limiter implementation.
//!
//! Uses a fixed-window counter algorithm with an in-memory HashMap.
//! Counters are per process; each replica enforces its own limit.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::Timestamp;
use crate::ports::{
    RateLimitDenied, RateLimitError, RateLimitKey, RateLimitResult, RateLimitStatus, RateLimiter,
};

use super::config::RateLimitConfig;

/// Fixed-window rate limiter. Each window tracks the count of requests
/// and resets when the window expires.
#[derive(Debug, Clone)]
pub struct InMemoryRateLimiter {
    config: RateLimitConfig,
    windows: Arc<RwLock<HashMap<RateLimitKey, WindowState>>>,
}

/// State for a single rate limit window.
#[derive(Debug, Clone)]
struct WindowState {
    count: u32,
    /// Unix seconds when the current window started.
    window_start: u64,
}

impl InMemoryRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Same as `check` but with an explicit clock, for tests.
    pub async fn check_at(&self, key: RateLimitKey, now: u64) -> RateLimitResult {
        let limit = self.config.limit_for(key.scope);
        let window_secs = u64::from(self.config.window_secs.max(1));

        let mut windows = self.windows.write().await;
        let state = windows.entry(key.clone()).or_insert(WindowState {
            count: 0,
            window_start: now,
        });

        if now >= state.window_start + window_secs {
            state.count = 0;
            state.window_start = now;
        }

        let window_end = state.window_start + window_secs;
        if state.count >= limit {
            let retry_after = window_end.saturating_sub(now) as u32;
            return RateLimitResult::Denied(RateLimitDenied {
                limit,
                retry_after_secs: retry_after.max(1),
                scope: key.scope,
            });
        }

        state.count += 1;
        RateLimitResult::Allowed(RateLimitStatus {
            limit,
            remaining: limit.saturating_sub(state.count),
            reset_at: Timestamp::from_unix_secs(window_end),
        })
    }

    /// Drops windows that ended before `now`.
    pub async fn prune(&self, now: u64) {
        let window_secs = u64::from(self.config.window_secs.max(1));
        self.windows
            .write()
            .await
            .retain(|_, state| state.window_start + window_secs > now);
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check(&self, key: RateLimitKey) -> Result<RateLimitResult, RateLimitError> {
        if !self.config.enabled {
            let limit = self.config.limit_for(key.scope);
            return Ok(RateLimitResult::Allowed(RateLimitStatus {
                limit,
                remaining: limit,
                reset_at: Timestamp::now(),
            }));
        }
        Ok(self.check_at(key, Timestamp::now().as_unix_secs()).await)
    }
}
