//! HTTP middleware for axum.
//!
//! - `auth` - Bearer token validation and the `RequireAuth` extractor
//! - `rate_limit` - Per-user and per-IP throttling

pub mod auth;
pub mod rate_limit;

pub use auth::{auth_middleware, AuthState, RequireAuth};
pub use rate_limit::{rate_limit_middleware, RateLimiterState};
