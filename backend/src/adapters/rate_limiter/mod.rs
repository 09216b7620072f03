//! Rate limiter adapters.
//!
//! ## Usage
//!
//! ```ignore
//! use iaircon::adapters::rate_limiter::{InMemoryRateLimiter, RateLimitConfig};
//!
//! let limiter = InMemoryRateLimiter::new(RateLimitConfig::default());
//! ```

mod config;
mod in_memory;

pub use config::RateLimitConfig;
pub use in_memory::InMemoryRateLimiter;
