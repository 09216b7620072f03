//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Supabase JWT validation
//! - `cache` - moka-backed region classification cache
//! - `geocoding` - Postal code lookup
//! - `http` - axum router, DTOs and middleware
//! - `memory` - In-memory repositories for tests and local runs
//! - `notification` - Message delivery and the greeting dispatcher
//! - `postgres` - sqlx repositories
//! - `rate_limiter` - Fixed-window request throttling
//! - `stripe` - Hosted checkout

pub mod auth;
pub mod cache;
pub mod geocoding;
pub mod http;
pub mod memory;
pub mod notification;
pub mod postgres;
pub mod rate_limiter;
pub mod stripe;
