//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Handlers take plain command/query structs plus the caller's
//! `CommandMetadata` and return domain types or `DomainError`.

pub mod handlers;
pub mod retry;

pub use retry::{with_retry, Backoff, RetryPolicy};
