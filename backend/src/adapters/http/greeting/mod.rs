//! HTTP adapter for admin holiday greetings.
//!
//! - `GET /api/admin/greetings` - Every scheduled greeting
//! - `POST /api/admin/greetings` - Schedule a broadcast

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::greeting_routes;
