//! HTTP adapter for the caller's own profile.
//!
//! - `GET /api/profile`
//! - `PUT /api/profile` - Create or replace

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::profile_routes;
