//! Public endpoints that need no signed-in user.
//!
//! - `GET /api/health` - Liveness plus database reachability
//! - `GET /api/services` - Active service catalog
//! - `GET /api/geocode?postal_code=` - Postal code lookup

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::system_routes;
