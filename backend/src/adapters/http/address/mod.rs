//! HTTP adapter for the caller's saved addresses.
//!
//! - `GET /api/addresses` - Default first, then oldest
//! - `POST /api/addresses` - Add an address
//! - `PUT /api/addresses/:id/default` - Make it the default
//! - `DELETE /api/addresses/:id` - Remove it

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::address_routes;
