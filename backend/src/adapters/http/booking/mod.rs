//! HTTP adapter for booking endpoints.
//!
//! - `GET /api/bookings` - Caller's bookings, optional `status` filter
//! - `POST /api/bookings` - Create a booking
//! - `GET /api/bookings/slots` - Ranked free slots for a date
//! - `GET /api/bookings/:id` - One booking
//! - `PATCH /api/bookings/:id/status` - Status transition
//! - `POST /api/bookings/:id/reschedule` - Move to a new slot

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::booking_routes;
