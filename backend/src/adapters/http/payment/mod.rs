//! HTTP adapter for checkout and payment webhooks.
//!
//! - `POST /api/payments/sessions` - Start checkout for a pending booking
//! - `GET /api/payments/sessions/:id` - Poll a session
//! - `POST /api/payments/webhook` - Provider callback, signed, no bearer token

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::payment_routes;
