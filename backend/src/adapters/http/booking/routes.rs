//! Axum router for booking endpoints.

use axum::{
    routing::{get, patch, post},
    Router,
};

use super::handlers::{
    available_slots, create_booking, get_booking, list_bookings, reschedule_booking,
    update_booking_status,
};
use crate::adapters::http::AppState;

/// Mounted at `/api/bookings`.
pub fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_bookings).post(create_booking))
        .route("/slots", get(available_slots))
        .route("/:id", get(get_booking))
        .route("/:id/status", patch(update_booking_status))
        .route("/:id/reschedule", post(reschedule_booking))
}
