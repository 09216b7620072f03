//! Axum router for public endpoints.

use axum::{routing::get, Router};

use super::handlers::{geocode, health, list_services};
use crate::adapters::http::AppState;

/// Mounted at `/api`.
pub fn system_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/services", get(list_services))
        .route("/geocode", get(geocode))
}
