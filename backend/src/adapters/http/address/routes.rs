//! Axum router for address endpoints.

use axum::{
    routing::{delete, get, put},
    Router,
};

use super::handlers::{create_address, delete_address, list_addresses, set_default_address};
use crate::adapters::http::AppState;

/// Mounted at `/api/addresses`.
pub fn address_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_addresses).post(create_address))
        .route("/:id", delete(delete_address))
        .route("/:id/default", put(set_default_address))
}
