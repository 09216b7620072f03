//! Axum router for payment endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{create_payment_session, get_payment_session, handle_webhook};
use crate::adapters::http::AppState;

/// Mounted at `/api/payments`.
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/sessions", post(create_payment_session))
        .route("/sessions/:id", get(get_payment_session))
        .route("/webhook", post(handle_webhook))
}
