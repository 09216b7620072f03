//! Axum router for greeting endpoints.

use axum::{routing::get, Router};

use super::handlers::{list_greetings, schedule_greeting};
use crate::adapters::http::AppState;

/// Mounted at `/api/admin/greetings`.
pub fn greeting_routes() -> Router<AppState> {
    Router::new().route("/", get(list_greetings).post(schedule_greeting))
}
