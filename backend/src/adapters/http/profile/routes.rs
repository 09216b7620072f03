//! Axum router for profile endpoints.

use axum::{routing::get, Router};

use super::handlers::{get_profile, upsert_profile};
use crate::adapters::http::AppState;

/// Mounted at `/api/profile`.
pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/", get(get_profile).put(upsert_profile))
}
