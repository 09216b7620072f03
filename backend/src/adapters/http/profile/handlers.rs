//! HTTP handlers for profile endpoints.

use axum::extract::{Json, State};
use axum::response::IntoResponse;

use super::dto::{ProfileResponse, UpsertProfileRequest};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::ApiJson;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::AppState;
use crate::application::handlers::profile::{GetProfileQuery, UpsertProfileCommand};

/// GET /api/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth: RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let query = GetProfileQuery {
        user_id: auth.0.id.clone(),
    };
    let profile = state.get_profile_handler().handle(query).await?;
    Ok(Json(ProfileResponse::from(profile)))
}

/// PUT /api/profile
pub async fn upsert_profile(
    State(state): State<AppState>,
    auth: RequireAuth,
    ApiJson(request): ApiJson<UpsertProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = UpsertProfileCommand {
        details: request.into(),
    };
    let profile = state.upsert_profile_handler().handle(cmd, auth.metadata()).await?;
    Ok(Json(ProfileResponse::from(profile)))
}
