//! HTTP handlers for greeting endpoints. Admin only.

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::dto::{GreetingResponse, ScheduleGreetingRequest};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::ApiJson;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::AppState;
use crate::application::handlers::notification::ScheduleHolidayGreetingCommand;

/// GET /api/admin/greetings
pub async fn list_greetings(
    State(state): State<AppState>,
    auth: RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let greetings = state.list_greetings_handler().handle(&auth.metadata()).await?;
    Ok(Json(greetings.into_iter().map(GreetingResponse::from).collect::<Vec<_>>()))
}

/// POST /api/admin/greetings
pub async fn schedule_greeting(
    State(state): State<AppState>,
    auth: RequireAuth,
    ApiJson(request): ApiJson<ScheduleGreetingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = ScheduleHolidayGreetingCommand {
        holiday_name: request.holiday_name,
        holiday_date: request.holiday_date,
        send_at: request.send_at,
        template: request.template,
    };
    let greeting = state.schedule_greeting_handler().handle(cmd, auth.metadata()).await?;
    Ok((StatusCode::CREATED, Json(GreetingResponse::from(greeting))))
}
