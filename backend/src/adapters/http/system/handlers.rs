//! HTTP handlers for public endpoints.

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::dto::{GeocodeParams, HealthResponse, ServiceResponse};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::ApiQuery;
use crate::adapters::http::AppState;
use crate::application::handlers::geocoding::GeocodePostalCodeQuery;

/// GET /api/health
///
/// 503 when the database is configured but unreachable.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let database = match &state.db {
        None => "memory",
        Some(pool) => match sqlx::query("SELECT 1").fetch_one(pool).await {
            Ok(_) => "ok",
            Err(err) => {
                tracing::warn!(error = %err, "health check: database unreachable");
                "unreachable"
            }
        },
    };
    let (status, label) = if database == "unreachable" {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    } else {
        (StatusCode::OK, "ok")
    };
    (
        status,
        Json(HealthResponse {
            status: label,
            version: env!("CARGO_PKG_VERSION"),
            database,
        }),
    )
}

/// GET /api/services
pub async fn list_services(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let services = state.list_services_handler().handle().await?;
    Ok(Json(services.into_iter().map(ServiceResponse::from).collect::<Vec<_>>()))
}

/// GET /api/geocode?postal_code=
pub async fn geocode(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<GeocodeParams>,
) -> Result<impl IntoResponse, ApiError> {
    let response = state
        .geocode_handler()
        .handle(GeocodePostalCodeQuery {
            postal_code: params.postal_code,
        })
        .await?;
    Ok(Json(response))
}
