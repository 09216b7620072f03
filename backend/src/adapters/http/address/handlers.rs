//! HTTP handlers for address endpoints.

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::dto::{AddressResponse, CreateAddressRequest};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::{ApiJson, ApiPath};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::AppState;
use crate::application::handlers::address::{
    CreateAddressCommand, DeleteAddressCommand, ListAddressesQuery, SetDefaultAddressCommand,
};
use crate::domain::foundation::AddressId;

/// GET /api/addresses
pub async fn list_addresses(
    State(state): State<AppState>,
    auth: RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let query = ListAddressesQuery {
        customer_id: auth.0.id.clone(),
    };
    let addresses = state.list_addresses_handler().handle(query).await?;
    Ok(Json(addresses.into_iter().map(AddressResponse::from).collect::<Vec<_>>()))
}

/// POST /api/addresses
pub async fn create_address(
    State(state): State<AppState>,
    auth: RequireAuth,
    ApiJson(request): ApiJson<CreateAddressRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CreateAddressCommand {
        label: request.label,
        street: request.street,
        unit_number: request.unit_number.filter(|unit| !unit.trim().is_empty()),
        postal_code: request.postal_code,
        make_default: request.make_default,
    };
    let address = state.create_address_handler().handle(cmd, auth.metadata()).await?;
    Ok((StatusCode::CREATED, Json(AddressResponse::from(address))))
}

/// PUT /api/addresses/:id/default
pub async fn set_default_address(
    State(state): State<AppState>,
    auth: RequireAuth,
    ApiPath(address_id): ApiPath<AddressId>,
) -> Result<impl IntoResponse, ApiError> {
    let address = state
        .set_default_address_handler()
        .handle(SetDefaultAddressCommand { address_id }, auth.metadata())
        .await?;
    Ok(Json(AddressResponse::from(address)))
}

/// DELETE /api/addresses/:id
pub async fn delete_address(
    State(state): State<AppState>,
    auth: RequireAuth,
    ApiPath(address_id): ApiPath<AddressId>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .delete_address_handler()
        .handle(DeleteAddressCommand { address_id }, auth.metadata())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
