//! HTTP handlers for booking endpoints.

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::dto::{
    parse_time, AvailableSlotsResponse, BookingResponse, CreateBookingRequest, GetBookingParams,
    ListBookingsParams, RescheduleRequest, SlotsParams, UpdateStatusRequest,
};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::{ApiJson, ApiPath, ApiQuery};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::AppState;
use crate::application::handlers::booking::{
    CreateBookingCommand, GetAvailableSlotsQuery, GetBookingQuery, ListCustomerBookingsQuery,
    RescheduleBookingCommand, UpdateBookingStatusCommand,
};
use crate::domain::foundation::{BookingId, UserId};

/// GET /api/bookings
pub async fn list_bookings(
    State(state): State<AppState>,
    auth: RequireAuth,
    ApiQuery(params): ApiQuery<ListBookingsParams>,
) -> Result<impl IntoResponse, ApiError> {
    let query = ListCustomerBookingsQuery {
        customer_id: auth.0.id.clone(),
        status: params.status,
    };
    let bookings = state.list_bookings_handler().handle(query).await?;
    Ok(Json(bookings.into_iter().map(BookingResponse::from).collect::<Vec<_>>()))
}

/// POST /api/bookings
pub async fn create_booking(
    State(state): State<AppState>,
    auth: RequireAuth,
    ApiJson(request): ApiJson<CreateBookingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CreateBookingCommand {
        service_id: request.service_id,
        address_id: request.address_id,
        date: request.date,
        start_time: parse_time("start_time", &request.start_time)?,
        notes: request.notes,
    };
    let booking = state.create_booking_handler().handle(cmd, auth.metadata()).await?;
    Ok((StatusCode::CREATED, Json(BookingResponse::from(booking))))
}

/// GET /api/bookings/slots
pub async fn available_slots(
    State(state): State<AppState>,
    _auth: RequireAuth,
    ApiQuery(params): ApiQuery<SlotsParams>,
) -> Result<impl IntoResponse, ApiError> {
    let query = GetAvailableSlotsQuery {
        date: params.date,
        service_id: params.service_id,
        location: params.address.or(params.postal_code),
    };
    let available = state.available_slots_handler().handle(query).await?;
    Ok(Json(AvailableSlotsResponse::from(available)))
}

/// GET /api/bookings/:id
pub async fn get_booking(
    State(state): State<AppState>,
    auth: RequireAuth,
    ApiPath(booking_id): ApiPath<BookingId>,
    ApiQuery(params): ApiQuery<GetBookingParams>,
) -> Result<impl IntoResponse, ApiError> {
    let customer_id = params
        .customer_id
        .map(|raw| UserId::new(raw).map_err(|e| ApiError::bad_request("customer_id", e.to_string())))
        .transpose()?;
    let query = GetBookingQuery {
        booking_id,
        customer_id,
    };
    let booking = state.get_booking_handler().handle(query, &auth.metadata()).await?;
    Ok(Json(BookingResponse::from(booking)))
}

/// PATCH /api/bookings/:id/status
pub async fn update_booking_status(
    State(state): State<AppState>,
    auth: RequireAuth,
    ApiPath(booking_id): ApiPath<BookingId>,
    ApiJson(request): ApiJson<UpdateStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = UpdateBookingStatusCommand {
        booking_id,
        status: request.status,
        reason: request.reason,
    };
    let booking = state.update_booking_status_handler().handle(cmd, auth.metadata()).await?;
    Ok(Json(BookingResponse::from(booking)))
}

/// POST /api/bookings/:id/reschedule
///
/// Responds with the new booking; the original is kept as `rescheduled`.
pub async fn reschedule_booking(
    State(state): State<AppState>,
    auth: RequireAuth,
    ApiPath(booking_id): ApiPath<BookingId>,
    ApiJson(request): ApiJson<RescheduleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = RescheduleBookingCommand {
        booking_id,
        date: request.date,
        start_time: parse_time("start_time", &request.start_time)?,
    };
    let booking = state.reschedule_booking_handler().handle(cmd, auth.metadata()).await?;
    Ok((StatusCode::CREATED, Json(BookingResponse::from(booking))))
}
