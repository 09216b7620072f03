//! HTTP handlers for payment endpoints.

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;

use super::dto::{CreatePaymentSessionRequest, PaymentSessionResponse, WebhookAck};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::{ApiJson, ApiPath};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::AppState;
use crate::application::handlers::payment::{
    CreatePaymentSessionCommand, GetPaymentSessionQuery, HandlePaymentWebhookCommand,
};
use crate::domain::foundation::PaymentSessionId;
use crate::domain::payment::WebhookError;

/// POST /api/payments/sessions
pub async fn create_payment_session(
    State(state): State<AppState>,
    auth: RequireAuth,
    ApiJson(request): ApiJson<CreatePaymentSessionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let customer_email = request
        .customer_email
        .filter(|email| !email.trim().is_empty())
        .unwrap_or_else(|| auth.0.email.clone());
    let cmd = CreatePaymentSessionCommand {
        booking_id: request.booking_id,
        customer_email,
    };
    let session = state
        .create_payment_session_handler()
        .handle(cmd, auth.metadata())
        .await?;
    Ok((StatusCode::CREATED, Json(PaymentSessionResponse::from(session))))
}

/// GET /api/payments/sessions/:id
pub async fn get_payment_session(
    State(state): State<AppState>,
    auth: RequireAuth,
    ApiPath(session_id): ApiPath<PaymentSessionId>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state
        .get_payment_session_handler()
        .handle(GetPaymentSessionQuery { session_id }, &auth.metadata())
        .await?;
    Ok(Json(PaymentSessionResponse::from(session)))
}

/// POST /api/payments/webhook
///
/// Status codes steer provider retries: 2xx acknowledges, 4xx drops,
/// 5xx redelivers later.
pub async fn handle_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let signature = headers
        .get("Stripe-Signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::bad_request("Stripe-Signature", "Missing Stripe-Signature header"))?;

    let cmd = HandlePaymentWebhookCommand {
        payload: body.to_vec(),
        signature: signature.to_string(),
    };
    let result = state.webhook_handler().handle(cmd).await.map_err(webhook_error)?;
    Ok(Json(WebhookAck::from(result)))
}

fn webhook_error(err: WebhookError) -> ApiError {
    let status = err.status_code();
    if status.is_server_error() {
        tracing::error!(error = %err, retryable = err.is_retryable(), "webhook processing failed");
    } else {
        tracing::warn!(error = %err, "webhook rejected");
    }
    ApiError::new(status, "WEBHOOK_ERROR", err.to_string())
}
