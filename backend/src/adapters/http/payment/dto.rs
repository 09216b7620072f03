//! Request and response bodies for payment endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{BookingId, PaymentSessionId, Timestamp};
use crate::domain::payment::{PaymentSession, PaymentStatus};
use crate::ports::WebhookResult;

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePaymentSessionRequest {
    pub booking_id: BookingId,
    /// Defaults to the signed-in user's email.
    #[serde(default)]
    pub customer_email: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentSessionResponse {
    pub id: PaymentSessionId,
    pub booking_id: BookingId,
    pub status: PaymentStatus,
    pub checkout_url: Option<String>,
    pub amount_cents: i64,
    pub currency: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<PaymentSession> for PaymentSessionResponse {
    fn from(session: PaymentSession) -> Self {
        Self {
            id: *session.id(),
            booking_id: *session.booking_id(),
            status: session.status(),
            checkout_url: session.checkout_url().map(str::to_string),
            amount_cents: session.amount_cents(),
            currency: session.currency().to_string(),
            created_at: *session.created_at(),
            updated_at: *session.updated_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WebhookAck {
    pub received: bool,
    pub result: &'static str,
}

impl From<WebhookResult> for WebhookAck {
    fn from(result: WebhookResult) -> Self {
        let result = match result {
            WebhookResult::Processed => "processed",
            WebhookResult::AlreadyProcessed => "already_processed",
            WebhookResult::Ignored => "ignored",
        };
        Self {
            received: true,
            result,
        }
    }
}
