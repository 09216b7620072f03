//! Payment provider port for hosted checkout.
//!
//! The provider hosts the payment page and reports the outcome through
//! webhooks. This port only creates checkout sessions.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{BookingId, DomainError, ErrorCode, PaymentSessionId};

/// Port for payment provider integrations.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a hosted checkout session for one booking.
    ///
    /// Returns the provider session id and the URL to redirect the customer to.
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError>;
}

/// Request to create a checkout session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCheckoutRequest {
    /// Our session id, attached to the provider objects as metadata.
    pub payment_session_id: PaymentSessionId,

    pub booking_id: BookingId,

    pub customer_email: String,

    /// Line item description shown on the payment page.
    pub description: String,

    pub amount_cents: i64,

    pub currency: String,

    pub success_url: String,

    pub cancel_url: String,
}

/// Checkout session created by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider's session id (cs_...).
    pub id: String,

    /// Hosted payment page.
    pub url: String,

    /// Unix timestamp after which the session can no longer be paid.
    pub expires_at: i64,
}

/// Error from the payment provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentError {
    pub code: PaymentErrorCode,

    pub message: String,

    /// Whether the operation can be retried.
    pub retryable: bool,
}

impl PaymentError {
    pub fn new(code: PaymentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            retryable: code.is_retryable(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::NetworkError, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::InvalidRequest, message)
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for PaymentError {}

impl From<PaymentError> for DomainError {
    fn from(err: PaymentError) -> Self {
        match err.code {
            PaymentErrorCode::InvalidRequest => DomainError::validation("payment", err.message),
            _ => DomainError::new(ErrorCode::ServiceError, err.to_string()),
        }
    }
}

/// Payment error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentErrorCode {
    /// Network or connectivity error.
    NetworkError,

    /// Invalid API key or authentication failure.
    AuthenticationError,

    /// Request parameters rejected by the provider.
    InvalidRequest,

    /// Provider-side failure.
    ProviderError,
}

impl PaymentErrorCode {
    /// Returns true if this error type is typically retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PaymentErrorCode::NetworkError | PaymentErrorCode::ProviderError)
    }
}
