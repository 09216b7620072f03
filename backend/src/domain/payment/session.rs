//! PaymentSession aggregate - local record of a provider checkout session.

use serde::{Deserialize, Serialize};

use super::PaymentStatus;
use crate::domain::foundation::{
    BookingId, DomainError, ErrorCode, OwnedByUser, PaymentSessionId, StateMachine, Timestamp, UserId,
};

/// Bookkeeping for one checkout attempt against a booking.
///
/// # Invariants
///
/// - `amount_cents` is positive
/// - `currency` is a lower-case three-letter code
/// - Status only changes along [`PaymentStatus`] transitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSession {
    id: PaymentSessionId,
    booking_id: BookingId,
    customer_id: UserId,
    provider_session_id: String,
    checkout_url: Option<String>,
    amount_cents: i64,
    currency: String,
    status: PaymentStatus,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl PaymentSession {
    /// Records a freshly created checkout session.
    pub fn new(
        booking_id: BookingId,
        customer_id: UserId,
        amount_cents: i64,
        currency: impl Into<String>,
        provider_session_id: impl Into<String>,
        checkout_url: Option<String>,
    ) -> Result<Self, DomainError> {
        if amount_cents <= 0 {
            return Err(DomainError::validation("amount_cents", "Amount must be positive"));
        }
        let currency = currency.into().trim().to_lowercase();
        if currency.len() != 3 || !currency.bytes().all(|b| b.is_ascii_lowercase()) {
            return Err(DomainError::validation(
                "currency",
                "Currency must be a three-letter ISO code",
            ));
        }
        let provider_session_id = provider_session_id.into();
        if provider_session_id.trim().is_empty() {
            return Err(DomainError::validation(
                "provider_session_id",
                "Provider session id is required",
            ));
        }

        let now = Timestamp::now();
        Ok(Self {
            id: PaymentSessionId::new(),
            booking_id,
            customer_id,
            provider_session_id,
            checkout_url,
            amount_cents,
            currency,
            status: PaymentStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }

    /// Uses an id allocated before the provider session was created, so the
    /// provider's metadata and our record agree.
    pub fn with_id(mut self, id: PaymentSessionId) -> Self {
        self.id = id;
        self
    }

    /// Reconstitute a session from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: PaymentSessionId,
        booking_id: BookingId,
        customer_id: UserId,
        provider_session_id: String,
        checkout_url: Option<String>,
        amount_cents: i64,
        currency: String,
        status: PaymentStatus,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            booking_id,
            customer_id,
            provider_session_id,
            checkout_url,
            amount_cents,
            currency,
            status,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &PaymentSessionId {
        &self.id
    }

    pub fn booking_id(&self) -> &BookingId {
        &self.booking_id
    }

    pub fn customer_id(&self) -> &UserId {
        &self.customer_id
    }

    pub fn provider_session_id(&self) -> &str {
        &self.provider_session_id
    }

    pub fn checkout_url(&self) -> Option<&str> {
        self.checkout_url.as_deref()
    }

    pub fn amount_cents(&self) -> i64 {
        self.amount_cents
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn complete(&mut self) -> Result<(), DomainError> {
        self.transition_to(PaymentStatus::Completed)
    }

    pub fn fail(&mut self) -> Result<(), DomainError> {
        self.transition_to(PaymentStatus::Failed)
    }

    pub fn expire(&mut self) -> Result<(), DomainError> {
        self.transition_to(PaymentStatus::Expired)
    }

    pub fn refund(&mut self) -> Result<(), DomainError> {
        self.transition_to(PaymentStatus::Refunded)
    }

    /// Moves to `target`. Returns `Ok(false)` when already there, so replayed
    /// webhooks are harmless.
    pub fn settle(&mut self, target: PaymentStatus) -> Result<bool, DomainError> {
        if self.status == target {
            return Ok(false);
        }
        self.transition_to(target)?;
        Ok(true)
    }

    fn transition_to(&mut self, target: PaymentStatus) -> Result<(), DomainError> {
        self.status = self.status.transition_to(target).map_err(|_| {
            DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot transition payment from {} to {}", self.status, target),
            )
        })?;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

impl OwnedByUser for PaymentSession {
    fn owner_id(&self) -> &UserId {
        &self.customer_id
    }
}
