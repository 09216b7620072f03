//! HandlePaymentWebhookHandler - Command handler for Stripe webhook deliveries.
//!
//! Every delivery is verified, then applied at most once:
//!
//! 1. Event ids already recorded are acknowledged without changes.
//! 2. Unknown event types are recorded as ignored.
//! 3. The payment session moves to the event's target status. A session that
//!    is already there is left alone.
//! 4. A completed checkout confirms the booking if it is still pending, also
//!    when the session was settled by an earlier delivery that failed later.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::booking::BookingStatus;
use crate::domain::foundation::{DomainError, ErrorCode, PaymentSessionId};
use crate::domain::payment::{
    PaymentSession, PaymentStatus, StripeEvent, StripeWebhookVerifier, WebhookError,
    PAYMENT_SESSION_METADATA_KEY,
};
use crate::ports::{
    BookingRepository, PaymentSessionRepository, SaveResult, WebhookEventRecord,
    WebhookEventRepository, WebhookResult,
};

/// Command to handle a payment webhook.
#[derive(Debug, Clone)]
pub struct HandlePaymentWebhookCommand {
    /// Raw request body, exactly as received.
    pub payload: Vec<u8>,
    /// `Stripe-Signature` header value.
    pub signature: String,
}

pub struct HandlePaymentWebhookHandler {
    verifier: StripeWebhookVerifier,
    sessions: Arc<dyn PaymentSessionRepository>,
    bookings: Arc<dyn BookingRepository>,
    events: Arc<dyn WebhookEventRepository>,
}

impl HandlePaymentWebhookHandler {
    pub fn new(
        verifier: StripeWebhookVerifier,
        sessions: Arc<dyn PaymentSessionRepository>,
        bookings: Arc<dyn BookingRepository>,
        events: Arc<dyn WebhookEventRepository>,
    ) -> Self {
        Self {
            verifier,
            sessions,
            bookings,
            events,
        }
    }

    pub async fn handle(&self, cmd: HandlePaymentWebhookCommand) -> Result<WebhookResult, WebhookError> {
        let event = self.verifier.verify_and_parse(&cmd.payload, &cmd.signature)?;
        self.process(event).await
    }

    /// Applies an already verified event.
    pub async fn process(&self, event: StripeEvent) -> Result<WebhookResult, WebhookError> {
        if self.events.exists(&event.id).await? {
            info!(event_id = %event.id, "webhook event already processed");
            return Ok(WebhookResult::AlreadyProcessed);
        }

        let event_type = event.parsed_type();
        let Some(target) = event_type.target_status() else {
            return self.ignore(&event, "unhandled event type").await;
        };

        let mut session = self.find_session(&event).await?;
        let changed = match session.settle(target) {
            Ok(changed) => changed,
            Err(err) if err.code == ErrorCode::InvalidStateTransition => {
                warn!(
                    event_id = %event.id,
                    payment_session_id = %session.id(),
                    error = %err,
                    "webhook does not apply to current payment status"
                );
                return self.ignore(&event, &err.message).await;
            }
            Err(err) => return Err(err.into()),
        };

        if changed {
            self.sessions.update(&session).await?;
        }
        let confirmed = target == PaymentStatus::Completed && self.confirm_booking(&session).await?;

        let saved = self
            .events
            .save(WebhookEventRecord::success(&event.id, &event.event_type))
            .await?;
        if saved == SaveResult::AlreadyExists {
            return Ok(WebhookResult::AlreadyProcessed);
        }

        info!(
            event_id = %event.id,
            event_type = event_type.as_str(),
            payment_session_id = %session.id(),
            status = %session.status(),
            changed,
            confirmed,
            "webhook event processed"
        );
        Ok(if changed || confirmed {
            WebhookResult::Processed
        } else {
            WebhookResult::AlreadyProcessed
        })
    }

    async fn ignore(&self, event: &StripeEvent, reason: &str) -> Result<WebhookResult, WebhookError> {
        self.events
            .save(WebhookEventRecord::ignored(&event.id, &event.event_type, reason))
            .await?;
        info!(event_id = %event.id, event_type = %event.event_type, reason, "webhook event ignored");
        Ok(WebhookResult::Ignored)
    }

    /// By our metadata first, then by the checkout session id.
    async fn find_session(&self, event: &StripeEvent) -> Result<PaymentSession, WebhookError> {
        if let Some(raw) = event.metadata(PAYMENT_SESSION_METADATA_KEY) {
            let id: PaymentSessionId = raw
                .parse()
                .map_err(|_| WebhookError::ParseError(format!("invalid {}: {}", PAYMENT_SESSION_METADATA_KEY, raw)))?;
            return self.sessions.find_by_id(&id).await?.ok_or(WebhookError::SessionNotFound);
        }

        if event.parsed_type().is_checkout_session() {
            let provider_id = event.object_id().ok_or(WebhookError::MissingField("data.object.id"))?;
            return self
                .sessions
                .find_by_provider_session_id(provider_id)
                .await?
                .ok_or(WebhookError::SessionNotFound);
        }

        Err(WebhookError::MissingField("data.object.metadata.payment_session_id"))
    }

    /// Returns true if the booking moved to confirmed.
    async fn confirm_booking(&self, session: &PaymentSession) -> Result<bool, DomainError> {
        let Some(mut booking) = self.bookings.find_by_id(session.booking_id()).await? else {
            warn!(booking_id = %session.booking_id(), "paid booking no longer exists");
            return Ok(false);
        };
        match booking.status() {
            BookingStatus::Pending => {}
            BookingStatus::Confirmed => return Ok(false),
            status => {
                warn!(
                    booking_id = %booking.id(),
                    status = %status,
                    "payment completed for a booking that is not pending"
                );
                return Ok(false);
            }
        }
        booking.confirm()?;
        self.bookings.update(&booking).await?;
        info!(booking_id = %booking.id(), "booking confirmed by payment");
        Ok(true)
    }
}
