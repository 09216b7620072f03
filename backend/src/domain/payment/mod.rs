//! Payment module - checkout session bookkeeping and Stripe webhooks.
//!
//! The provider owns the money movement. This module keeps a local record of
//! each checkout session and applies webhook events to it.

mod session;
mod status;
mod stripe_event;
mod webhook_errors;
mod webhook_verifier;

pub use session::PaymentSession;
pub use status::PaymentStatus;
pub use stripe_event::{
    StripeEvent, StripeEventData, StripeEventType, BOOKING_METADATA_KEY,
    PAYMENT_SESSION_METADATA_KEY,
};
pub use webhook_errors::WebhookError;
pub use webhook_verifier::{
    SignatureHeader, StripeWebhookVerifier, MAX_CLOCK_SKEW_SECS, MAX_EVENT_AGE_SECS,
};
