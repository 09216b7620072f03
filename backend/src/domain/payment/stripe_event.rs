//! Stripe webhook event types.
//!
//! Only fields relevant to booking payments are captured.

use serde::{Deserialize, Serialize};

use super::PaymentStatus;

/// Metadata key carrying our payment session id on Stripe objects.
pub const PAYMENT_SESSION_METADATA_KEY: &str = "payment_session_id";

/// Metadata key carrying the booking id on Stripe objects.
pub const BOOKING_METADATA_KEY: &str = "booking_id";

/// Stripe webhook event (simplified).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEvent {
    /// Unique identifier for the event (evt_xxx format).
    pub id: String,

    /// Type of event (e.g., "checkout.session.completed").
    #[serde(rename = "type")]
    pub event_type: String,

    /// Time at which the event was created (Unix timestamp).
    pub created: i64,

    pub data: StripeEventData,

    #[serde(default)]
    pub livemode: bool,

    #[serde(default)]
    pub api_version: Option<String>,
}

/// Container for event-specific data.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEventData {
    /// The object that triggered the event (polymorphic based on event type).
    pub object: serde_json::Value,
}

impl StripeEvent {
    pub fn is_live(&self) -> bool {
        self.livemode
    }

    /// Parse the event type into a known enum variant.
    pub fn parsed_type(&self) -> StripeEventType {
        StripeEventType::parse(&self.event_type)
    }

    /// `id` of the data object (cs_..., pi_..., ch_...).
    pub fn object_id(&self) -> Option<&str> {
        self.data.object.get("id")?.as_str()
    }

    /// A string value from the data object's `metadata`.
    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.data.object.get("metadata")?.get(key)?.as_str()
    }
}

/// Stripe event types that affect payment sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripeEventType {
    CheckoutSessionCompleted,
    CheckoutSessionExpired,
    PaymentIntentFailed,
    ChargeRefunded,
    /// Unknown or unhandled event type.
    Unknown,
}

impl StripeEventType {
    pub fn parse(s: &str) -> Self {
        match s {
            "checkout.session.completed" => Self::CheckoutSessionCompleted,
            "checkout.session.expired" => Self::CheckoutSessionExpired,
            "payment_intent.payment_failed" => Self::PaymentIntentFailed,
            "charge.refunded" => Self::ChargeRefunded,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CheckoutSessionCompleted => "checkout.session.completed",
            Self::CheckoutSessionExpired => "checkout.session.expired",
            Self::PaymentIntentFailed => "payment_intent.payment_failed",
            Self::ChargeRefunded => "charge.refunded",
            Self::Unknown => "unknown",
        }
    }

    /// Payment status this event moves a session to.
    pub fn target_status(&self) -> Option<PaymentStatus> {
        match self {
            Self::CheckoutSessionCompleted => Some(PaymentStatus::Completed),
            Self::CheckoutSessionExpired => Some(PaymentStatus::Expired),
            Self::PaymentIntentFailed => Some(PaymentStatus::Failed),
            Self::ChargeRefunded => Some(PaymentStatus::Refunded),
            Self::Unknown => None,
        }
    }

    /// Whether the data object is the checkout session itself.
    pub fn is_checkout_session(&self) -> bool {
        matches!(self, Self::CheckoutSessionCompleted | Self::CheckoutSessionExpired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(event_type: &str, object: serde_json::Value) -> StripeEvent {
        serde_json::from_value(serde_json::json!({
            "id": "evt_1",
            "type": event_type,
            "created": 1_760_000_000,
            "data": { "object": object },
        }))
        .unwrap()
    }

    #[test]
    fn parses_minimal_event() {
        let e = event("checkout.session.completed", serde_json::json!({"id": "cs_1"}));
        assert_eq!(e.parsed_type(), StripeEventType::CheckoutSessionCompleted);
        assert_eq!(e.object_id(), Some("cs_1"));
        assert!(!e.is_live());
        assert!(e.api_version.is_none());
    }

    #[test]
    fn reads_metadata() {
        let e = event(
            "charge.refunded",
            serde_json::json!({"id": "ch_1", "metadata": {"payment_session_id": "abc"}}),
        );
        assert_eq!(e.metadata(PAYMENT_SESSION_METADATA_KEY), Some("abc"));
        assert_eq!(e.metadata(BOOKING_METADATA_KEY), None);
    }

    #[test]
    fn event_types_map_to_statuses() {
        assert_eq!(
            StripeEventType::parse("payment_intent.payment_failed").target_status(),
            Some(PaymentStatus::Failed)
        );
        assert_eq!(StripeEventType::parse("customer.created"), StripeEventType::Unknown);
        assert!(StripeEventType::Unknown.target_status().is_none());
        assert!(StripeEventType::CheckoutSessionExpired.is_checkout_session());
        assert!(!StripeEventType::ChargeRefunded.is_checkout_session());
    }
}
