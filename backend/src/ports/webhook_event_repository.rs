//! WebhookEventRepository port - tracks processed Stripe webhook events.
//!
//! Stripe may deliver the same event more than once (timeouts, 5xx
//! responses, lost acknowledgements). Recording each event id makes
//! redelivery a no-op.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::foundation::DomainError;

/// Outcome stored for a processed event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    Success,
    Ignored,
}

impl WebhookOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            WebhookOutcome::Success => "success",
            WebhookOutcome::Ignored => "ignored",
        }
    }
}

/// Record of a processed webhook event.
#[derive(Debug, Clone)]
pub struct WebhookEventRecord {
    /// Stripe event ID (evt_xxx format).
    pub event_id: String,

    /// Type of Stripe event (e.g., "checkout.session.completed").
    pub event_type: String,

    pub processed_at: DateTime<Utc>,

    pub outcome: WebhookOutcome,

    /// Why the event was ignored, if it was.
    pub note: Option<String>,
}

impl WebhookEventRecord {
    pub fn success(event_id: impl Into<String>, event_type: impl Into<String>) -> Self {
        Self {
            event_id: event_id.into(),
            event_type: event_type.into(),
            processed_at: Utc::now(),
            outcome: WebhookOutcome::Success,
            note: None,
        }
    }

    pub fn ignored(
        event_id: impl Into<String>,
        event_type: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            event_id: event_id.into(),
            event_type: event_type.into(),
            processed_at: Utc::now(),
            outcome: WebhookOutcome::Ignored,
            note: Some(reason.into()),
        }
    }
}

/// Result of attempting to save a webhook event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveResult {
    /// Record was inserted (first time seeing this event).
    Inserted,
    /// Record already exists (duplicate event).
    AlreadyExists,
}

/// Port for storing processed webhook events.
///
/// Implementations use a unique key on `event_id` so concurrent deliveries
/// of the same event cannot both insert.
#[async_trait]
pub trait WebhookEventRepository: Send + Sync {
    /// Returns true if the event was already processed.
    async fn exists(&self, event_id: &str) -> Result<bool, DomainError>;

    /// Insert with `ON CONFLICT DO NOTHING` semantics.
    async fn save(&self, record: WebhookEventRecord) -> Result<SaveResult, DomainError>;
}

/// Result of webhook processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookResult {
    /// Event was processed successfully.
    Processed,
    /// Event was already processed (idempotent skip).
    AlreadyProcessed,
    /// Event was acknowledged without changes.
    Ignored,
}
