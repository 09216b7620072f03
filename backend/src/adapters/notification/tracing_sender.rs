//! Notification sender that records messages and logs them.
//!
//! Stands in for the WhatsApp/SMS/email gateways.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{NotificationError, NotificationSender, OutboundMessage};

#[derive(Debug, Clone, Default)]
pub struct TracingNotificationSender {
    sent: Arc<RwLock<Vec<OutboundMessage>>>,
}

impl TracingNotificationSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages delivered so far.
    pub async fn sent(&self) -> Vec<OutboundMessage> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl NotificationSender for TracingNotificationSender {
    async fn send(&self, message: &OutboundMessage) -> Result<(), NotificationError> {
        if message.destination.trim().is_empty() {
            return Err(NotificationError::NoDestination(message.channel));
        }
        tracing::info!(
            recipient = %message.recipient,
            channel = %message.channel,
            chars = message.body.chars().count(),
            "notification sent"
        );
        self.sent.write().await.push(message.clone());
        Ok(())
    }
}
