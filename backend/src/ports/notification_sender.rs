//! Notification sender port - outbound customer messages.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::domain::foundation::UserId;
use crate::domain::profile::ContactChannel;

/// A rendered message for one recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    pub recipient: UserId,
    pub channel: ContactChannel,
    /// Phone number or email address, depending on `channel`.
    pub destination: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotificationError {
    #[error("delivery failed: {0}")]
    DeliveryFailed(String),

    #[error("recipient has no {0} destination")]
    NoDestination(ContactChannel),
}

#[async_trait]
pub trait NotificationSender: Send + Sync {
    async fn send(&self, message: &OutboundMessage) -> Result<(), NotificationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_destination_names_channel() {
        let err = NotificationError::NoDestination(ContactChannel::Sms);
        assert_eq!(err.to_string(), "recipient has no sms destination");
    }

    #[test]
    fn notification_sender_is_object_safe() {
        fn _accepts_dyn(_sender: &dyn NotificationSender) {}
    }
}
