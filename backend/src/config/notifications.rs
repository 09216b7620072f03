//! Background notification settings.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    /// Run the holiday greeting dispatcher
    #[serde(default = "default_enabled")]
    pub greetings_enabled: bool,

    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

impl NotificationConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.poll_interval_secs == 0 {
            return Err(ValidationError::InvalidValue {
                field: "notifications.poll_interval_secs",
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            greetings_enabled: default_enabled(),
            poll_interval_secs: default_poll_interval(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_poll_interval() -> u64 {
    60
}
