//! Command infrastructure for application handlers.
//!
//! `CommandMetadata` carries the acting user and the request correlation ID
//! through command processing so that logs emitted by handlers can be tied
//! back to the HTTP request that caused them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AuthenticatedUser, UserId, UserRole};

/// Metadata context for command handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// The user executing this command.
    pub user_id: UserId,

    /// Role of the acting user at the time of the request.
    pub role: UserRole,

    /// Links related operations across a single user request.
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,

    /// Source of this command (e.g., "api", "webhook", "scheduler").
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl CommandMetadata {
    /// Creates new command metadata for a customer.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            role: UserRole::Customer,
            correlation_id: None,
            source: None,
        }
    }

    /// Creates metadata for an authenticated HTTP caller.
    pub fn for_user(user: &AuthenticatedUser) -> Self {
        Self {
            user_id: user.id.clone(),
            role: user.role,
            correlation_id: None,
            source: Some("api".to_string()),
        }
    }

    /// Builder: Add correlation ID for request tracing.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Builder: Add source identifier.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns true when the acting user is an administrator.
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Returns the correlation ID, generating one if not set.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    /// Returns the source if set.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_defaults_to_customer_without_correlation() {
        let metadata = CommandMetadata::new(UserId::new("user-123").unwrap());
        assert!(!metadata.is_admin());
        assert!(metadata.correlation_id.is_none());
        assert!(metadata.source().is_none());
    }

    #[test]
    fn for_user_copies_role() {
        let user = AuthenticatedUser::new(UserId::new("ops").unwrap(), "ops@iaircon.sg", UserRole::Admin);
        let metadata = CommandMetadata::for_user(&user).with_correlation_id("req-1");
        assert!(metadata.is_admin());
        assert_eq!(metadata.correlation_id(), "req-1");
        assert_eq!(metadata.source(), Some("api"));
    }

    #[test]
    fn correlation_id_generated_when_missing() {
        let metadata = CommandMetadata::new(UserId::new("user").unwrap());
        assert!(!metadata.correlation_id().is_empty());
    }
}
