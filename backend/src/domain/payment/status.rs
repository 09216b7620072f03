//! Payment session status state machine.

use crate::domain::foundation::{StateMachine, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Checkout session lifecycle, mirrored from provider webhooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Checkout created, customer has not paid yet.
    Pending,

    /// Payment captured.
    Completed,

    /// Payment attempt declined.
    Failed,

    /// Checkout link expired unpaid.
    Expired,

    /// Captured payment was returned to the customer.
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Expired => "expired",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "completed" => Ok(PaymentStatus::Completed),
            "failed" => Ok(PaymentStatus::Failed),
            "expired" => Ok(PaymentStatus::Expired),
            "refunded" => Ok(PaymentStatus::Refunded),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown payment status '{}'", other),
            )),
        }
    }
}

impl StateMachine for PaymentStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use PaymentStatus::*;
        matches!(
            (self, target),
            (Pending, Completed) | (Pending, Failed) | (Pending, Expired) | (Completed, Refunded)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use PaymentStatus::*;
        match self {
            Pending => vec![Completed, Failed, Expired],
            Completed => vec![Refunded],
            Failed | Expired | Refunded => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_settles_three_ways() {
        let status = PaymentStatus::Pending;
        assert!(status.can_transition_to(&PaymentStatus::Completed));
        assert!(status.can_transition_to(&PaymentStatus::Failed));
        assert!(status.can_transition_to(&PaymentStatus::Expired));
        assert!(!status.can_transition_to(&PaymentStatus::Refunded));
    }

    #[test]
    fn only_completed_can_be_refunded() {
        assert_eq!(
            PaymentStatus::Completed.transition_to(PaymentStatus::Refunded),
            Ok(PaymentStatus::Refunded)
        );
        assert!(PaymentStatus::Failed.transition_to(PaymentStatus::Refunded).is_err());
    }

    #[test]
    fn terminal_states() {
        assert!(PaymentStatus::Refunded.is_terminal());
        assert!(PaymentStatus::Expired.is_terminal());
        assert!(PaymentStatus::Failed.is_terminal());
        assert!(!PaymentStatus::Completed.is_terminal());
    }
}
