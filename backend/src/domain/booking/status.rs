//! Booking status state machine.

use crate::domain::foundation::{StateMachine, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Created, awaiting payment or admin confirmation.
    Pending,

    /// Paid or confirmed by an admin. Technician is scheduled.
    Confirmed,

    /// Cancelled by the customer or an admin.
    Cancelled,

    /// Service was carried out.
    Completed,

    /// Moved to another slot. A new booking carries the new time.
    Rescheduled,

    /// Customer was not home at the appointed time. Read from storage only;
    /// no transition leads here.
    NoShow,
}

impl BookingStatus {
    /// Returns true if a booking in this status holds its slot and counts
    /// towards the daily caps.
    pub fn occupies_slot(&self) -> bool {
        matches!(
            self,
            BookingStatus::Pending
                | BookingStatus::Confirmed
                | BookingStatus::Completed
                | BookingStatus::NoShow
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
            BookingStatus::Rescheduled => "rescheduled",
            BookingStatus::NoShow => "no_show",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            "completed" => Ok(BookingStatus::Completed),
            "rescheduled" => Ok(BookingStatus::Rescheduled),
            "no_show" => Ok(BookingStatus::NoShow),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown booking status '{}'", other),
            )),
        }
    }
}

impl StateMachine for BookingStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use BookingStatus::*;
        matches!(
            (self, target),
            // From PENDING
            (Pending, Confirmed)
                | (Pending, Cancelled)
            // From CONFIRMED
                | (Confirmed, Completed)
                | (Confirmed, Cancelled)
                | (Confirmed, Rescheduled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use BookingStatus::*;
        match self {
            Pending => vec![Confirmed, Cancelled],
            Confirmed => vec![Completed, Cancelled, Rescheduled],
            Cancelled | Completed | Rescheduled | NoShow => vec![],
        }
    }
}
