//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, the state machine trait, ownership
//! checks and error types used by every other domain module.

mod auth;
mod command;
mod errors;
mod ids;
mod ownership;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser, UserRole};
pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AddressId, BookingId, GreetingId, PaymentSessionId, ServiceId, UserId};
pub use ownership::OwnedByUser;
pub use state_machine::StateMachine;
pub use timestamp::{Timestamp, SGT_OFFSET_SECS};
