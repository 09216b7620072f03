//! Booking module - appointments and their lifecycle.

mod aggregate;
mod status;

pub use aggregate::{Booking, NewBooking, MAX_NOTES_LENGTH, MAX_REASON_LENGTH};
pub use status::BookingStatus;
