//! Booking repository port.
//!
//! Defines the contract for persisting and retrieving Booking aggregates.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::booking::Booking;
use crate::domain::foundation::{BookingId, DomainError, UserId};

/// Re-validates a booking against the bookings already holding its date.
pub type SlotCheck<'a> = dyn Fn(&[Booking]) -> Result<(), DomainError> + Send + Sync + 'a;

/// Repository port for Booking aggregate persistence.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Save a new booking.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, booking: &Booking) -> Result<(), DomainError>;

    /// Update an existing booking.
    ///
    /// # Errors
    ///
    /// - `BookingNotFound` if the booking doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, booking: &Booking) -> Result<(), DomainError>;

    /// Save a new booking if `check` accepts the occupying bookings on its
    /// date. Checked writes for the same date never interleave, so two
    /// requests cannot both take the last place of a day.
    ///
    /// # Errors
    ///
    /// - whatever `check` returns, with nothing written
    /// - `DatabaseError` on persistence failure
    async fn save_checked(&self, booking: &Booking, check: &SlotCheck<'_>) -> Result<(), DomainError>;

    /// Persist a reschedule: update the original and insert its replacement
    /// in one unit of work. `check` sees the occupying bookings on the
    /// replacement's date, without the original, under the same guarantee
    /// as [`save_checked`](Self::save_checked).
    async fn save_reschedule(
        &self,
        original: &Booking,
        replacement: &Booking,
        check: &SlotCheck<'_>,
    ) -> Result<(), DomainError>;

    /// Find a booking by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, DomainError>;

    /// All bookings of a customer, newest appointment first.
    async fn find_by_customer(&self, customer_id: &UserId) -> Result<Vec<Booking>, DomainError>;

    /// Bookings on `date` whose status holds the slot.
    async fn find_occupying_on(&self, date: NaiveDate) -> Result<Vec<Booking>, DomainError>;
}
