//! UpdateBookingStatusHandler - Command handler for booking status changes.
//!
//! Customers may only cancel their own bookings. Confirming, completing and
//! marking a no-show are admin operations.

use std::sync::Arc;

use tracing::info;

use super::booking_not_found;
use crate::application::handlers::{ensure_access, ensure_admin};
use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::foundation::{BookingId, CommandMetadata, DomainError};
use crate::ports::BookingRepository;

#[derive(Debug, Clone)]
pub struct UpdateBookingStatusCommand {
    pub booking_id: BookingId,
    pub status: BookingStatus,
    /// Recorded on cancellation, ignored otherwise.
    pub reason: Option<String>,
}

pub struct UpdateBookingStatusHandler {
    bookings: Arc<dyn BookingRepository>,
}

impl UpdateBookingStatusHandler {
    pub fn new(bookings: Arc<dyn BookingRepository>) -> Self {
        Self { bookings }
    }

    pub async fn handle(
        &self,
        cmd: UpdateBookingStatusCommand,
        metadata: CommandMetadata,
    ) -> Result<Booking, DomainError> {
        if cmd.status != BookingStatus::Cancelled {
            ensure_admin(&metadata)?;
        }

        let mut booking = self
            .bookings
            .find_by_id(&cmd.booking_id)
            .await?
            .ok_or_else(|| booking_not_found(&cmd.booking_id))?;
        ensure_access(&booking, &metadata)?;

        let from = booking.status();
        booking.apply_status(cmd.status, cmd.reason)?;
        self.bookings.update(&booking).await?;

        info!(
            booking_id = %booking.id(),
            from = %from,
            to = %booking.status(),
            actor = %metadata.user_id,
            "booking status changed"
        );
        Ok(booking)
    }
}
