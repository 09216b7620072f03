//! RescheduleBookingHandler - Command handler for moving a booking.
//!
//! The original booking is marked `rescheduled` and a confirmed replacement
//! is created on the new slot. Both writes go through
//! `BookingRepository::save_reschedule` as one unit.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use tracing::info;

use super::{booking_not_found, occupied_on, slot_still_free};
use crate::application::handlers::ensure_access;
use crate::domain::booking::Booking;
use crate::domain::foundation::{BookingId, CommandMetadata, DomainError, Timestamp};
use crate::domain::scheduling::SlotGenerator;
use crate::ports::BookingRepository;

#[derive(Debug, Clone)]
pub struct RescheduleBookingCommand {
    pub booking_id: BookingId,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
}

pub struct RescheduleBookingHandler {
    bookings: Arc<dyn BookingRepository>,
    generator: SlotGenerator,
}

impl RescheduleBookingHandler {
    pub fn new(bookings: Arc<dyn BookingRepository>, generator: SlotGenerator) -> Self {
        Self { bookings, generator }
    }

    /// Returns the replacement booking.
    pub async fn handle(
        &self,
        cmd: RescheduleBookingCommand,
        metadata: CommandMetadata,
    ) -> Result<Booking, DomainError> {
        let mut original = self
            .bookings
            .find_by_id(&cmd.booking_id)
            .await?
            .ok_or_else(|| booking_not_found(&cmd.booking_id))?;
        ensure_access(&original, &metadata)?;

        // The booking being moved must not block its own new slot.
        let now = Timestamp::now().to_sg_local();
        let occupied = occupied_on(self.bookings.as_ref(), cmd.date, Some(original.id())).await?;
        let slot = self
            .generator
            .validate(cmd.date, cmd.start_time, original.category(), &occupied, now)?;

        let replacement = original.reschedule_to(slot, self.generator.hours())?;
        let check = slot_still_free(&self.generator, slot, original.category(), now);
        self.bookings.save_reschedule(&original, &replacement, &check).await?;

        info!(
            original_id = %original.id(),
            booking_id = %replacement.id(),
            date = %replacement.date(),
            start = %replacement.start_time(),
            "booking rescheduled"
        );
        Ok(replacement)
    }
}
