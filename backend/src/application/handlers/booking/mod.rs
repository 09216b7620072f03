//! Booking command and query handlers.

mod create_booking;
mod get_available_slots;
mod get_booking;
mod list_customer_bookings;
mod reschedule_booking;
mod update_booking_status;

pub use create_booking::{CreateBookingCommand, CreateBookingHandler};
pub use get_available_slots::{AvailableSlots, GetAvailableSlotsHandler, GetAvailableSlotsQuery};
pub use get_booking::{GetBookingHandler, GetBookingQuery};
pub use list_customer_bookings::{ListCustomerBookingsHandler, ListCustomerBookingsQuery};
pub use reschedule_booking::{RescheduleBookingCommand, RescheduleBookingHandler};
pub use update_booking_status::{UpdateBookingStatusCommand, UpdateBookingStatusHandler};

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::booking::Booking;
use crate::domain::catalog::{Service, ServiceCategory};
use crate::domain::foundation::{BookingId, DomainError, ErrorCode, ServiceId};
use crate::domain::scheduling::{OccupiedSlot, SlotGenerator, TimeSlot};
use crate::ports::{BookingRepository, ServiceCatalog};

/// Loads a bookable service. Inactive services are reported as missing.
pub(crate) async fn find_active_service(
    catalog: &dyn ServiceCatalog,
    id: &ServiceId,
) -> Result<Service, DomainError> {
    catalog
        .find_by_id(id)
        .await?
        .filter(Service::is_active)
        .ok_or_else(|| DomainError::new(ErrorCode::ServiceNotFound, format!("Service {} not found", id)))
}

/// Scheduling footprints on `date`, leaving out `excluding`.
pub(crate) async fn occupied_on(
    bookings: &dyn BookingRepository,
    date: NaiveDate,
    excluding: Option<&BookingId>,
) -> Result<Vec<OccupiedSlot>, DomainError> {
    Ok(bookings
        .find_occupying_on(date)
        .await?
        .iter()
        .filter(|booking| Some(booking.id()) != excluding)
        .filter_map(Booking::occupied_slot)
        .collect())
}

/// Validates `slot` again against the bookings a repository sees while it
/// holds the date for writing.
pub(crate) fn slot_still_free(
    generator: &SlotGenerator,
    slot: TimeSlot,
    category: ServiceCategory,
    now: NaiveDateTime,
) -> impl Fn(&[Booking]) -> Result<(), DomainError> + Send + Sync + '_ {
    move |day: &[Booking]| {
        let occupied: Vec<OccupiedSlot> = day.iter().filter_map(Booking::occupied_slot).collect();
        generator
            .validate(slot.date, slot.start, category, &occupied, now)
            .map(|_| ())
            .map_err(DomainError::from)
    }
}

pub(crate) fn booking_not_found(id: &BookingId) -> DomainError {
    DomainError::new(ErrorCode::BookingNotFound, format!("Booking {} not found", id))
}
