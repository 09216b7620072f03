//! Booking aggregate entity.
//!
//! A booking reserves one slot for one service at one customer location.
//! Slot availability is checked by the scheduler before a booking is built;
//! the aggregate itself only guards business hours, notes and the status
//! lifecycle.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::BookingStatus;
use crate::domain::catalog::ServiceCategory;
use crate::domain::foundation::{
    AddressId, BookingId, DomainError, ErrorCode, OwnedByUser, PaymentSessionId, ServiceId,
    StateMachine, Timestamp, UserId, ValidationError,
};
use crate::domain::region::Region;
use crate::domain::scheduling::{BusinessHours, OccupiedSlot, TimeSlot};

/// Maximum length for customer notes.
pub const MAX_NOTES_LENGTH: usize = 500;

/// Maximum length for a cancellation reason.
pub const MAX_REASON_LENGTH: usize = 500;

/// Input for [`Booking::new`].
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub customer_id: UserId,
    pub service_id: ServiceId,
    pub category: ServiceCategory,
    pub address_id: Option<AddressId>,
    pub region: Region,
    pub slot: TimeSlot,
    pub notes: Option<String>,
}

/// Booking aggregate.
///
/// # Invariants
///
/// - The slot lies inside business hours for its date
/// - `notes` is at most 500 characters
/// - Status only changes along [`BookingStatus`] transitions
/// - `rescheduled_from` is set only on bookings created by a reschedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    id: BookingId,
    customer_id: UserId,
    service_id: ServiceId,
    category: ServiceCategory,
    address_id: Option<AddressId>,
    region: Region,
    date: NaiveDate,
    start_time: NaiveTime,
    duration_minutes: u32,
    status: BookingStatus,
    payment_session_id: Option<PaymentSessionId>,
    notes: Option<String>,
    cancellation_reason: Option<String>,
    rescheduled_from: Option<BookingId>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Booking {
    /// Create a new pending booking.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the slot is outside business hours or notes are too long
    pub fn new(request: NewBooking, hours: &BusinessHours) -> Result<Self, DomainError> {
        Self::validate_slot(&request.slot, hours)?;
        let notes = Self::validate_notes(request.notes)?;

        let now = Timestamp::now();
        Ok(Self {
            id: BookingId::new(),
            customer_id: request.customer_id,
            service_id: request.service_id,
            category: request.category,
            address_id: request.address_id,
            region: request.region,
            date: request.slot.date,
            start_time: request.slot.start,
            duration_minutes: request.slot.duration_minutes,
            status: BookingStatus::Pending,
            payment_session_id: None,
            notes,
            cancellation_reason: None,
            rescheduled_from: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a booking from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: BookingId,
        customer_id: UserId,
        service_id: ServiceId,
        category: ServiceCategory,
        address_id: Option<AddressId>,
        region: Region,
        slot: TimeSlot,
        status: BookingStatus,
        payment_session_id: Option<PaymentSessionId>,
        notes: Option<String>,
        cancellation_reason: Option<String>,
        rescheduled_from: Option<BookingId>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            customer_id,
            service_id,
            category,
            address_id,
            region,
            date: slot.date,
            start_time: slot.start,
            duration_minutes: slot.duration_minutes,
            status,
            payment_session_id,
            notes,
            cancellation_reason,
            rescheduled_from,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &BookingId {
        &self.id
    }

    pub fn customer_id(&self) -> &UserId {
        &self.customer_id
    }

    pub fn service_id(&self) -> &ServiceId {
        &self.service_id
    }

    pub fn category(&self) -> ServiceCategory {
        self.category
    }

    pub fn address_id(&self) -> Option<&AddressId> {
        self.address_id.as_ref()
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn start_time(&self) -> NaiveTime {
        self.start_time
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn status(&self) -> BookingStatus {
        self.status
    }

    pub fn payment_session_id(&self) -> Option<&PaymentSessionId> {
        self.payment_session_id.as_ref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn cancellation_reason(&self) -> Option<&str> {
        self.cancellation_reason.as_deref()
    }

    pub fn rescheduled_from(&self) -> Option<&BookingId> {
        self.rescheduled_from.as_ref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// The reserved slot.
    pub fn slot(&self) -> TimeSlot {
        TimeSlot::new(self.date, self.start_time, self.duration_minutes)
    }

    /// Appointment start as an absolute instant.
    pub fn starts_at(&self) -> Timestamp {
        Timestamp::from_sg_local(self.date, self.start_time)
    }

    /// Scheduling footprint, or `None` if the booking no longer holds its slot.
    pub fn occupied_slot(&self) -> Option<OccupiedSlot> {
        self.status.occupies_slot().then(|| OccupiedSlot {
            start: self.start_time,
            duration_minutes: self.duration_minutes,
            is_amc: self.category.is_amc(),
            region: self.region,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Pending -> Confirmed (payment received or admin confirmation).
    pub fn confirm(&mut self) -> Result<(), DomainError> {
        self.transition_to(BookingStatus::Confirmed)
    }

    /// Pending/Confirmed -> Cancelled.
    pub fn cancel(&mut self, reason: Option<String>) -> Result<(), DomainError> {
        let reason = match reason.map(|r| r.trim().to_string()).filter(|r| !r.is_empty()) {
            Some(r) if r.chars().count() > MAX_REASON_LENGTH => {
                return Err(ValidationError::out_of_range(
                    "reason",
                    0,
                    MAX_REASON_LENGTH as i64,
                    r.chars().count() as i64,
                )
                .into());
            }
            other => other,
        };
        self.transition_to(BookingStatus::Cancelled)?;
        self.cancellation_reason = reason;
        Ok(())
    }

    /// Confirmed -> Completed.
    pub fn complete(&mut self) -> Result<(), DomainError> {
        self.transition_to(BookingStatus::Completed)
    }

    /// Marks this booking `Rescheduled` and returns its confirmed replacement.
    ///
    /// The caller is responsible for checking that `slot` is free.
    pub fn reschedule_to(&mut self, slot: TimeSlot, hours: &BusinessHours) -> Result<Booking, DomainError> {
        Self::validate_slot(&slot, hours)?;
        if slot == self.slot() {
            return Err(DomainError::validation(
                "start_time",
                "New slot must differ from the current one",
            ));
        }
        self.transition_to(BookingStatus::Rescheduled)?;

        let now = Timestamp::now();
        Ok(Booking {
            id: BookingId::new(),
            customer_id: self.customer_id.clone(),
            service_id: self.service_id,
            category: self.category,
            address_id: self.address_id,
            region: self.region,
            date: slot.date,
            start_time: slot.start,
            duration_minutes: slot.duration_minutes,
            status: BookingStatus::Confirmed,
            payment_session_id: self.payment_session_id,
            notes: self.notes.clone(),
            cancellation_reason: None,
            rescheduled_from: Some(self.id),
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies an admin or customer status request.
    ///
    /// `Rescheduled` needs a new slot and goes through [`Booking::reschedule_to`].
    pub fn apply_status(&mut self, target: BookingStatus, reason: Option<String>) -> Result<(), DomainError> {
        match target {
            BookingStatus::Confirmed => self.confirm(),
            BookingStatus::Cancelled => self.cancel(reason),
            BookingStatus::Completed => self.complete(),
            BookingStatus::Rescheduled => Err(DomainError::validation(
                "status",
                "Use the reschedule endpoint to move a booking",
            )),
            BookingStatus::Pending | BookingStatus::NoShow => Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot transition booking from {} to {}", self.status, target),
            )),
        }
    }

    /// Links the checkout session created for this booking.
    pub fn attach_payment_session(&mut self, session_id: PaymentSessionId) {
        self.payment_session_id = Some(session_id);
        self.updated_at = Timestamp::now();
    }

    fn transition_to(&mut self, target: BookingStatus) -> Result<(), DomainError> {
        self.status = self.status.transition_to(target).map_err(|_| {
            DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot transition booking from {} to {}", self.status, target),
            )
            .with_detail("from", self.status.as_str())
            .with_detail("to", target.as_str())
        })?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    fn validate_slot(slot: &TimeSlot, hours: &BusinessHours) -> Result<(), DomainError> {
        if !hours.contains(slot.date, slot.start, slot.duration_minutes) {
            return Err(DomainError::validation(
                "start_time",
                format!(
                    "{} {} is outside business hours",
                    slot.date,
                    slot.start.format("%H:%M")
                ),
            ));
        }
        Ok(())
    }

    fn validate_notes(notes: Option<String>) -> Result<Option<String>, DomainError> {
        let notes = notes.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
        if let Some(n) = &notes {
            let len = n.chars().count();
            if len > MAX_NOTES_LENGTH {
                return Err(
                    ValidationError::out_of_range("notes", 0, MAX_NOTES_LENGTH as i64, len as i64).into(),
                );
            }
        }
        Ok(notes)
    }
}

impl OwnedByUser for Booking {
    fn owner_id(&self) -> &UserId {
        &self.customer_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn request(start: NaiveTime, category: ServiceCategory) -> NewBooking {
        NewBooking {
            customer_id: UserId::new("customer-1").unwrap(),
            service_id: ServiceId::new(),
            category,
            address_id: None,
            region: Region::East,
            slot: TimeSlot::new(monday(), start, category.slot_interval_minutes()),
            notes: Some("  Gate code 1234  ".to_string()),
        }
    }

    fn pending() -> Booking {
        Booking::new(request(at(9, 30), ServiceCategory::GeneralServicing), &BusinessHours::standard()).unwrap()
    }

    fn confirmed() -> Booking {
        let mut booking = pending();
        booking.confirm().unwrap();
        booking
    }

    #[test]
    fn new_booking_is_pending_with_trimmed_notes() {
        let booking = pending();
        assert_eq!(booking.status(), BookingStatus::Pending);
        assert_eq!(booking.notes(), Some("Gate code 1234"));
        assert_eq!(booking.duration_minutes(), 60);
        assert!(booking.rescheduled_from().is_none());
    }

    #[test]
    fn rejects_slot_after_closing() {
        let err = Booking::new(request(at(16, 30), ServiceCategory::Repair), &BusinessHours::standard())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.details.get("field").map(String::as_str), Some("start_time"));
    }

    #[test]
    fn rejects_overlong_notes() {
        let mut req = request(at(9, 30), ServiceCategory::Repair);
        req.notes = Some("x".repeat(MAX_NOTES_LENGTH + 1));
        assert!(Booking::new(req, &BusinessHours::standard()).is_err());
    }

    #[test]
    fn pending_cannot_complete() {
        let mut booking = pending();
        let err = booking.complete().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
        assert_eq!(booking.status(), BookingStatus::Pending);
    }

    #[test]
    fn confirmed_booking_completes() {
        let mut booking = confirmed();
        booking.complete().unwrap();
        assert_eq!(booking.status(), BookingStatus::Completed);
        assert!(booking.cancel(None).is_err());
    }

    #[test]
    fn cancel_records_reason() {
        let mut booking = pending();
        booking.cancel(Some("Travelling".to_string())).unwrap();
        assert_eq!(booking.status(), BookingStatus::Cancelled);
        assert_eq!(booking.cancellation_reason(), Some("Travelling"));
        assert!(booking.occupied_slot().is_none());
    }

    #[test]
    fn reschedule_links_new_booking() {
        let mut original = confirmed();
        let slot = TimeSlot::new(monday(), at(13, 30), 60);
        let replacement = original.reschedule_to(slot, &BusinessHours::standard()).unwrap();

        assert_eq!(original.status(), BookingStatus::Rescheduled);
        assert_eq!(replacement.status(), BookingStatus::Confirmed);
        assert_eq!(replacement.rescheduled_from(), Some(original.id()));
        assert_eq!(replacement.start_time(), at(13, 30));
        assert_eq!(replacement.customer_id(), original.customer_id());
    }

    #[test]
    fn pending_booking_cannot_be_rescheduled() {
        let mut booking = pending();
        let slot = TimeSlot::new(monday(), at(13, 30), 60);
        let err = booking.reschedule_to(slot, &BusinessHours::standard()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    }

    #[test]
    fn apply_status_refuses_rescheduled_pending_and_no_show() {
        let mut booking = confirmed();
        assert_eq!(
            booking.apply_status(BookingStatus::Rescheduled, None).unwrap_err().code,
            ErrorCode::ValidationFailed
        );
        assert_eq!(
            booking.apply_status(BookingStatus::Pending, None).unwrap_err().code,
            ErrorCode::InvalidStateTransition
        );
        assert_eq!(
            booking.apply_status(BookingStatus::NoShow, None).unwrap_err().code,
            ErrorCode::InvalidStateTransition
        );
        assert_eq!(booking.status(), BookingStatus::Confirmed);
    }

    #[test]
    fn occupied_slot_reflects_category() {
        let booking = Booking::new(request(at(11, 0), ServiceCategory::Amc), &BusinessHours::standard()).unwrap();
        let occupied = booking.occupied_slot().unwrap();
        assert!(occupied.is_amc);
        assert_eq!(occupied.duration_minutes, 90);
        assert_eq!(occupied.region, Region::East);
    }

    #[test]
    fn ownership_is_by_customer() {
        let booking = pending();
        assert!(booking.check_ownership(&UserId::new("customer-1").unwrap()).is_ok());
        let err = booking.check_ownership(&UserId::new("someone-else").unwrap()).unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }
}
