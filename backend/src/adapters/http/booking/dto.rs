//! Request and response bodies for booking endpoints.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::adapters::http::error::ApiError;
use crate::application::handlers::booking::AvailableSlots;
use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::catalog::ServiceCategory;
use crate::domain::foundation::{AddressId, BookingId, PaymentSessionId, ServiceId, Timestamp};
use crate::domain::notification::{ReminderKind, ReminderSchedule};
use crate::domain::region::Region;
use crate::domain::scheduling::{DayPeriod, RankedSlot};

/// Accepts `HH:MM` or `HH:MM:SS`.
pub fn parse_time(field: &str, raw: &str) -> Result<NaiveTime, ApiError> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| ApiError::bad_request(field, format!("'{}' is not a time of day (HH:MM)", raw)))
}

fn hhmm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

// ─── Requests ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct CreateBookingRequest {
    pub service_id: ServiceId,
    /// Falls back to the customer's default address.
    #[serde(default)]
    pub address_id: Option<AddressId>,
    pub date: NaiveDate,
    pub start_time: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListBookingsParams {
    #[serde(default)]
    pub status: Option<BookingStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetBookingParams {
    #[serde(default)]
    pub customer_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlotsParams {
    pub date: NaiveDate,
    pub service_id: ServiceId,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: BookingStatus,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RescheduleRequest {
    pub date: NaiveDate,
    pub start_time: String,
}

// ─── Responses ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ReminderResponse {
    pub kind: ReminderKind,
    pub send_at: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingResponse {
    pub id: BookingId,
    pub customer_id: String,
    pub service_id: ServiceId,
    pub category: ServiceCategory,
    pub address_id: Option<AddressId>,
    pub region: Region,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub duration_minutes: u32,
    pub status: BookingStatus,
    pub payment_session_id: Option<PaymentSessionId>,
    pub notes: Option<String>,
    pub cancellation_reason: Option<String>,
    pub rescheduled_from: Option<BookingId>,
    /// Upcoming reminder times; empty once the booking is no longer active.
    pub reminders: Vec<ReminderResponse>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        let slot = booking.slot();
        let reminders = if matches!(booking.status(), BookingStatus::Pending | BookingStatus::Confirmed) {
            ReminderSchedule::for_booking(&booking.starts_at(), &Timestamp::now())
                .reminders
                .into_iter()
                .map(|r| ReminderResponse {
                    kind: r.kind,
                    send_at: r.send_at,
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            id: *booking.id(),
            customer_id: booking.customer_id().to_string(),
            service_id: *booking.service_id(),
            category: booking.category(),
            address_id: booking.address_id().copied(),
            region: booking.region(),
            date: booking.date(),
            start_time: hhmm(slot.start),
            end_time: hhmm(slot.end()),
            duration_minutes: booking.duration_minutes(),
            status: booking.status(),
            payment_session_id: booking.payment_session_id().copied(),
            notes: booking.notes().map(str::to_string),
            cancellation_reason: booking.cancellation_reason().map(str::to_string),
            rescheduled_from: booking.rescheduled_from().copied(),
            reminders,
            created_at: *booking.created_at(),
            updated_at: *booking.updated_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SlotResponse {
    pub start_time: String,
    pub end_time: String,
    pub period: DayPeriod,
    pub near_existing_booking: bool,
}

impl From<RankedSlot> for SlotResponse {
    fn from(ranked: RankedSlot) -> Self {
        Self {
            start_time: hhmm(ranked.slot.start),
            end_time: hhmm(ranked.slot.end()),
            period: ranked.period,
            near_existing_booking: ranked.near_existing_booking,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AvailableSlotsResponse {
    pub date: NaiveDate,
    pub service_id: ServiceId,
    pub region: Region,
    pub remaining_capacity: usize,
    /// Best first.
    pub slots: Vec<SlotResponse>,
}

impl From<AvailableSlots> for AvailableSlotsResponse {
    fn from(available: AvailableSlots) -> Self {
        Self {
            date: available.date,
            service_id: available.service_id,
            region: available.region,
            remaining_capacity: available.remaining_capacity,
            slots: available.slots.into_iter().map(SlotResponse::from).collect(),
        }
    }
}
