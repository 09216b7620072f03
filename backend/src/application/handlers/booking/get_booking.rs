//! GetBookingHandler - Query handler for a single booking.

use std::sync::Arc;

use super::booking_not_found;
use crate::application::handlers::ensure_access;
use crate::domain::booking::Booking;
use crate::domain::foundation::{BookingId, CommandMetadata, DomainError, ErrorCode, UserId};
use crate::ports::BookingRepository;

/// Query to get a booking by ID.
#[derive(Debug, Clone)]
pub struct GetBookingQuery {
    pub booking_id: BookingId,
    /// Customer the caller claims to act for. Must be the caller.
    pub customer_id: Option<UserId>,
}

pub struct GetBookingHandler {
    bookings: Arc<dyn BookingRepository>,
}

impl GetBookingHandler {
    pub fn new(bookings: Arc<dyn BookingRepository>) -> Self {
        Self { bookings }
    }

    pub async fn handle(
        &self,
        query: GetBookingQuery,
        metadata: &CommandMetadata,
    ) -> Result<Booking, DomainError> {
        if let Some(claimed) = &query.customer_id {
            if claimed != &metadata.user_id {
                return Err(DomainError::new(
                    ErrorCode::Unauthorized,
                    "customer_id does not match the authenticated user",
                ));
            }
        }

        let booking = self
            .bookings
            .find_by_id(&query.booking_id)
            .await?
            .ok_or_else(|| booking_not_found(&query.booking_id))?;

        ensure_access(&booking, metadata)?;
        Ok(booking)
    }
}
