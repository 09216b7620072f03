//! ListCustomerBookingsHandler - Query handler for a customer's bookings.

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::BookingRepository;

#[derive(Debug, Clone)]
pub struct ListCustomerBookingsQuery {
    pub customer_id: UserId,
    /// Only bookings in this status, when set.
    pub status: Option<BookingStatus>,
}

pub struct ListCustomerBookingsHandler {
    bookings: Arc<dyn BookingRepository>,
}

impl ListCustomerBookingsHandler {
    pub fn new(bookings: Arc<dyn BookingRepository>) -> Self {
        Self { bookings }
    }

    pub async fn handle(&self, query: ListCustomerBookingsQuery) -> Result<Vec<Booking>, DomainError> {
        let mut bookings = self.bookings.find_by_customer(&query.customer_id).await?;
        if let Some(status) = query.status {
            bookings.retain(|booking| booking.status() == status);
        }
        Ok(bookings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryBookingRepository;
    use crate::application::handlers::test_support::*;
    use crate::domain::booking::NewBooking;
    use crate::domain::catalog::ServiceCategory;
    use crate::domain::foundation::ServiceId;
    use crate::domain::region::Region;
    use crate::domain::scheduling::{BusinessHours, TimeSlot};
    use chrono::Weekday;

    fn booking(owner: &str, start: u32) -> Booking {
        Booking::new(
            NewBooking {
                customer_id: user(owner),
                service_id: ServiceId::new(),
                category: ServiceCategory::GasTopUp,
                address_id: None,
                region: Region::North,
                slot: TimeSlot::new(upcoming(Weekday::Mon), hm(start, 30), 60),
                notes: None,
            },
            &BusinessHours::standard(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn lists_only_own_bookings_with_optional_status_filter() {
        let repo = Arc::new(InMemoryBookingRepository::new());
        let mut confirmed = booking("cust-1", 9);
        confirmed.confirm().unwrap();
        repo.save(&confirmed).await.unwrap();
        repo.save(&booking("cust-1", 10)).await.unwrap();
        repo.save(&booking("cust-2", 11)).await.unwrap();
        let handler = ListCustomerBookingsHandler::new(repo);

        let all = handler
            .handle(ListCustomerBookingsQuery {
                customer_id: user("cust-1"),
                status: None,
            })
            .await
            .unwrap();
        assert_eq!(all.len(), 2);

        let only_confirmed = handler
            .handle(ListCustomerBookingsQuery {
                customer_id: user("cust-1"),
                status: Some(BookingStatus::Confirmed),
            })
            .await
            .unwrap();
        assert_eq!(only_confirmed.len(), 1);
        assert_eq!(only_confirmed[0].id(), confirmed.id());
    }
}
