//! In-memory booking repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::booking::Booking;
use crate::domain::foundation::{BookingId, DomainError, ErrorCode, UserId};
use crate::ports::{BookingRepository, SlotCheck};

#[derive(Debug, Clone, Default)]
pub struct InMemoryBookingRepository {
    bookings: Arc<RwLock<HashMap<BookingId, Booking>>>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored bookings (useful for tests).
    pub async fn len(&self) -> usize {
        self.bookings.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.bookings.read().await.is_empty()
    }
}

fn occupying_on(bookings: &HashMap<BookingId, Booking>, date: NaiveDate) -> Vec<Booking> {
    let mut found: Vec<Booking> = bookings
        .values()
        .filter(|b| b.date() == date && b.status().occupies_slot())
        .cloned()
        .collect();
    found.sort_by_key(|b| b.start_time());
    found
}

fn already_exists(id: &BookingId) -> DomainError {
    DomainError::new(ErrorCode::AlreadyExists, format!("Booking {} already exists", id))
}

fn not_found(id: &BookingId) -> DomainError {
    DomainError::new(ErrorCode::BookingNotFound, format!("Booking {} not found", id))
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn save(&self, booking: &Booking) -> Result<(), DomainError> {
        let mut bookings = self.bookings.write().await;
        if bookings.contains_key(booking.id()) {
            return Err(already_exists(booking.id()));
        }
        bookings.insert(*booking.id(), booking.clone());
        Ok(())
    }

    async fn save_checked(&self, booking: &Booking, check: &SlotCheck<'_>) -> Result<(), DomainError> {
        // The write lock spans check and insert.
        let mut bookings = self.bookings.write().await;
        if bookings.contains_key(booking.id()) {
            return Err(already_exists(booking.id()));
        }
        check(&occupying_on(&bookings, booking.date()))?;
        bookings.insert(*booking.id(), booking.clone());
        Ok(())
    }

    async fn update(&self, booking: &Booking) -> Result<(), DomainError> {
        let mut bookings = self.bookings.write().await;
        let slot = bookings.get_mut(booking.id()).ok_or_else(|| not_found(booking.id()))?;
        *slot = booking.clone();
        Ok(())
    }

    async fn save_reschedule(
        &self,
        original: &Booking,
        replacement: &Booking,
        check: &SlotCheck<'_>,
    ) -> Result<(), DomainError> {
        // One lock for check and both writes so readers never see half a reschedule.
        let mut bookings = self.bookings.write().await;
        if !bookings.contains_key(original.id()) {
            return Err(not_found(original.id()));
        }
        let others: Vec<Booking> = occupying_on(&bookings, replacement.date())
            .into_iter()
            .filter(|b| b.id() != original.id())
            .collect();
        check(&others)?;
        bookings.insert(*original.id(), original.clone());
        bookings.insert(*replacement.id(), replacement.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, DomainError> {
        Ok(self.bookings.read().await.get(id).cloned())
    }

    async fn find_by_customer(&self, customer_id: &UserId) -> Result<Vec<Booking>, DomainError> {
        let mut found: Vec<Booking> = self
            .bookings
            .read()
            .await
            .values()
            .filter(|b| b.customer_id() == customer_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| (b.date(), b.start_time()).cmp(&(a.date(), a.start_time())));
        Ok(found)
    }

    async fn find_occupying_on(&self, date: NaiveDate) -> Result<Vec<Booking>, DomainError> {
        Ok(occupying_on(&*self.bookings.read().await, date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::NewBooking;
    use crate::domain::catalog::ServiceCategory;
    use crate::domain::foundation::ServiceId;
    use crate::domain::region::Region;
    use crate::domain::scheduling::{BusinessHours, TimeSlot};
    use chrono::NaiveTime;

    fn booking(customer: &str, date: NaiveDate, hour: u32) -> Booking {
        Booking::new(
            NewBooking {
                customer_id: UserId::new(customer).unwrap(),
                service_id: ServiceId::new(),
                category: ServiceCategory::GeneralServicing,
                address_id: None,
                region: Region::East,
                slot: TimeSlot::new(date, NaiveTime::from_hms_opt(hour, 30, 0).unwrap(), 60),
                notes: None,
            },
            &BusinessHours::standard(),
        )
        .unwrap()
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    #[tokio::test]
    async fn save_then_find() {
        let repo = InMemoryBookingRepository::new();
        let b = booking("u1", monday(), 9);
        repo.save(&b).await.unwrap();
        assert_eq!(repo.find_by_id(b.id()).await.unwrap(), Some(b));
    }

    #[tokio::test]
    async fn duplicate_save_is_rejected() {
        let repo = InMemoryBookingRepository::new();
        let b = booking("u1", monday(), 9);
        repo.save(&b).await.unwrap();
        assert_eq!(repo.save(&b).await.unwrap_err().code, ErrorCode::AlreadyExists);
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let repo = InMemoryBookingRepository::new();
        let b = booking("u1", monday(), 9);
        assert_eq!(repo.update(&b).await.unwrap_err().code, ErrorCode::BookingNotFound);
    }

    #[tokio::test]
    async fn occupying_excludes_cancelled_and_other_days() {
        let repo = InMemoryBookingRepository::new();
        let kept = booking("u1", monday(), 9);
        let mut cancelled = booking("u2", monday(), 11);
        cancelled.cancel(None).unwrap();
        let other_day = booking("u3", monday().succ_opt().unwrap(), 9);
        for b in [&kept, &cancelled, &other_day] {
            repo.save(b).await.unwrap();
        }

        let found = repo.find_occupying_on(monday()).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), kept.id());
    }

    #[tokio::test]
    async fn checked_save_sees_the_day_and_writes_nothing_on_rejection() {
        let repo = InMemoryBookingRepository::new();
        repo.save(&booking("u1", monday(), 9)).await.unwrap();
        let late = booking("u2", monday(), 14);

        let full = |day: &[Booking]| -> Result<(), DomainError> {
            assert_eq!(day.len(), 1);
            Err(DomainError::new(ErrorCode::SlotUnavailable, "day is full"))
        };
        let err = repo.save_checked(&late, &full).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SlotUnavailable);
        assert_eq!(repo.len().await, 1);

        let accept = |_: &[Booking]| -> Result<(), DomainError> { Ok(()) };
        repo.save_checked(&late, &accept).await.unwrap();
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn reschedule_check_does_not_see_the_original() {
        let repo = InMemoryBookingRepository::new();
        let mut original = booking("u1", monday(), 9);
        original.confirm().unwrap();
        repo.save(&original).await.unwrap();

        let replacement = original
            .reschedule_to(
                TimeSlot::new(monday(), NaiveTime::from_hms_opt(10, 30, 0).unwrap(), 60),
                &BusinessHours::standard(),
            )
            .unwrap();
        let seen_none = |day: &[Booking]| -> Result<(), DomainError> {
            assert!(day.is_empty());
            Ok(())
        };
        repo.save_reschedule(&original, &replacement, &seen_none).await.unwrap();
        assert_eq!(repo.find_occupying_on(monday()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn find_by_customer_filters() {
        let repo = InMemoryBookingRepository::new();
        repo.save(&booking("u1", monday(), 9)).await.unwrap();
        repo.save(&booking("u2", monday(), 11)).await.unwrap();
        let mine = repo.find_by_customer(&UserId::new("u1").unwrap()).await.unwrap();
        assert_eq!(mine.len(), 1);
    }
}
