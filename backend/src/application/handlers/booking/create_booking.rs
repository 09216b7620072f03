//! CreateBookingHandler - Command handler for booking a service slot.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use tracing::info;

use super::{find_active_service, occupied_on, slot_still_free};
use crate::domain::address::Address;
use crate::domain::booking::{Booking, NewBooking};
use crate::domain::foundation::{
    AddressId, CommandMetadata, DomainError, ErrorCode, OwnedByUser, ServiceId, Timestamp, UserId,
};
use crate::domain::scheduling::SlotGenerator;
use crate::ports::{AddressRepository, BookingRepository, ServiceCatalog};

/// Command to book a slot.
#[derive(Debug, Clone)]
pub struct CreateBookingCommand {
    pub service_id: ServiceId,
    /// Falls back to the customer's default address when absent.
    pub address_id: Option<AddressId>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub notes: Option<String>,
}

/// Handler for creating bookings.
pub struct CreateBookingHandler {
    bookings: Arc<dyn BookingRepository>,
    services: Arc<dyn ServiceCatalog>,
    addresses: Arc<dyn AddressRepository>,
    generator: SlotGenerator,
}

impl CreateBookingHandler {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        services: Arc<dyn ServiceCatalog>,
        addresses: Arc<dyn AddressRepository>,
        generator: SlotGenerator,
    ) -> Self {
        Self {
            bookings,
            services,
            addresses,
            generator,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateBookingCommand,
        metadata: CommandMetadata,
    ) -> Result<Booking, DomainError> {
        // 1. Resolve what and where
        let service = find_active_service(self.services.as_ref(), &cmd.service_id).await?;
        let address = self.resolve_address(&metadata.user_id, cmd.address_id).await?;

        // 2. Check the slot against hours, lead time, overlaps and caps
        let now = Timestamp::now().to_sg_local();
        let occupied = occupied_on(self.bookings.as_ref(), cmd.date, None).await?;
        let slot = self
            .generator
            .validate(cmd.date, cmd.start_time, service.category(), &occupied, now)?;

        // 3. Create and persist, checking the day again under the write lock
        let booking = Booking::new(
            NewBooking {
                customer_id: metadata.user_id.clone(),
                service_id: *service.id(),
                category: service.category(),
                address_id: Some(*address.id()),
                region: address.region(),
                slot,
                notes: cmd.notes,
            },
            self.generator.hours(),
        )?;
        let check = slot_still_free(&self.generator, slot, service.category(), now);
        self.bookings.save_checked(&booking, &check).await?;

        info!(
            booking_id = %booking.id(),
            customer_id = %booking.customer_id(),
            date = %booking.date(),
            start = %booking.start_time(),
            region = %booking.region(),
            correlation_id = %metadata.correlation_id(),
            "booking created"
        );
        Ok(booking)
    }

    async fn resolve_address(
        &self,
        customer_id: &UserId,
        requested: Option<AddressId>,
    ) -> Result<Address, DomainError> {
        match requested {
            Some(id) => {
                let address = self.addresses.find_by_id(&id).await?.ok_or_else(|| {
                    DomainError::new(ErrorCode::AddressNotFound, format!("Address {} not found", id))
                })?;
                address.check_ownership(customer_id)?;
                Ok(address)
            }
            None => self
                .addresses
                .find_by_customer(customer_id)
                .await?
                .into_iter()
                .find(Address::is_default)
                .ok_or_else(|| {
                    DomainError::validation("address_id", "No address given and no default address on file")
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryAddressRepository, InMemoryBookingRepository, InMemoryServiceCatalog,
    };
    use crate::application::handlers::test_support::*;
    use crate::domain::booking::BookingStatus;
    use crate::domain::catalog::ServiceCategory;
    use crate::domain::region::Region;
    use chrono::Weekday;

    struct Fixture {
        handler: CreateBookingHandler,
        bookings: Arc<InMemoryBookingRepository>,
        services: Arc<InMemoryServiceCatalog>,
        addresses: Arc<InMemoryAddressRepository>,
        service_id: ServiceId,
        address_id: AddressId,
    }

    async fn fixture(category: ServiceCategory) -> Fixture {
        let service = service(category);
        let service_id = *service.id();
        let home = address("cust-1", "521123");
        let address_id = *home.id();

        let bookings = Arc::new(InMemoryBookingRepository::new());
        let addresses = Arc::new(InMemoryAddressRepository::new());
        addresses.save(&home).await.unwrap();

        let services = Arc::new(InMemoryServiceCatalog::with_services([service]));

        let handler = CreateBookingHandler::new(
            bookings.clone(),
            services.clone(),
            addresses.clone(),
            SlotGenerator::default(),
        );
        Fixture {
            handler,
            bookings,
            services,
            addresses,
            service_id,
            address_id,
        }
    }

    fn command(f: &Fixture, date: NaiveDate, start: NaiveTime) -> CreateBookingCommand {
        CreateBookingCommand {
            service_id: f.service_id,
            address_id: Some(f.address_id),
            date,
            start_time: start,
            notes: Some("Gate code 4321".to_string()),
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Success Cases
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn creates_pending_booking_in_address_region() {
        let f = fixture(ServiceCategory::GeneralServicing).await;
        let date = upcoming(Weekday::Mon);

        let booking = f.handler.handle(command(&f, date, hm(9, 30)), customer("cust-1")).await.unwrap();

        assert_eq!(booking.status(), BookingStatus::Pending);
        assert_eq!(booking.region(), Region::East);
        assert_eq!(booking.duration_minutes(), 60);
        assert_eq!(f.bookings.len().await, 1);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Rejections
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn rejects_taken_slot() {
        let f = fixture(ServiceCategory::GeneralServicing).await;
        let date = upcoming(Weekday::Tue);
        f.handler.handle(command(&f, date, hm(10, 30)), customer("cust-1")).await.unwrap();

        let err = f
            .handler
            .handle(command(&f, date, hm(10, 30)), customer("cust-1"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SlotUnavailable);
    }

    #[tokio::test]
    async fn rejects_sunday() {
        let f = fixture(ServiceCategory::GeneralServicing).await;
        let err = f
            .handler
            .handle(command(&f, upcoming(Weekday::Sun), hm(9, 30)), customer("cust-1"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn rejects_fourth_amc_booking_of_the_day() {
        let f = fixture(ServiceCategory::Amc).await;
        let date = upcoming(Weekday::Wed);
        for start in [hm(9, 30), hm(11, 0), hm(12, 30)] {
            f.handler.handle(command(&f, date, start), customer("cust-1")).await.unwrap();
        }

        let err = f
            .handler
            .handle(command(&f, date, hm(14, 0)), customer("cust-1"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SlotUnavailable);
        assert_eq!(err.details.get("reason").map(String::as_str), Some("amc_limit"));
    }

    #[tokio::test]
    async fn rejects_someone_elses_address() {
        let f = fixture(ServiceCategory::GeneralServicing).await;
        let err = f
            .handler
            .handle(command(&f, upcoming(Weekday::Mon), hm(9, 30)), customer("intruder"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn requires_an_address_when_none_is_default() {
        let f = fixture(ServiceCategory::GeneralServicing).await;
        let mut cmd = command(&f, upcoming(Weekday::Mon), hm(9, 30));
        cmd.address_id = None;

        let err = f.handler.handle(cmd, customer("cust-1")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn unknown_service_is_not_found() {
        let f = fixture(ServiceCategory::GeneralServicing).await;
        let mut cmd = command(&f, upcoming(Weekday::Mon), hm(9, 30));
        cmd.service_id = ServiceId::new();

        let err = f.handler.handle(cmd, customer("cust-1")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ServiceNotFound);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Concurrency
    // ════════════════════════════════════════════════════════════════════════════

    /// Suspends after every day lookup so concurrent handlers all read the
    /// day before any of them writes.
    struct SlowReads(Arc<InMemoryBookingRepository>);

    #[async_trait::async_trait]
    impl BookingRepository for SlowReads {
        async fn save(&self, booking: &Booking) -> Result<(), DomainError> {
            self.0.save(booking).await
        }

        async fn update(&self, booking: &Booking) -> Result<(), DomainError> {
            self.0.update(booking).await
        }

        async fn save_checked(
            &self,
            booking: &Booking,
            check: &crate::ports::SlotCheck<'_>,
        ) -> Result<(), DomainError> {
            self.0.save_checked(booking, check).await
        }

        async fn save_reschedule(
            &self,
            original: &Booking,
            replacement: &Booking,
            check: &crate::ports::SlotCheck<'_>,
        ) -> Result<(), DomainError> {
            self.0.save_reschedule(original, replacement, check).await
        }

        async fn find_by_id(
            &self,
            id: &crate::domain::foundation::BookingId,
        ) -> Result<Option<Booking>, DomainError> {
            self.0.find_by_id(id).await
        }

        async fn find_by_customer(&self, customer_id: &UserId) -> Result<Vec<Booking>, DomainError> {
            self.0.find_by_customer(customer_id).await
        }

        async fn find_occupying_on(&self, date: NaiveDate) -> Result<Vec<Booking>, DomainError> {
            let day = self.0.find_occupying_on(date).await;
            tokio::task::yield_now().await;
            day
        }
    }

    #[tokio::test]
    async fn concurrent_creates_never_exceed_the_daily_cap() {
        let f = fixture(ServiceCategory::GeneralServicing).await;
        let stored = Arc::new(InMemoryBookingRepository::new());
        let handler = CreateBookingHandler::new(
            Arc::new(SlowReads(stored.clone())),
            f.services.clone(),
            f.addresses.clone(),
            SlotGenerator::default(),
        );
        let date = upcoming(Weekday::Mon);
        let starts = [hm(9, 30), hm(10, 30), hm(11, 30), hm(12, 30), hm(13, 30), hm(14, 30), hm(15, 30)];

        let results = futures::future::join_all(
            starts
                .iter()
                .map(|start| handler.handle(command(&f, date, *start), customer("cust-1"))),
        )
        .await;

        let accepted = results.iter().filter(|r| r.is_ok()).count();
        let rejected: Vec<_> = results.iter().filter_map(|r| r.as_ref().err()).collect();
        assert_eq!(accepted, 6);
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].code, ErrorCode::SlotUnavailable);
        assert_eq!(rejected[0].details.get("reason").map(String::as_str), Some("day_full"));
        assert_eq!(stored.find_occupying_on(date).await.unwrap().len(), 6);
    }
}
