//! CreatePaymentSessionHandler - Command handler for starting checkout.
//!
//! Asks the payment provider for a hosted checkout page and records the
//! session locally. The outcome arrives later by webhook.

use std::sync::Arc;

use tracing::info;

use crate::application::handlers::booking::{booking_not_found, find_active_service};
use crate::application::handlers::ensure_access;
use crate::domain::booking::BookingStatus;
use crate::domain::foundation::{BookingId, CommandMetadata, DomainError, PaymentSessionId};
use crate::domain::payment::{PaymentSession, PaymentStatus};
use crate::ports::{
    BookingRepository, CreateCheckoutRequest, PaymentProvider, PaymentSessionRepository,
    ServiceCatalog,
};

/// Where the hosted page sends the customer afterwards, and the charge currency.
#[derive(Debug, Clone)]
pub struct CheckoutSettings {
    pub currency: String,
    pub success_url: String,
    pub cancel_url: String,
}

#[derive(Debug, Clone)]
pub struct CreatePaymentSessionCommand {
    pub booking_id: BookingId,
    pub customer_email: String,
}

pub struct CreatePaymentSessionHandler {
    bookings: Arc<dyn BookingRepository>,
    services: Arc<dyn ServiceCatalog>,
    sessions: Arc<dyn PaymentSessionRepository>,
    provider: Arc<dyn PaymentProvider>,
    settings: CheckoutSettings,
}

impl CreatePaymentSessionHandler {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        services: Arc<dyn ServiceCatalog>,
        sessions: Arc<dyn PaymentSessionRepository>,
        provider: Arc<dyn PaymentProvider>,
        settings: CheckoutSettings,
    ) -> Self {
        Self {
            bookings,
            services,
            sessions,
            provider,
            settings,
        }
    }

    /// Returns the booking's open session if it already has one.
    pub async fn handle(
        &self,
        cmd: CreatePaymentSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<PaymentSession, DomainError> {
        let mut booking = self
            .bookings
            .find_by_id(&cmd.booking_id)
            .await?
            .ok_or_else(|| booking_not_found(&cmd.booking_id))?;
        ensure_access(&booking, &metadata)?;

        if booking.status() != BookingStatus::Pending {
            return Err(DomainError::validation(
                "booking_id",
                format!("Booking is {}, only pending bookings can be paid", booking.status()),
            ));
        }

        if let Some(open) = self
            .sessions
            .find_by_booking(booking.id())
            .await?
            .into_iter()
            .find(|s| s.status() == PaymentStatus::Pending)
        {
            return Ok(open);
        }

        let service = find_active_service(self.services.as_ref(), booking.service_id()).await?;
        let session_id = PaymentSessionId::new();
        let checkout = self
            .provider
            .create_checkout_session(CreateCheckoutRequest {
                payment_session_id: session_id,
                booking_id: *booking.id(),
                customer_email: cmd.customer_email,
                description: format!(
                    "{} on {} at {}",
                    service.title(),
                    booking.date().format("%-d %b %Y"),
                    booking.start_time().format("%H:%M")
                ),
                amount_cents: service.price_cents(),
                currency: self.settings.currency.clone(),
                success_url: format!("{}?booking_id={}", self.settings.success_url, booking.id()),
                cancel_url: format!("{}?booking_id={}", self.settings.cancel_url, booking.id()),
            })
            .await?;

        let session = PaymentSession::new(
            *booking.id(),
            booking.customer_id().clone(),
            service.price_cents(),
            self.settings.currency.as_str(),
            checkout.id,
            Some(checkout.url),
        )?
        .with_id(session_id);
        self.sessions.save(&session).await?;

        booking.attach_payment_session(*session.id());
        self.bookings.update(&booking).await?;

        info!(
            payment_session_id = %session.id(),
            booking_id = %booking.id(),
            provider_session_id = %session.provider_session_id(),
            amount_cents = session.amount_cents(),
            "payment session created"
        );
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryBookingRepository, InMemoryPaymentSessionRepository, InMemoryServiceCatalog,
    };
    use crate::adapters::stripe::StubCheckoutProvider;
    use crate::application::handlers::test_support::*;
    use crate::domain::booking::{Booking, NewBooking};
    use crate::domain::catalog::ServiceCategory;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::region::Region;
    use crate::domain::scheduling::{BusinessHours, TimeSlot};
    use crate::ports::PaymentError;
    use chrono::Weekday;

    struct Fixture {
        handler: CreatePaymentSessionHandler,
        bookings: Arc<InMemoryBookingRepository>,
        provider: StubCheckoutProvider,
        booking_id: BookingId,
    }

    async fn fixture() -> Fixture {
        let service = service(ServiceCategory::ChemicalWash);
        let booking = Booking::new(
            NewBooking {
                customer_id: user("cust-1"),
                service_id: *service.id(),
                category: service.category(),
                address_id: None,
                region: Region::East,
                slot: TimeSlot::new(upcoming(Weekday::Sat), hm(10, 30), 60),
                notes: None,
            },
            &BusinessHours::standard(),
        )
        .unwrap();
        let bookings = Arc::new(InMemoryBookingRepository::new());
        bookings.save(&booking).await.unwrap();
        let provider = StubCheckoutProvider::new("https://checkout.stripe.test/pay");

        let handler = CreatePaymentSessionHandler::new(
            bookings.clone(),
            Arc::new(InMemoryServiceCatalog::with_services([service])),
            Arc::new(InMemoryPaymentSessionRepository::new()),
            Arc::new(provider.clone()),
            CheckoutSettings {
                currency: "sgd".to_string(),
                success_url: "https://iaircon.sg/booking/success".to_string(),
                cancel_url: "https://iaircon.sg/booking/cancelled".to_string(),
            },
        );
        Fixture {
            handler,
            bookings,
            provider,
            booking_id: *booking.id(),
        }
    }

    fn command(id: BookingId) -> CreatePaymentSessionCommand {
        CreatePaymentSessionCommand {
            booking_id: id,
            customer_email: "cust@example.sg".to_string(),
        }
    }

    #[tokio::test]
    async fn creates_session_and_links_booking() {
        let f = fixture().await;

        let session = f.handler.handle(command(f.booking_id), customer("cust-1")).await.unwrap();

        assert_eq!(session.status(), PaymentStatus::Pending);
        assert_eq!(session.amount_cents(), 8000);
        assert!(session.provider_session_id().starts_with("cs_test_"));
        let requests = f.provider.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].payment_session_id, *session.id());
        let booking = f.bookings.find_by_id(&f.booking_id).await.unwrap().unwrap();
        assert_eq!(booking.payment_session_id(), Some(session.id()));
    }

    #[tokio::test]
    async fn second_call_reuses_open_session() {
        let f = fixture().await;
        let first = f.handler.handle(command(f.booking_id), customer("cust-1")).await.unwrap();
        let second = f.handler.handle(command(f.booking_id), customer("cust-1")).await.unwrap();

        assert_eq!(first.id(), second.id());
        assert_eq!(f.provider.requests().len(), 1);
    }

    #[tokio::test]
    async fn provider_outage_is_service_error() {
        let f = fixture().await;
        f.provider.fail_next(PaymentError::network("connection reset"));

        let err = f.handler.handle(command(f.booking_id), customer("cust-1")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ServiceError);
    }

    #[tokio::test]
    async fn stranger_cannot_pay_for_booking() {
        let f = fixture().await;
        let err = f.handler.handle(command(f.booking_id), customer("cust-2")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }
}
