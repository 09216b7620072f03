//! Shared application state for the HTTP layer.
//!
//! Cloned per request. Holds Arc-wrapped ports and builds application
//! handlers on demand.

use std::sync::Arc;

use sqlx::PgPool;

use crate::application::handlers::address::{
    CreateAddressHandler, DeleteAddressHandler, ListAddressesHandler, SetDefaultAddressHandler,
};
use crate::application::handlers::booking::{
    CreateBookingHandler, GetAvailableSlotsHandler, GetBookingHandler, ListCustomerBookingsHandler,
    RescheduleBookingHandler, UpdateBookingStatusHandler,
};
use crate::application::handlers::catalog::ListServicesHandler;
use crate::application::handlers::geocoding::GeocodePostalCodeHandler;
use crate::application::handlers::notification::{
    ListGreetingsHandler, ScheduleHolidayGreetingHandler,
};
use crate::application::handlers::payment::{
    CheckoutSettings, CreatePaymentSessionHandler, GetPaymentSessionHandler,
    HandlePaymentWebhookHandler,
};
use crate::application::handlers::profile::{GetProfileHandler, UpsertProfileHandler};
use crate::application::RetryPolicy;
use crate::domain::payment::StripeWebhookVerifier;
use crate::domain::scheduling::SlotGenerator;
use crate::ports::{
    AddressRepository, BookingRepository, Geocoder, GreetingRepository, PaymentProvider,
    PaymentSessionRepository, ProfileRepository, RateLimiter, RegionClassifier, ServiceCatalog,
    SessionValidator, WebhookEventRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub bookings: Arc<dyn BookingRepository>,
    pub addresses: Arc<dyn AddressRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub services: Arc<dyn ServiceCatalog>,
    pub payment_sessions: Arc<dyn PaymentSessionRepository>,
    pub greetings: Arc<dyn GreetingRepository>,
    pub webhook_events: Arc<dyn WebhookEventRepository>,
    pub payment_provider: Arc<dyn PaymentProvider>,
    pub geocoder: Arc<dyn Geocoder>,
    pub region_classifier: Arc<dyn RegionClassifier>,
    pub session_validator: Arc<dyn SessionValidator>,
    pub rate_limiter: Arc<dyn RateLimiter>,
    pub slot_generator: SlotGenerator,
    pub checkout: CheckoutSettings,
    pub webhook_verifier: StripeWebhookVerifier,
    pub retry: RetryPolicy,
    /// `None` when running on in-memory adapters.
    pub db: Option<PgPool>,
}

impl AppState {
    // ─── Bookings ────────────────────────────────────────────────────────────

    pub fn create_booking_handler(&self) -> CreateBookingHandler {
        CreateBookingHandler::new(
            self.bookings.clone(),
            self.services.clone(),
            self.addresses.clone(),
            self.slot_generator.clone(),
        )
    }

    pub fn get_booking_handler(&self) -> GetBookingHandler {
        GetBookingHandler::new(self.bookings.clone())
    }

    pub fn list_bookings_handler(&self) -> ListCustomerBookingsHandler {
        ListCustomerBookingsHandler::new(self.bookings.clone())
    }

    pub fn update_booking_status_handler(&self) -> UpdateBookingStatusHandler {
        UpdateBookingStatusHandler::new(self.bookings.clone())
    }

    pub fn reschedule_booking_handler(&self) -> RescheduleBookingHandler {
        RescheduleBookingHandler::new(self.bookings.clone(), self.slot_generator.clone())
    }

    pub fn available_slots_handler(&self) -> GetAvailableSlotsHandler {
        GetAvailableSlotsHandler::new(
            self.bookings.clone(),
            self.services.clone(),
            self.region_classifier.clone(),
            self.slot_generator.clone(),
        )
        .with_retry_policy(self.retry)
    }

    // ─── Addresses ───────────────────────────────────────────────────────────

    pub fn create_address_handler(&self) -> CreateAddressHandler {
        CreateAddressHandler::new(self.addresses.clone())
    }

    pub fn list_addresses_handler(&self) -> ListAddressesHandler {
        ListAddressesHandler::new(self.addresses.clone())
    }

    pub fn set_default_address_handler(&self) -> SetDefaultAddressHandler {
        SetDefaultAddressHandler::new(self.addresses.clone())
    }

    pub fn delete_address_handler(&self) -> DeleteAddressHandler {
        DeleteAddressHandler::new(self.addresses.clone())
    }

    // ─── Profile & catalog ───────────────────────────────────────────────────

    pub fn get_profile_handler(&self) -> GetProfileHandler {
        GetProfileHandler::new(self.profiles.clone())
    }

    pub fn upsert_profile_handler(&self) -> UpsertProfileHandler {
        UpsertProfileHandler::new(self.profiles.clone())
    }

    pub fn list_services_handler(&self) -> ListServicesHandler {
        ListServicesHandler::new(self.services.clone())
    }

    pub fn geocode_handler(&self) -> GeocodePostalCodeHandler {
        GeocodePostalCodeHandler::new(self.geocoder.clone()).with_retry_policy(self.retry)
    }

    // ─── Payments ────────────────────────────────────────────────────────────

    pub fn create_payment_session_handler(&self) -> CreatePaymentSessionHandler {
        CreatePaymentSessionHandler::new(
            self.bookings.clone(),
            self.services.clone(),
            self.payment_sessions.clone(),
            self.payment_provider.clone(),
            self.checkout.clone(),
        )
    }

    pub fn get_payment_session_handler(&self) -> GetPaymentSessionHandler {
        GetPaymentSessionHandler::new(self.payment_sessions.clone())
    }

    pub fn webhook_handler(&self) -> HandlePaymentWebhookHandler {
        HandlePaymentWebhookHandler::new(
            self.webhook_verifier.clone(),
            self.payment_sessions.clone(),
            self.bookings.clone(),
            self.webhook_events.clone(),
        )
    }

    // ─── Greetings ───────────────────────────────────────────────────────────

    pub fn schedule_greeting_handler(&self) -> ScheduleHolidayGreetingHandler {
        ScheduleHolidayGreetingHandler::new(self.greetings.clone())
    }

    pub fn list_greetings_handler(&self) -> ListGreetingsHandler {
        ListGreetingsHandler::new(self.greetings.clone())
    }
}
