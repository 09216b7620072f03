//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Repository Ports
//!
//! - `BookingRepository`, `AddressRepository`, `ProfileRepository`
//! - `ServiceCatalog` - Active service offerings
//! - `PaymentSessionRepository` - Checkout bookkeeping
//! - `GreetingRepository` - Scheduled holiday greetings
//!
//! ## Webhook Ports
//!
//! - `WebhookEventRepository` - Stripe webhook idempotency tracking
//!
//! ## Vendor Ports
//!
//! - `SessionValidator` - Bearer token validation
//! - `Geocoder` - Postal code lookup
//! - `PaymentProvider` - Hosted checkout
//! - `NotificationSender` - Outbound customer messages
//! - `RateLimiter` - Request throttling
//! - `RegionClassifier` - Address to region lookup

mod address_repository;
mod booking_repository;
mod geocoder;
mod greeting_repository;
mod notification_sender;
mod payment_provider;
mod payment_session_repository;
mod profile_repository;
mod rate_limiter;
mod region_classifier;
mod service_catalog;
mod session_validator;
mod webhook_event_repository;

pub use address_repository::AddressRepository;
pub use booking_repository::{BookingRepository, SlotCheck};
pub use geocoder::{GeocodeError, GeocodeResult, Geocoder};
pub use greeting_repository::GreetingRepository;
pub use notification_sender::{NotificationError, NotificationSender, OutboundMessage};
pub use payment_provider::{
    CheckoutSession, CreateCheckoutRequest, PaymentError, PaymentErrorCode, PaymentProvider,
};
pub use payment_session_repository::PaymentSessionRepository;
pub use profile_repository::ProfileRepository;
pub use rate_limiter::{
    RateLimitDenied, RateLimitError, RateLimitKey, RateLimitResult, RateLimitScope,
    RateLimitStatus, RateLimiter,
};
pub use region_classifier::{DirectRegionClassifier, RegionClassifier};
pub use service_catalog::ServiceCatalog;
pub use session_validator::SessionValidator;
pub use webhook_event_repository::{
    SaveResult, WebhookEventRecord, WebhookEventRepository, WebhookOutcome, WebhookResult,
};
