//! In-memory repository adapters.
//!
//! Used by tests and by `IAIRCON__DATABASE__URL`-less local runs. State is
//! held behind `tokio::sync::RwLock` and lost on restart.

mod address_repository;
mod booking_repository;
mod greeting_repository;
mod payment_session_repository;
mod profile_repository;
mod service_catalog;
mod webhook_event_repository;

pub use address_repository::InMemoryAddressRepository;
pub use booking_repository::InMemoryBookingRepository;
pub use greeting_repository::InMemoryGreetingRepository;
pub use payment_session_repository::InMemoryPaymentSessionRepository;
pub use profile_repository::InMemoryProfileRepository;
pub use service_catalog::InMemoryServiceCatalog;
pub use webhook_event_repository::InMemoryWebhookEventRepository;
