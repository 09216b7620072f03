//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! Schema lives in `migrations/` and is applied with `sqlx::migrate!` at
//! startup.

mod address_repository;
mod booking_repository;
mod greeting_repository;
mod payment_session_repository;
mod profile_repository;
mod service_catalog;
mod support;
mod webhook_event_repository;

pub use address_repository::PostgresAddressRepository;
pub use booking_repository::PostgresBookingRepository;
pub use greeting_repository::PostgresGreetingRepository;
pub use payment_session_repository::PostgresPaymentSessionRepository;
pub use profile_repository::PostgresProfileRepository;
pub use service_catalog::PostgresServiceCatalog;
pub use webhook_event_repository::PostgresWebhookEventRepository;
