//! Wiring: turns an [`AppConfig`] into a ready [`AppState`].
//!
//! With `database.url` set every repository is Postgres-backed and
//! migrations run at startup. Without it the in-memory adapters are used and
//! the starter catalog is seeded, which is what local runs and the HTTP
//! integration tests rely on.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

use crate::adapters::auth::{MockSessionValidator, SupabaseConfig, SupabaseSessionValidator};
use crate::adapters::cache::CachedRegionClassifier;
use crate::adapters::geocoding::{CachedGeocoder, SectorGeocoder};
use crate::adapters::http::AppState;
use crate::adapters::memory::{
    InMemoryAddressRepository, InMemoryBookingRepository, InMemoryGreetingRepository,
    InMemoryPaymentSessionRepository, InMemoryProfileRepository, InMemoryServiceCatalog,
    InMemoryWebhookEventRepository,
};
use crate::adapters::notification::{GreetingDispatcher, TracingNotificationSender};
use crate::adapters::postgres::{
    PostgresAddressRepository, PostgresBookingRepository, PostgresGreetingRepository,
    PostgresPaymentSessionRepository, PostgresProfileRepository, PostgresServiceCatalog,
    PostgresWebhookEventRepository,
};
use crate::adapters::rate_limiter::InMemoryRateLimiter;
use crate::adapters::stripe::StubCheckoutProvider;
use crate::application::handlers::notification::DispatchDueGreetingsHandler;
use crate::application::RetryPolicy;
use crate::config::{AppConfig, ValidationError};
use crate::domain::catalog::{Service, ServiceCategory};
use crate::domain::foundation::DomainError;
use crate::domain::payment::StripeWebhookVerifier;
use crate::ports::{ServiceCatalog, SessionValidator};

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ValidationError),

    #[error("database connection failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("seeding failed: {0}")]
    Seed(#[from] DomainError),
}

/// Repository set shared by the HTTP state and the greeting dispatcher.
struct Repositories {
    bookings: Arc<dyn crate::ports::BookingRepository>,
    addresses: Arc<dyn crate::ports::AddressRepository>,
    profiles: Arc<dyn crate::ports::ProfileRepository>,
    services: Arc<dyn ServiceCatalog>,
    payment_sessions: Arc<dyn crate::ports::PaymentSessionRepository>,
    greetings: Arc<dyn crate::ports::GreetingRepository>,
    webhook_events: Arc<dyn crate::ports::WebhookEventRepository>,
}

impl Repositories {
    fn in_memory() -> Self {
        Self {
            bookings: Arc::new(InMemoryBookingRepository::new()),
            addresses: Arc::new(InMemoryAddressRepository::new()),
            profiles: Arc::new(InMemoryProfileRepository::new()),
            services: Arc::new(InMemoryServiceCatalog::new()),
            payment_sessions: Arc::new(InMemoryPaymentSessionRepository::new()),
            greetings: Arc::new(InMemoryGreetingRepository::new()),
            webhook_events: Arc::new(InMemoryWebhookEventRepository::new()),
        }
    }

    fn postgres(pool: &PgPool) -> Self {
        Self {
            bookings: Arc::new(PostgresBookingRepository::new(pool.clone())),
            addresses: Arc::new(PostgresAddressRepository::new(pool.clone())),
            profiles: Arc::new(PostgresProfileRepository::new(pool.clone())),
            services: Arc::new(PostgresServiceCatalog::new(pool.clone())),
            payment_sessions: Arc::new(PostgresPaymentSessionRepository::new(pool.clone())),
            greetings: Arc::new(PostgresGreetingRepository::new(pool.clone())),
            webhook_events: Arc::new(PostgresWebhookEventRepository::new(pool.clone())),
        }
    }
}

/// Everything `main` needs to serve.
pub struct Application {
    pub state: AppState,
    /// `None` when greetings are disabled.
    pub dispatcher: Option<GreetingDispatcher>,
}

/// Connects, migrates, seeds and wires every adapter.
pub async fn build(config: &AppConfig) -> Result<Application, BootstrapError> {
    config.validate()?;

    let (repos, db) = match &config.database.url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .min_connections(config.database.min_connections)
                .max_connections(config.database.max_connections)
                .acquire_timeout(config.database.acquire_timeout())
                .connect(url)
                .await?;
            info!(max_connections = config.database.max_connections, "database pool created");
            if config.database.run_migrations {
                sqlx::migrate!("./migrations").run(&pool).await?;
                info!("migrations applied");
            }
            (Repositories::postgres(&pool), Some(pool))
        }
        None => {
            info!("no database configured, using in-memory adapters");
            (Repositories::in_memory(), None)
        }
    };
    seed_catalog(repos.services.as_ref()).await?;

    let session_validator: Arc<dyn SessionValidator> = match &config.auth.jwt_secret {
        Some(secret) => {
            let mut supabase = SupabaseConfig::new(secret.clone(), config.auth.audience.clone());
            if let Some(issuer) = &config.auth.issuer {
                supabase = supabase.with_issuer(issuer.clone());
            }
            Arc::new(SupabaseSessionValidator::new(supabase))
        }
        None => {
            tracing::warn!("no JWT secret configured, bearer tokens will be rejected");
            Arc::new(MockSessionValidator::new())
        }
    };

    let dispatcher = config.notifications.greetings_enabled.then(|| {
        let handler = DispatchDueGreetingsHandler::new(
            repos.greetings.clone(),
            repos.profiles.clone(),
            Arc::new(TracingNotificationSender::new()),
        );
        GreetingDispatcher::new(Arc::new(handler), config.notifications.poll_interval())
    });

    let state = AppState {
        bookings: repos.bookings,
        addresses: repos.addresses,
        profiles: repos.profiles,
        services: repos.services,
        payment_sessions: repos.payment_sessions,
        greetings: repos.greetings,
        webhook_events: repos.webhook_events,
        payment_provider: Arc::new(StubCheckoutProvider::new(config.payment.checkout_base_url.clone())),
        geocoder: Arc::new(CachedGeocoder::new(
            Arc::new(SectorGeocoder::new()),
            config.cache.geocode_capacity,
            config.cache.geocode_ttl(),
        )),
        region_classifier: Arc::new(CachedRegionClassifier::new(
            config.cache.region_capacity,
            config.cache.region_ttl(),
        )),
        session_validator,
        rate_limiter: Arc::new(InMemoryRateLimiter::new(config.rate_limit.clone())),
        slot_generator: config.scheduling.slot_generator()?,
        checkout: config.payment.checkout_settings(),
        webhook_verifier: StripeWebhookVerifier::new(config.payment.webhook_secret_or_dev()),
        retry: RetryPolicy::default(),
        db,
    };

    Ok(Application { state, dispatcher })
}

/// In-memory state with the default configuration and the given validator.
pub async fn in_memory_state(session_validator: Arc<dyn SessionValidator>) -> Result<AppState, BootstrapError> {
    let mut app = build(&AppConfig::default()).await?;
    app.state.session_validator = session_validator;
    Ok(app.state)
}

/// The services on offer when the catalog is empty.
pub fn starter_services() -> Result<Vec<Service>, DomainError> {
    Ok(vec![
        Service::new("General Servicing", ServiceCategory::GeneralServicing, 3_000, 60)?
            .with_description("Filter wash, coil brushing and drainage flush per fan coil"),
        Service::new("Chemical Wash", ServiceCategory::ChemicalWash, 8_000, 60)?
            .with_description("Fan coil chemical wash without dismantling"),
        Service::new("Chemical Overhaul", ServiceCategory::ChemicalOverhaul, 15_000, 90)?
            .with_description("Full dismantle and chemical soak of the fan coil"),
        Service::new("Gas Top-Up", ServiceCategory::GasTopUp, 6_000, 45)?
            .with_description("Refrigerant pressure check and top-up"),
        Service::new("Repair & Troubleshooting", ServiceCategory::Repair, 5_000, 60)?
            .with_description("Diagnosis visit; parts quoted separately"),
        Service::new("Installation", ServiceCategory::Installation, 25_000, 90)?
            .with_description("New system installation, per fan coil"),
        Service::new("AMC Visit", ServiceCategory::Amc, 12_000, 90)?
            .with_description("Scheduled visit under an annual maintenance contract"),
    ])
}

async fn seed_catalog(catalog: &dyn ServiceCatalog) -> Result<(), DomainError> {
    if !catalog.list_active().await?.is_empty() {
        return Ok(());
    }
    let services = starter_services()?;
    for service in &services {
        catalog.save(service).await?;
    }
    info!(count = services.len(), "seeded service catalog");
    Ok(())
}
