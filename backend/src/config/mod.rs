//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `IAIRCON` prefix and
//! `__` between nested keys.
//!
//! # Example
//!
//! ```no_run
//! use iaircon::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod cache;
mod database;
mod error;
mod notifications;
mod payment;
mod scheduling;
mod server;

pub use auth::AuthConfig;
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use notifications::NotificationConfig;
pub use payment::PaymentConfig;
pub use scheduling::SchedulingConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

use crate::adapters::rate_limiter::RateLimitConfig;

/// Root application configuration. Every section has usable defaults, so an
/// empty environment starts a development server on in-memory adapters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub payment: PaymentConfig,

    #[serde(default)]
    pub scheduling: SchedulingConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    #[serde(default)]
    pub notifications: NotificationConfig,
}

impl AppConfig {
    /// Loads `.env` if present, then `IAIRCON__*` variables.
    ///
    /// - `IAIRCON__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `IAIRCON__DATABASE__URL=...` -> `database.url = ...`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("IAIRCON")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Semantic checks that serde cannot express.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let environment = &self.server.environment;
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(environment)?;
        self.payment.validate(environment)?;
        self.scheduling.validate()?;
        self.cache.validate()?;
        self.notifications.validate()?;
        if self.rate_limit.enabled && self.rate_limit.window_secs == 0 {
            return Err(ValidationError::InvalidValue {
                field: "rate_limit.window_secs",
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
