//! Errors raised while loading or checking configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    ValidationFailed(#[from] ValidationError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must be set")]
    MissingRequired(&'static str),

    // server
    #[error("cannot listen on {0}")]
    InvalidAddress(String),
    #[error("server port must be non-zero")]
    InvalidPort,
    #[error("request timeout must be between 1 and 300 seconds")]
    InvalidTimeout,

    // database
    #[error("database url must use postgres:// or postgresql://")]
    InvalidDatabaseUrl,
    #[error("database min_connections is larger than max_connections")]
    InvalidPoolSize,
    #[error("database max_connections may not exceed 100")]
    PoolSizeTooLarge,

    // auth and payments
    #[error("JWT secret is shorter than 32 characters")]
    WeakJwtSecret,
    #[error("Stripe webhook secret must start with whsec_")]
    InvalidStripeWebhookSecret,

    #[error("{field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
