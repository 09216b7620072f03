//! PostgreSQL pool settings.

use std::time::Duration;

use serde::Deserialize;

use super::error::ValidationError;

const POOL_CEILING: u32 = 100;

/// Without a URL the service runs on in-memory adapters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub min_connections: u32,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    /// Apply `migrations/` on startup.
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            min_connections: 1,
            max_connections: 10,
            acquire_timeout_secs: 10,
            run_migrations: true,
        }
    }
}

impl DatabaseConfig {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let postgres_url = |url: &String| url.starts_with("postgres://") || url.starts_with("postgresql://");
        if self.url.as_ref().is_some_and(|url| !postgres_url(url)) {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        if self.max_connections > POOL_CEILING {
            return Err(ValidationError::PoolSizeTooLarge);
        }
        if self.min_connections > self.max_connections {
            return Err(ValidationError::InvalidPoolSize);
        }
        Ok(())
    }
}
