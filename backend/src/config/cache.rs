//! In-process cache sizing (moka).

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_capacity")]
    pub region_capacity: u64,

    #[serde(default = "default_region_ttl")]
    pub region_ttl_secs: u64,

    #[serde(default = "default_capacity")]
    pub geocode_capacity: u64,

    #[serde(default = "default_geocode_ttl")]
    pub geocode_ttl_secs: u64,
}

impl CacheConfig {
    pub fn region_ttl(&self) -> Duration {
        Duration::from_secs(self.region_ttl_secs)
    }

    pub fn geocode_ttl(&self) -> Duration {
        Duration::from_secs(self.geocode_ttl_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.region_ttl_secs == 0 || self.geocode_ttl_secs == 0 {
            return Err(ValidationError::InvalidValue {
                field: "cache",
                reason: "TTL must be positive".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            region_capacity: default_capacity(),
            region_ttl_secs: default_region_ttl(),
            geocode_capacity: default_capacity(),
            geocode_ttl_secs: default_geocode_ttl(),
        }
    }
}

fn default_capacity() -> u64 {
    10_000
}

fn default_region_ttl() -> u64 {
    60 * 60
}

fn default_geocode_ttl() -> u64 {
    24 * 60 * 60
}
