//! GeocodePostalCodeHandler - Query handler for postal code lookup.
//!
//! The response mirrors the maps API shape the booking form already
//! understands: a status string plus zero or more candidates.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::application::retry::{with_retry, RetryPolicy};
use crate::domain::address::PostalCode;
use crate::domain::foundation::DomainError;
use crate::ports::{GeocodeResult, Geocoder};

#[derive(Debug, Clone)]
pub struct GeocodePostalCodeQuery {
    pub postal_code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GeocodeStatus {
    Ok,
    ZeroResults,
    InvalidRequest,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeocodeResponse {
    pub status: GeocodeStatus,
    pub results: Vec<GeocodeResult>,
}

impl GeocodeResponse {
    fn invalid() -> Self {
        Self {
            status: GeocodeStatus::InvalidRequest,
            results: Vec::new(),
        }
    }
}

pub struct GeocodePostalCodeHandler {
    geocoder: Arc<dyn Geocoder>,
    retry: RetryPolicy,
}

impl GeocodePostalCodeHandler {
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        Self {
            geocoder,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Malformed codes are answered with `INVALID_REQUEST`, not an error.
    pub async fn handle(&self, query: GeocodePostalCodeQuery) -> Result<GeocodeResponse, DomainError> {
        let Ok(postal_code) = PostalCode::new(query.postal_code.trim()) else {
            return Ok(GeocodeResponse::invalid());
        };

        let results = with_retry(&self.retry, || async {
            self.geocoder.geocode(&postal_code).await.map_err(DomainError::from)
        })
        .await?;

        debug!(postal_code = %postal_code, candidates = results.len(), "geocoded postal code");
        let status = if results.is_empty() {
            GeocodeStatus::ZeroResults
        } else {
            GeocodeStatus::Ok
        };
        Ok(GeocodeResponse { status, results })
    }
}
