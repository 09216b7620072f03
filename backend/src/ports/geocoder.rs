//! Geocoder port - postal code to address lookup.
//!
//! The production lookup source is an external maps API; this port keeps the
//! rest of the service independent of it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::address::PostalCode;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::region::Region;

/// One address candidate for a postal code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub postal_code: String,
    pub formatted_address: String,
    pub building: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub region: Region,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    /// Lookup source could not be reached.
    #[error("geocoder unavailable: {0}")]
    Unavailable(String),

    /// Lookup source rejected the query.
    #[error("invalid geocode request: {0}")]
    InvalidRequest(String),
}

impl GeocodeError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, GeocodeError::Unavailable(_))
    }
}

impl From<GeocodeError> for DomainError {
    fn from(err: GeocodeError) -> Self {
        match err {
            GeocodeError::Unavailable(_) => DomainError::new(ErrorCode::ServiceError, err.to_string()),
            GeocodeError::InvalidRequest(msg) => DomainError::validation("postal_code", msg),
        }
    }
}

/// Resolves postal codes to address candidates.
///
/// An unknown but well-formed code yields `Ok(vec![])`.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, postal_code: &PostalCode) -> Result<Vec<GeocodeResult>, GeocodeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_is_retryable_service_error() {
        let err = GeocodeError::Unavailable("timeout".into());
        assert!(err.is_retryable());
        assert_eq!(DomainError::from(err).code, ErrorCode::ServiceError);
    }

    #[test]
    fn invalid_request_is_validation_error() {
        let err = GeocodeError::InvalidRequest("bad".into());
        assert!(!err.is_retryable());
        assert_eq!(DomainError::from(err).code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn geocoder_is_object_safe() {
        fn _accepts_dyn(_g: &dyn Geocoder) {}
    }
}
