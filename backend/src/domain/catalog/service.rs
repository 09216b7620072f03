//! Service aggregate - an entry in the bookable catalog.

use serde::{Deserialize, Serialize};

use super::ServiceCategory;
use crate::domain::foundation::{DomainError, ServiceId, Timestamp, ValidationError};

/// Maximum length for a service title.
pub const MAX_TITLE_LENGTH: usize = 120;

/// Allowed duration range in minutes.
pub const MIN_DURATION_MINUTES: u32 = 15;
pub const MAX_DURATION_MINUTES: u32 = 480;

/// A bookable service.
///
/// # Invariants
///
/// - `title` is 1-120 characters
/// - `price_cents` is positive
/// - `duration_minutes` is within 15-480
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    id: ServiceId,
    title: String,
    description: Option<String>,
    price_cents: i64,
    currency: String,
    duration_minutes: u32,
    category: ServiceCategory,
    active: bool,
    created_at: Timestamp,
}

impl Service {
    /// Creates a new active service.
    pub fn new(
        title: impl Into<String>,
        category: ServiceCategory,
        price_cents: i64,
        duration_minutes: u32,
    ) -> Result<Self, DomainError> {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(ValidationError::empty_field("title").into());
        }
        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(ValidationError::out_of_range(
                "title",
                1,
                MAX_TITLE_LENGTH as i64,
                title.chars().count() as i64,
            )
            .into());
        }
        if price_cents <= 0 {
            return Err(DomainError::validation("price_cents", "Price must be positive"));
        }
        if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&duration_minutes) {
            return Err(ValidationError::out_of_range(
                "duration_minutes",
                MIN_DURATION_MINUTES as i64,
                MAX_DURATION_MINUTES as i64,
                duration_minutes as i64,
            )
            .into());
        }

        Ok(Self {
            id: ServiceId::new(),
            title,
            description: None,
            price_cents,
            currency: "sgd".to_string(),
            duration_minutes,
            category,
            active: true,
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitute a service from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ServiceId,
        title: String,
        description: Option<String>,
        price_cents: i64,
        currency: String,
        duration_minutes: u32,
        category: ServiceCategory,
        active: bool,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            title,
            description,
            price_cents,
            currency,
            duration_minutes,
            category,
            active,
            created_at,
        }
    }

    /// Builder: attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn id(&self) -> &ServiceId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn price_cents(&self) -> i64 {
        self.price_cents
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn category(&self) -> ServiceCategory {
        self.category
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Withdraw the service from the catalog. Existing bookings are unaffected.
    pub fn deactivate(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    #[test]
    fn new_service_is_active_in_sgd() {
        let service = Service::new("General Servicing", ServiceCategory::GeneralServicing, 3000, 60).unwrap();
        assert!(service.is_active());
        assert_eq!(service.currency(), "sgd");
        assert_eq!(service.price_cents(), 3000);
    }

    #[test]
    fn rejects_blank_title() {
        let err = Service::new("   ", ServiceCategory::Repair, 1000, 60).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn rejects_non_positive_price() {
        assert!(Service::new("Wash", ServiceCategory::ChemicalWash, 0, 60).is_err());
        assert!(Service::new("Wash", ServiceCategory::ChemicalWash, -5, 60).is_err());
    }

    #[test]
    fn rejects_duration_out_of_range() {
        assert!(Service::new("Quick", ServiceCategory::GasTopUp, 1000, 10).is_err());
        assert!(Service::new("Long", ServiceCategory::Installation, 1000, 600).is_err());
    }

    #[test]
    fn deactivate_hides_service() {
        let mut service = Service::new("AMC Visit", ServiceCategory::Amc, 12000, 90).unwrap();
        service.deactivate();
        assert!(!service.is_active());
    }
}
