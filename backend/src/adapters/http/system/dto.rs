//! Response bodies for public endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::{Service, ServiceCategory};
use crate::domain::foundation::ServiceId;

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// `memory` when no database is configured.
    pub database: &'static str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeParams {
    pub postal_code: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceResponse {
    pub id: ServiceId,
    pub title: String,
    pub description: Option<String>,
    pub category: ServiceCategory,
    pub price_cents: i64,
    pub currency: String,
    pub duration_minutes: u32,
}

impl From<Service> for ServiceResponse {
    fn from(service: Service) -> Self {
        Self {
            id: *service.id(),
            title: service.title().to_string(),
            description: service.description().map(str::to_string),
            category: service.category(),
            price_cents: service.price_cents(),
            currency: service.currency().to_string(),
            duration_minutes: service.duration_minutes(),
        }
    }
}
