//! Offline geocoder backed by the postal sector table.
//!
//! Resolves any postal code whose two-digit sector is assigned to a region,
//! placing it at the region's reference point. Known buildings can be seeded
//! to return exact results.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::domain::address::PostalCode;
use crate::domain::region::Region;
use crate::ports::{GeocodeError, GeocodeResult, Geocoder};

/// Approximate reference point for each region.
fn reference_point(region: Region) -> (f64, f64) {
    match region {
        Region::Central => (1.2897, 103.8501),
        Region::North => (1.4360, 103.7860),
        Region::NorthEast => (1.3700, 103.8900),
        Region::East => (1.3530, 103.9440),
        Region::West => (1.3400, 103.7000),
    }
}

#[derive(Debug, Clone, Default)]
pub struct SectorGeocoder {
    known: HashMap<String, GeocodeResult>,
}

impl SectorGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: register an exact result for a postal code.
    pub fn with_known(mut self, result: GeocodeResult) -> Self {
        self.known.insert(result.postal_code.clone(), result);
        self
    }
}

#[async_trait]
impl Geocoder for SectorGeocoder {
    async fn geocode(&self, postal_code: &PostalCode) -> Result<Vec<GeocodeResult>, GeocodeError> {
        if let Some(known) = self.known.get(postal_code.as_str()) {
            return Ok(vec![known.clone()]);
        }

        let Some(region) = postal_code.region() else {
            tracing::debug!(postal_code = %postal_code, "postal sector not assigned");
            return Ok(Vec::new());
        };
        let (latitude, longitude) = reference_point(region);

        Ok(vec![GeocodeResult {
            postal_code: postal_code.as_str().to_string(),
            formatted_address: format!("Singapore {}", postal_code),
            building: None,
            latitude,
            longitude,
            region,
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn assigned_sector_resolves_to_region() {
        let geocoder = SectorGeocoder::new();
        let results = geocoder.geocode(&PostalCode::new("520201").unwrap()).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].region, Region::East);
        assert_eq!(results[0].formatted_address, "Singapore 520201");
    }

    #[tokio::test]
    async fn unassigned_sector_has_no_results() {
        let geocoder = SectorGeocoder::new();
        let results = geocoder.geocode(&PostalCode::new("990000").unwrap()).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn known_entry_takes_precedence() {
        let known = GeocodeResult {
            postal_code: "018956".to_string(),
            formatted_address: "10 Bayfront Avenue, Singapore 018956".to_string(),
            building: Some("Marina Bay Sands".to_string()),
            latitude: 1.2834,
            longitude: 103.8607,
            region: Region::Central,
        };
        let geocoder = SectorGeocoder::new().with_known(known.clone());
        let results = geocoder.geocode(&PostalCode::new("018956").unwrap()).await.unwrap();
        assert_eq!(results, vec![known]);
    }
}
