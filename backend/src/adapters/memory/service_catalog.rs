//! In-memory service catalog.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::catalog::Service;
use crate::domain::foundation::{DomainError, ServiceId};
use crate::ports::ServiceCatalog;

#[derive(Debug, Clone, Default)]
pub struct InMemoryServiceCatalog {
    services: Arc<RwLock<HashMap<ServiceId, Service>>>,
}

impl InMemoryServiceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: seed the catalog with services.
    pub fn with_services(services: impl IntoIterator<Item = Service>) -> Self {
        let map = services.into_iter().map(|s| (*s.id(), s)).collect();
        Self {
            services: Arc::new(RwLock::new(map)),
        }
    }
}

#[async_trait]
impl ServiceCatalog for InMemoryServiceCatalog {
    async fn list_active(&self) -> Result<Vec<Service>, DomainError> {
        let mut active: Vec<Service> = self
            .services
            .read()
            .await
            .values()
            .filter(|s| s.is_active())
            .cloned()
            .collect();
        active.sort_by(|a, b| a.title().cmp(b.title()));
        Ok(active)
    }

    async fn find_by_id(&self, id: &ServiceId) -> Result<Option<Service>, DomainError> {
        Ok(self.services.read().await.get(id).cloned())
    }

    async fn save(&self, service: &Service) -> Result<(), DomainError> {
        self.services
            .write()
            .await
            .insert(*service.id(), service.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::ServiceCategory;

    #[tokio::test]
    async fn list_active_hides_deactivated_and_sorts_by_title() {
        let wash = Service::new("Chemical Wash", ServiceCategory::ChemicalWash, 8000, 60).unwrap();
        let amc = Service::new("AMC Package", ServiceCategory::Amc, 25000, 90).unwrap();
        let mut gas = Service::new("Gas Top-up", ServiceCategory::GasTopUp, 6000, 60).unwrap();
        gas.deactivate();
        let catalog = InMemoryServiceCatalog::with_services([wash, amc, gas]);

        let titles: Vec<String> = catalog
            .list_active()
            .await
            .unwrap()
            .iter()
            .map(|s| s.title().to_string())
            .collect();
        assert_eq!(titles, vec!["AMC Package", "Chemical Wash"]);
    }
}
