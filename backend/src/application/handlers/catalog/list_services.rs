//! ListServicesHandler - Query handler for the active service catalog.

use std::sync::Arc;

use crate::domain::catalog::Service;
use crate::domain::foundation::DomainError;
use crate::ports::ServiceCatalog;

pub struct ListServicesHandler {
    catalog: Arc<dyn ServiceCatalog>,
}

impl ListServicesHandler {
    pub fn new(catalog: Arc<dyn ServiceCatalog>) -> Self {
        Self { catalog }
    }

    pub async fn handle(&self) -> Result<Vec<Service>, DomainError> {
        self.catalog.list_active().await
    }
}
