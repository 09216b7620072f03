//! Service catalog port.

use async_trait::async_trait;

use crate::domain::catalog::Service;
use crate::domain::foundation::{DomainError, ServiceId};

/// Read and seed access to bookable services.
#[async_trait]
pub trait ServiceCatalog: Send + Sync {
    /// Active services ordered by title.
    async fn list_active(&self) -> Result<Vec<Service>, DomainError>;

    /// Find a service by ID, active or not.
    async fn find_by_id(&self, id: &ServiceId) -> Result<Option<Service>, DomainError>;

    /// Insert or replace a service.
    async fn save(&self, service: &Service) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_catalog_is_object_safe() {
        fn _accepts_dyn(_catalog: &dyn ServiceCatalog) {}
    }
}
