//! ListAddressesHandler - Query handler for a customer's addresses.

use std::sync::Arc;

use crate::domain::address::Address;
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::AddressRepository;

#[derive(Debug, Clone)]
pub struct ListAddressesQuery {
    pub customer_id: UserId,
}

pub struct ListAddressesHandler {
    addresses: Arc<dyn AddressRepository>,
}

impl ListAddressesHandler {
    pub fn new(addresses: Arc<dyn AddressRepository>) -> Self {
        Self { addresses }
    }

    /// Default address first, then by creation time.
    pub async fn handle(&self, query: ListAddressesQuery) -> Result<Vec<Address>, DomainError> {
        let mut addresses = self.addresses.find_by_customer(&query.customer_id).await?;
        addresses.sort_by(|a, b| {
            b.is_default()
                .cmp(&a.is_default())
                .then_with(|| a.created_at().cmp(b.created_at()))
        });
        Ok(addresses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryAddressRepository;
    use crate::application::handlers::test_support::*;

    #[tokio::test]
    async fn default_address_is_listed_first() {
        let repo = Arc::new(InMemoryAddressRepository::new());
        let office = address("cust-1", "018956");
        let home = address("cust-1", "521123");
        repo.save(&office).await.unwrap();
        repo.save(&home).await.unwrap();
        repo.save(&address("cust-2", "650123")).await.unwrap();
        repo.set_default(&user("cust-1"), home.id()).await.unwrap();

        let listed = ListAddressesHandler::new(repo)
            .handle(ListAddressesQuery {
                customer_id: user("cust-1"),
            })
            .await
            .unwrap();

        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id(), home.id());
    }
}
