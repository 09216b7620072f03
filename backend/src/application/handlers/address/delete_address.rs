//! DeleteAddressHandler - Command handler for removing an address.

use std::sync::Arc;

use tracing::info;

use super::load_address;
use crate::application::handlers::ensure_access;
use crate::domain::foundation::{AddressId, CommandMetadata, DomainError};
use crate::ports::AddressRepository;

#[derive(Debug, Clone)]
pub struct DeleteAddressCommand {
    pub address_id: AddressId,
}

pub struct DeleteAddressHandler {
    addresses: Arc<dyn AddressRepository>,
}

impl DeleteAddressHandler {
    pub fn new(addresses: Arc<dyn AddressRepository>) -> Self {
        Self { addresses }
    }

    pub async fn handle(&self, cmd: DeleteAddressCommand, metadata: CommandMetadata) -> Result<(), DomainError> {
        let address = load_address(self.addresses.as_ref(), &cmd.address_id).await?;
        ensure_access(&address, &metadata)?;

        self.addresses.delete(address.id()).await?;
        info!(address_id = %address.id(), customer_id = %address.customer_id(), "address deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryAddressRepository;
    use crate::application::handlers::test_support::*;
    use crate::domain::foundation::ErrorCode;

    #[tokio::test]
    async fn owner_deletes_address() {
        let repo = Arc::new(InMemoryAddressRepository::new());
        let a = address("cust-1", "018956");
        repo.save(&a).await.unwrap();

        DeleteAddressHandler::new(repo.clone())
            .handle(DeleteAddressCommand { address_id: *a.id() }, customer("cust-1"))
            .await
            .unwrap();
        assert!(repo.find_by_id(a.id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn deleting_missing_address_is_not_found() {
        let err = DeleteAddressHandler::new(Arc::new(InMemoryAddressRepository::new()))
            .handle(DeleteAddressCommand { address_id: AddressId::new() }, customer("cust-1"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::AddressNotFound);
    }
}
