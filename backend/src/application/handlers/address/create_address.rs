//! CreateAddressHandler - Command handler for saving a service location.

use std::sync::Arc;

use tracing::info;

use crate::domain::address::Address;
use crate::domain::foundation::{CommandMetadata, DomainError};
use crate::ports::AddressRepository;

#[derive(Debug, Clone)]
pub struct CreateAddressCommand {
    pub label: String,
    pub street: String,
    pub unit_number: Option<String>,
    pub postal_code: String,
    pub make_default: bool,
}

pub struct CreateAddressHandler {
    addresses: Arc<dyn AddressRepository>,
}

impl CreateAddressHandler {
    pub fn new(addresses: Arc<dyn AddressRepository>) -> Self {
        Self { addresses }
    }

    /// A customer's first address always becomes the default.
    pub async fn handle(
        &self,
        cmd: CreateAddressCommand,
        metadata: CommandMetadata,
    ) -> Result<Address, DomainError> {
        let address = Address::new(
            metadata.user_id.clone(),
            cmd.label,
            cmd.street,
            cmd.unit_number,
            cmd.postal_code,
        )?;
        let address = self.addresses.create(&address, cmd.make_default).await?;

        info!(
            address_id = %address.id(),
            customer_id = %metadata.user_id,
            region = %address.region(),
            is_default = address.is_default(),
            "address created"
        );
        Ok(address)
    }
}
