//! SetDefaultAddressHandler - Command handler for choosing the default address.

use std::sync::Arc;

use tracing::info;

use super::load_address;
use crate::application::handlers::ensure_access;
use crate::domain::address::Address;
use crate::domain::foundation::{AddressId, CommandMetadata, DomainError};
use crate::ports::AddressRepository;

#[derive(Debug, Clone)]
pub struct SetDefaultAddressCommand {
    pub address_id: AddressId,
}

pub struct SetDefaultAddressHandler {
    addresses: Arc<dyn AddressRepository>,
}

impl SetDefaultAddressHandler {
    pub fn new(addresses: Arc<dyn AddressRepository>) -> Self {
        Self { addresses }
    }

    pub async fn handle(
        &self,
        cmd: SetDefaultAddressCommand,
        metadata: CommandMetadata,
    ) -> Result<Address, DomainError> {
        let address = load_address(self.addresses.as_ref(), &cmd.address_id).await?;
        ensure_access(&address, &metadata)?;

        // Clearing the old default and setting the new one is a single repository call.
        let updated = self
            .addresses
            .set_default(address.customer_id(), address.id())
            .await?;

        info!(address_id = %updated.id(), customer_id = %updated.customer_id(), "default address changed");
        Ok(updated)
    }
}
