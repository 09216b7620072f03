//! Address command and query handlers.

mod create_address;
mod delete_address;
mod list_addresses;
mod set_default_address;

pub use create_address::{CreateAddressCommand, CreateAddressHandler};
pub use delete_address::{DeleteAddressCommand, DeleteAddressHandler};
pub use list_addresses::{ListAddressesHandler, ListAddressesQuery};
pub use set_default_address::{SetDefaultAddressCommand, SetDefaultAddressHandler};

use crate::domain::address::Address;
use crate::domain::foundation::{AddressId, DomainError, ErrorCode};
use crate::ports::AddressRepository;

pub(crate) async fn load_address(
    addresses: &dyn AddressRepository,
    id: &AddressId,
) -> Result<Address, DomainError> {
    addresses
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::new(ErrorCode::AddressNotFound, format!("Address {} not found", id)))
}
