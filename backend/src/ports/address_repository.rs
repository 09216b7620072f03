//! Address repository port.

use async_trait::async_trait;

use crate::domain::address::Address;
use crate::domain::foundation::{AddressId, DomainError, UserId};

/// Repository port for customer addresses.
///
/// Implementations guarantee at most one default address per customer.
#[async_trait]
pub trait AddressRepository: Send + Sync {
    async fn save(&self, address: &Address) -> Result<(), DomainError>;

    /// Inserts a new address and returns it as stored.
    ///
    /// It becomes the customer's default when `make_default` is set or the
    /// customer has no address yet. The previous default is cleared in the
    /// same unit of work, and concurrent creates for one customer do not
    /// interleave.
    async fn create(&self, address: &Address, make_default: bool) -> Result<Address, DomainError>;

    async fn find_by_id(&self, id: &AddressId) -> Result<Option<Address>, DomainError>;

    /// Addresses of a customer, default first, then newest.
    async fn find_by_customer(&self, customer_id: &UserId) -> Result<Vec<Address>, DomainError>;

    /// Clears the customer's current default and marks `id` as default.
    ///
    /// Both writes succeed or neither does.
    ///
    /// # Errors
    ///
    /// - `AddressNotFound` if `id` does not belong to `customer_id`
    async fn set_default(&self, customer_id: &UserId, id: &AddressId) -> Result<Address, DomainError>;

    /// # Errors
    ///
    /// - `AddressNotFound` if the address doesn't exist
    async fn delete(&self, id: &AddressId) -> Result<(), DomainError>;
}
