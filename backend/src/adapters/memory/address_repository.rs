//! In-memory address repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::address::Address;
use crate::domain::foundation::{AddressId, DomainError, ErrorCode, UserId};
use crate::ports::AddressRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryAddressRepository {
    addresses: Arc<RwLock<HashMap<AddressId, Address>>>,
}

impl InMemoryAddressRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(id: &AddressId) -> DomainError {
    DomainError::new(ErrorCode::AddressNotFound, format!("Address {} not found", id))
}

#[async_trait]
impl AddressRepository for InMemoryAddressRepository {
    async fn save(&self, address: &Address) -> Result<(), DomainError> {
        self.addresses
            .write()
            .await
            .insert(*address.id(), address.clone());
        Ok(())
    }

    async fn create(&self, address: &Address, make_default: bool) -> Result<Address, DomainError> {
        let mut addresses = self.addresses.write().await;
        if addresses.contains_key(address.id()) {
            return Err(DomainError::new(
                ErrorCode::AlreadyExists,
                format!("Address {} already exists", address.id()),
            ));
        }

        let customer_id = address.customer_id();
        let first = !addresses.values().any(|a| a.customer_id() == customer_id);
        let mut created = address.clone();
        if make_default || first {
            for other in addresses.values_mut().filter(|a| a.customer_id() == customer_id) {
                if other.is_default() {
                    other.clear_default();
                }
            }
            created.set_default();
        }
        addresses.insert(*created.id(), created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: &AddressId) -> Result<Option<Address>, DomainError> {
        Ok(self.addresses.read().await.get(id).cloned())
    }

    async fn find_by_customer(&self, customer_id: &UserId) -> Result<Vec<Address>, DomainError> {
        let mut found: Vec<Address> = self
            .addresses
            .read()
            .await
            .values()
            .filter(|a| a.customer_id() == customer_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            b.is_default()
                .cmp(&a.is_default())
                .then_with(|| a.created_at().cmp(b.created_at()))
        });
        Ok(found)
    }

    async fn set_default(&self, customer_id: &UserId, id: &AddressId) -> Result<Address, DomainError> {
        let mut addresses = self.addresses.write().await;
        match addresses.get(id) {
            Some(a) if a.customer_id() == customer_id => {}
            _ => return Err(not_found(id)),
        }

        let mut updated = None;
        for address in addresses.values_mut().filter(|a| a.customer_id() == customer_id) {
            if address.id() == id {
                address.set_default();
                updated = Some(address.clone());
            } else if address.is_default() {
                address.clear_default();
            }
        }
        updated.ok_or_else(|| not_found(id))
    }

    async fn delete(&self, id: &AddressId) -> Result<(), DomainError> {
        self.addresses
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(customer: &str, postal: &str) -> Address {
        Address::new(
            UserId::new(customer).unwrap(),
            "Home",
            "10 Tampines Central 1",
            None,
            postal,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn set_default_leaves_exactly_one_default() {
        let repo = InMemoryAddressRepository::new();
        let first = address("u1", "529510");
        let second = address("u1", "529511");
        repo.save(&first).await.unwrap();
        repo.save(&second).await.unwrap();

        repo.set_default(first.customer_id(), first.id()).await.unwrap();
        repo.set_default(second.customer_id(), second.id()).await.unwrap();

        let all = repo.find_by_customer(first.customer_id()).await.unwrap();
        let defaults: Vec<_> = all.iter().filter(|a| a.is_default()).collect();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].id(), second.id());
        assert_eq!(all[0].id(), second.id());
    }

    #[tokio::test]
    async fn set_default_does_not_touch_other_customers() {
        let repo = InMemoryAddressRepository::new();
        let mine = address("u1", "529510");
        let mut theirs = address("u2", "529511");
        theirs.set_default();
        repo.save(&mine).await.unwrap();
        repo.save(&theirs).await.unwrap();

        repo.set_default(mine.customer_id(), mine.id()).await.unwrap();
        let theirs_after = repo.find_by_id(theirs.id()).await.unwrap().unwrap();
        assert!(theirs_after.is_default());
    }

    #[tokio::test]
    async fn set_default_on_foreign_address_is_not_found() {
        let repo = InMemoryAddressRepository::new();
        let theirs = address("u2", "529511");
        repo.save(&theirs).await.unwrap();
        let err = repo
            .set_default(&UserId::new("u1").unwrap(), theirs.id())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::AddressNotFound);
    }

    #[tokio::test]
    async fn create_defaults_the_first_address_only() {
        let repo = InMemoryAddressRepository::new();
        let first = repo.create(&address("u1", "529510"), false).await.unwrap();
        let second = repo.create(&address("u1", "529511"), false).await.unwrap();

        assert!(first.is_default());
        assert!(!second.is_default());
    }

    #[tokio::test]
    async fn create_as_default_clears_the_previous_one() {
        let repo = InMemoryAddressRepository::new();
        let first = repo.create(&address("u1", "529510"), false).await.unwrap();
        let theirs = repo.create(&address("u2", "529512"), false).await.unwrap();

        let second = repo.create(&address("u1", "529511"), true).await.unwrap();

        assert!(second.is_default());
        assert!(!repo.find_by_id(first.id()).await.unwrap().unwrap().is_default());
        assert!(repo.find_by_id(theirs.id()).await.unwrap().unwrap().is_default());
    }

    #[tokio::test]
    async fn concurrent_first_addresses_leave_one_default() {
        let repo = InMemoryAddressRepository::new();
        let (a, b) = (address("u1", "529510"), address("u1", "529511"));

        let (ra, rb) = tokio::join!(repo.create(&a, false), repo.create(&b, false));
        ra.unwrap();
        rb.unwrap();

        let all = repo.find_by_customer(a.customer_id()).await.unwrap();
        assert_eq!(all.iter().filter(|addr| addr.is_default()).count(), 1);
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let repo = InMemoryAddressRepository::new();
        let err = repo.delete(&AddressId::new()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AddressNotFound);
    }
}
