//! Customer address entity.

use serde::{Deserialize, Serialize};

use super::{PostalCode, UnitNumber};
use crate::domain::foundation::{AddressId, DomainError, OwnedByUser, Timestamp, UserId, ValidationError};
use crate::domain::region::{self, Region};

/// Maximum length for the label and street fields.
pub const MAX_LABEL_LENGTH: usize = 50;
pub const MAX_STREET_LENGTH: usize = 200;

/// A service location saved by a customer.
///
/// # Invariants
///
/// - `label` and `street` are non-empty
/// - `region` is derived from street and postal code at creation
/// - At most one address per customer is default (enforced by the repository)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    id: AddressId,
    customer_id: UserId,
    label: String,
    street: String,
    unit_number: Option<UnitNumber>,
    postal_code: PostalCode,
    region: Region,
    is_default: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Address {
    /// Create a new, non-default address and classify its region.
    pub fn new(
        customer_id: UserId,
        label: impl Into<String>,
        street: impl Into<String>,
        unit_number: Option<String>,
        postal_code: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let label = required("label", label.into(), MAX_LABEL_LENGTH)?;
        let street = required("street", street.into(), MAX_STREET_LENGTH)?;
        let unit_number = unit_number
            .filter(|u| !u.trim().is_empty())
            .map(UnitNumber::new)
            .transpose()?;
        let postal_code = PostalCode::new(postal_code)?;
        let region = region::classify(&format!("{} {}", street, postal_code));

        let now = Timestamp::now();
        Ok(Self {
            id: AddressId::new(),
            customer_id,
            label,
            street,
            unit_number,
            postal_code,
            region,
            is_default: false,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute an address from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: AddressId,
        customer_id: UserId,
        label: String,
        street: String,
        unit_number: Option<UnitNumber>,
        postal_code: PostalCode,
        region: Region,
        is_default: bool,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            customer_id,
            label,
            street,
            unit_number,
            postal_code,
            region,
            is_default,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &AddressId {
        &self.id
    }

    pub fn customer_id(&self) -> &UserId {
        &self.customer_id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn unit_number(&self) -> Option<&UnitNumber> {
        self.unit_number.as_ref()
    }

    pub fn postal_code(&self) -> &PostalCode {
        &self.postal_code
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn is_default(&self) -> bool {
        self.is_default
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// One-line form, e.g. `Blk 1 Tampines St 11 #04-123 Singapore 521001`.
    pub fn formatted(&self) -> String {
        match &self.unit_number {
            Some(unit) => format!("{} {} Singapore {}", self.street, unit, self.postal_code),
            None => format!("{} Singapore {}", self.street, self.postal_code),
        }
    }

    pub fn set_default(&mut self) {
        self.is_default = true;
        self.updated_at = Timestamp::now();
    }

    pub fn clear_default(&mut self) {
        self.is_default = false;
        self.updated_at = Timestamp::now();
    }
}

impl OwnedByUser for Address {
    fn owner_id(&self) -> &UserId {
        &self.customer_id
    }
}

fn required(field: &str, value: String, max: usize) -> Result<String, ValidationError> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    let len = value.chars().count();
    if len > max {
        return Err(ValidationError::out_of_range(field, 1, max as i64, len as i64));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    fn customer() -> UserId {
        UserId::new("customer-1").unwrap()
    }

    #[test]
    fn classifies_region_from_street() {
        let address = Address::new(customer(), "Home", "Blk 123 Tampines St 11", Some("#04-123".into()), "521123")
            .unwrap();
        assert_eq!(address.region(), Region::East);
        assert!(!address.is_default());
    }

    #[test]
    fn classifies_region_from_postal_code_when_street_is_generic() {
        let address = Address::new(customer(), "Office", "1 Some Road", None, "730001").unwrap();
        assert_eq!(address.region(), Region::North);
    }

    #[test]
    fn blank_unit_number_is_ignored() {
        let address = Address::new(customer(), "Home", "1 Bedok Road", Some("  ".into()), "460001").unwrap();
        assert!(address.unit_number().is_none());
        assert_eq!(address.formatted(), "1 Bedok Road Singapore 460001");
    }

    #[test]
    fn rejects_bad_postal_code() {
        let err = Address::new(customer(), "Home", "1 Bedok Road", None, "4600").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.details.get("field").map(String::as_str), Some("postal_code"));
    }

    #[test]
    fn rejects_empty_label() {
        let err = Address::new(customer(), " ", "1 Bedok Road", None, "460001").unwrap_err();
        assert_eq!(err.details.get("field").map(String::as_str), Some("label"));
    }

    #[test]
    fn default_flag_toggles() {
        let mut address = Address::new(customer(), "Home", "1 Bedok Road", None, "460001").unwrap();
        address.set_default();
        assert!(address.is_default());
        address.clear_default();
        assert!(!address.is_default());
    }
}
