//! Request and response bodies for address endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::address::Address;
use crate::domain::foundation::{AddressId, Timestamp};
use crate::domain::region::Region;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAddressRequest {
    #[serde(default = "default_label")]
    pub label: String,
    pub street: String,
    #[serde(default)]
    pub unit_number: Option<String>,
    pub postal_code: String,
    #[serde(default)]
    pub make_default: bool,
}

fn default_label() -> String {
    "Home".to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct AddressResponse {
    pub id: AddressId,
    pub label: String,
    pub street: String,
    pub unit_number: Option<String>,
    pub postal_code: String,
    pub region: Region,
    pub is_default: bool,
    /// Single-line form for display, e.g. `Blk 123 Tampines St 11 #05-123 Singapore 521123`.
    pub formatted: String,
    pub created_at: Timestamp,
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        Self {
            id: *address.id(),
            label: address.label().to_string(),
            street: address.street().to_string(),
            unit_number: address.unit_number().map(|unit| unit.to_string()),
            postal_code: address.postal_code().to_string(),
            region: address.region(),
            is_default: address.is_default(),
            formatted: address.formatted(),
            created_at: *address.created_at(),
        }
    }
}
