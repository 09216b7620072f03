//! Postal code and unit number value objects.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;
use crate::domain::region::{classify_postal_code, Region};

/// A six-digit Singapore postal code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostalCode(String);

impl PostalCode {
    pub fn new(code: impl Into<String>) -> Result<Self, ValidationError> {
        let code = code.into().trim().to_string();
        if code.is_empty() {
            return Err(ValidationError::empty_field("postal_code"));
        }
        if code.len() != 6 || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::invalid_format(
                "postal_code",
                "must be exactly 6 digits",
            ));
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Region by postal sector, if the sector is issued.
    pub fn region(&self) -> Option<Region> {
        classify_postal_code(&self.0)
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PostalCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PostalCode> for String {
    fn from(code: PostalCode) -> Self {
        code.0
    }
}

/// Floor and unit, written `#NN-NNN` (e.g. `#04-123`, `#12-05A`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UnitNumber(String);

impl UnitNumber {
    pub fn new(unit: impl Into<String>) -> Result<Self, ValidationError> {
        let unit = unit.into().trim().to_uppercase();
        if !Self::is_well_formed(&unit) {
            return Err(ValidationError::invalid_format(
                "unit_number",
                "expected #floor-unit, e.g. #04-123",
            ));
        }
        Ok(Self(unit))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_well_formed(unit: &str) -> bool {
        let Some(rest) = unit.strip_prefix('#') else {
            return false;
        };
        let Some((floor, number)) = rest.split_once('-') else {
            return false;
        };
        let number = number.strip_suffix(|c: char| c.is_ascii_uppercase()).unwrap_or(number);

        (2..=3).contains(&floor.len())
            && floor.bytes().all(|b| b.is_ascii_digit())
            && (2..=5).contains(&number.len())
            && number.bytes().all(|b| b.is_ascii_digit())
    }
}

impl fmt::Display for UnitNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for UnitNumber {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UnitNumber> for String {
    fn from(unit: UnitNumber) -> Self {
        unit.0
    }
}
