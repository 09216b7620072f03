//! Service categories offered by the business.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Slot length for short jobs.
pub const STANDARD_SLOT_MINUTES: u32 = 60;

/// Slot length for long jobs (AMC visits, overhauls, installations).
pub const EXTENDED_SLOT_MINUTES: u32 = 90;

/// Kind of work a service involves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    GeneralServicing,
    ChemicalWash,
    ChemicalOverhaul,
    GasTopUp,
    Repair,
    Installation,
    /// Annual Maintenance Contract visit.
    Amc,
}

impl ServiceCategory {
    /// Returns true for Annual Maintenance Contract visits.
    pub fn is_amc(&self) -> bool {
        matches!(self, ServiceCategory::Amc)
    }

    /// Length of one bookable slot for this category.
    pub fn slot_interval_minutes(&self) -> u32 {
        match self {
            ServiceCategory::Amc | ServiceCategory::ChemicalOverhaul | ServiceCategory::Installation => {
                EXTENDED_SLOT_MINUTES
            }
            ServiceCategory::GeneralServicing
            | ServiceCategory::ChemicalWash
            | ServiceCategory::GasTopUp
            | ServiceCategory::Repair => STANDARD_SLOT_MINUTES,
        }
    }

    /// Stable identifier used in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCategory::GeneralServicing => "general_servicing",
            ServiceCategory::ChemicalWash => "chemical_wash",
            ServiceCategory::ChemicalOverhaul => "chemical_overhaul",
            ServiceCategory::GasTopUp => "gas_top_up",
            ServiceCategory::Repair => "repair",
            ServiceCategory::Installation => "installation",
            ServiceCategory::Amc => "amc",
        }
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ServiceCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general_servicing" => Ok(ServiceCategory::GeneralServicing),
            "chemical_wash" => Ok(ServiceCategory::ChemicalWash),
            "chemical_overhaul" => Ok(ServiceCategory::ChemicalOverhaul),
            "gas_top_up" => Ok(ServiceCategory::GasTopUp),
            "repair" => Ok(ServiceCategory::Repair),
            "installation" => Ok(ServiceCategory::Installation),
            "amc" => Ok(ServiceCategory::Amc),
            other => Err(ValidationError::invalid_format(
                "category",
                format!("unknown service category '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amc_uses_extended_slots() {
        assert!(ServiceCategory::Amc.is_amc());
        assert_eq!(ServiceCategory::Amc.slot_interval_minutes(), 90);
        assert_eq!(ServiceCategory::Installation.slot_interval_minutes(), 90);
    }

    #[test]
    fn servicing_uses_standard_slots() {
        assert!(!ServiceCategory::GeneralServicing.is_amc());
        assert_eq!(ServiceCategory::GeneralServicing.slot_interval_minutes(), 60);
        assert_eq!(ServiceCategory::GasTopUp.slot_interval_minutes(), 60);
    }

    #[test]
    fn storage_names_round_trip() {
        for category in [
            ServiceCategory::GeneralServicing,
            ServiceCategory::ChemicalWash,
            ServiceCategory::ChemicalOverhaul,
            ServiceCategory::GasTopUp,
            ServiceCategory::Repair,
            ServiceCategory::Installation,
            ServiceCategory::Amc,
        ] {
            assert_eq!(category.as_str().parse::<ServiceCategory>().unwrap(), category);
        }
    }
}
