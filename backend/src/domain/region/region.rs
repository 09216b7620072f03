//! The five Singapore scheduling regions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Geographic zone used for scheduling preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    #[default]
    Central,
    North,
    NorthEast,
    East,
    West,
}

impl Region {
    /// All regions in display order.
    pub const ALL: [Region; 5] = [
        Region::Central,
        Region::North,
        Region::NorthEast,
        Region::East,
        Region::West,
    ];

    /// Stable identifier used in storage and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Central => "central",
            Region::North => "north",
            Region::NorthEast => "north_east",
            Region::East => "east",
            Region::West => "west",
        }
    }

    /// Human readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Region::Central => "Central",
            Region::North => "North",
            Region::NorthEast => "North-East",
            Region::East => "East",
            Region::West => "West",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Region {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "central" => Ok(Region::Central),
            "north" => Ok(Region::North),
            "north_east" | "northeast" => Ok(Region::NorthEast),
            "east" => Ok(Region::East),
            "west" => Ok(Region::West),
            other => Err(ValidationError::invalid_format(
                "region",
                format!("unknown region '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_region_is_central() {
        assert_eq!(Region::default(), Region::Central);
    }

    #[test]
    fn parses_storage_and_display_forms() {
        for region in Region::ALL {
            assert_eq!(region.as_str().parse::<Region>().unwrap(), region);
            assert_eq!(region.display_name().parse::<Region>().unwrap(), region);
        }
    }

    #[test]
    fn rejects_unknown_region() {
        assert!("south".parse::<Region>().is_err());
    }

    #[test]
    fn serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Region::NorthEast).unwrap(), "\"north_east\"");
    }
}
