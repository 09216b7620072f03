//! Geocoding query handlers.

mod geocode_postal_code;

pub use geocode_postal_code::{
    GeocodePostalCodeHandler, GeocodePostalCodeQuery, GeocodeResponse, GeocodeStatus,
};
