//! Geocoder adapters.
//!
//! - `SectorGeocoder` - Offline lookup from the postal sector table
//! - `CachedGeocoder` - moka TTL cache in front of any `Geocoder`

mod cached;
mod sector_geocoder;

pub use cached::CachedGeocoder;
pub use sector_geocoder::SectorGeocoder;
