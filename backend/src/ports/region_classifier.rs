//! Region classifier port.
//!
//! Address classification is pure, but it is called on every slot lookup, so
//! the production implementation sits behind a cache.

use crate::domain::region::Region;

/// Maps a free-form address or postal code to a scheduling region.
pub trait RegionClassifier: Send + Sync {
    fn classify(&self, address: &str) -> Region;
}

/// Uncached classification straight from the domain rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectRegionClassifier;

impl RegionClassifier for DirectRegionClassifier {
    fn classify(&self, address: &str) -> Region {
        crate::domain::region::classify(address)
    }
}
