//! Region classifier with an LRU/TTL cache in front of it.
//!
//! Keys are normalised (lower-cased, whitespace collapsed), so the same
//! address in any case or spacing is a single cache entry.

use moka::sync::Cache;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::domain::region::{self, Region};
use crate::ports::RegionClassifier;

/// Default number of cached addresses.
pub const DEFAULT_REGION_CACHE_CAPACITY: u64 = 10_000;

/// Default time an entry stays cached.
pub const DEFAULT_REGION_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// Cache hit/miss counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

pub struct CachedRegionClassifier {
    cache: Cache<String, Region>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CachedRegionClassifier {
    pub fn new(max_capacity: u64, ttl: Duration) -> Self {
        Self {
            cache: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn classify(&self, address: &str) -> Region {
        let key = region::normalize_address(address);
        if let Some(region) = self.cache.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return region;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let region = region::classify(&key);
        self.cache.insert(key, region);
        region
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}

impl Default for CachedRegionClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_REGION_CACHE_CAPACITY, DEFAULT_REGION_CACHE_TTL)
    }
}

impl RegionClassifier for CachedRegionClassifier {
    fn classify(&self, address: &str) -> Region {
        CachedRegionClassifier::classify(self, address)
    }
}

impl std::fmt::Debug for CachedRegionClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedRegionClassifier")
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}
