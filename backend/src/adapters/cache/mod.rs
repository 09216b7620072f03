//! In-process caches.

mod region_classifier;

pub use region_classifier::{
    CacheStats, CachedRegionClassifier, DEFAULT_REGION_CACHE_CAPACITY, DEFAULT_REGION_CACHE_TTL,
};
