//! Geocoder decorator caching lookups in a moka TTL cache.

use async_trait::async_trait;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::address::PostalCode;
use crate::ports::{GeocodeError, GeocodeResult, Geocoder};

/// Caches successful lookups (including empty ones) per postal code.
/// Errors are never cached.
pub struct CachedGeocoder {
    inner: Arc<dyn Geocoder>,
    cache: Cache<String, Vec<GeocodeResult>>,
}

impl CachedGeocoder {
    pub fn new(inner: Arc<dyn Geocoder>, max_capacity: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();
        Self { inner, cache }
    }
}

#[async_trait]
impl Geocoder for CachedGeocoder {
    async fn geocode(&self, postal_code: &PostalCode) -> Result<Vec<GeocodeResult>, GeocodeError> {
        let key = postal_code.as_str().to_string();
        if let Some(hit) = self.cache.get(&key).await {
            tracing::debug!(postal_code = %postal_code, "geocode cache hit");
            return Ok(hit);
        }

        let results = self.inner.geocode(postal_code).await?;
        self.cache.insert(key, results.clone()).await;
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingGeocoder {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl Geocoder for CountingGeocoder {
        async fn geocode(&self, _code: &PostalCode) -> Result<Vec<GeocodeResult>, GeocodeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(GeocodeError::Unavailable("down".into()));
            }
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn second_lookup_is_served_from_cache() {
        let inner = Arc::new(CountingGeocoder::default());
        let cached = CachedGeocoder::new(inner.clone(), 100, Duration::from_secs(60));
        let code = PostalCode::new("520201").unwrap();

        cached.geocode(&code).await.unwrap();
        cached.geocode(&code).await.unwrap();
        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let inner = Arc::new(CountingGeocoder {
            fail: true,
            ..Default::default()
        });
        let cached = CachedGeocoder::new(inner.clone(), 100, Duration::from_secs(60));
        let code = PostalCode::new("520201").unwrap();

        assert!(cached.geocode(&code).await.is_err());
        assert!(cached.geocode(&code).await.is_err());
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }
}
