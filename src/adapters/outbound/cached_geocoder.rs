//! Cached Geocoder
//!
//! Wraps any GeocodeProvider with a DashMap-backed memoization layer so
//! repeated identical queries within the TTL window never re-hit the
//! network.

use crate::domain::entities::GeocodeResult;
use crate::domain::ports::GeocodeProvider;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// One memoized provider answer.
///
/// Misses are cached too: a query that resolved to nothing stays "nothing"
/// for the full TTL, exactly like a hit.
#[derive(Debug, Clone)]
struct CacheEntry {
    result: Option<GeocodeResult>,
    fetched_at: Instant,
}

/// TTL-memoizing decorator around a geocode provider.
///
/// Entries are keyed by the exact query string (case- and
/// whitespace-sensitive). Expiry is checked lazily on lookup; an optional
/// background sweep reclaims entries nobody asks for again. Concurrent
/// identical misses may each pay one provider call; the writes are
/// idempotent so the race is harmless.
pub struct CachedGeocoder {
    inner: Arc<dyn GeocodeProvider>,
    entries: Arc<DashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl CachedGeocoder {
    /// Create a new cache over `inner` with the given time-to-live.
    pub fn new(inner: Arc<dyn GeocodeProvider>, ttl: Duration) -> Self {
        Self {
            inner,
            entries: Arc::new(DashMap::new()),
            ttl,
        }
    }

    /// Start the background sweep task.
    ///
    /// Removes entries whose TTL has lapsed. Lookup correctness never
    /// depends on the sweep; it only bounds memory.
    pub fn start_gc(&self, interval: Duration) {
        let entries = self.entries.clone();
        let ttl = self.ttl;

        tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;

                let now = Instant::now();
                let mut to_remove = Vec::new();

                for entry in entries.iter() {
                    if now.duration_since(entry.value().fetched_at) > ttl {
                        to_remove.push(entry.key().clone());
                    }
                }

                let removed_count = to_remove.len();
                for key in to_remove {
                    entries.remove(&key);
                }

                if removed_count > 0 {
                    tracing::debug!("cache GC removed {} expired entries", removed_count);
                }
            }
        });
    }

    /// Remove all expired entries immediately.
    pub fn cleanup_expired(&self) -> usize {
        let now = Instant::now();
        let mut to_remove = Vec::new();

        for entry in self.entries.iter() {
            if now.duration_since(entry.value().fetched_at) > self.ttl {
                to_remove.push(entry.key().clone());
            }
        }

        let count = to_remove.len();
        for key in to_remove {
            self.entries.remove(&key);
        }

        count
    }

    /// Number of cached entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn fresh(&self, query: &str) -> Option<Option<GeocodeResult>> {
        let entry = self.entries.get(query)?;
        if entry.fetched_at.elapsed() > self.ttl {
            return None;
        }
        Some(entry.result.clone())
    }
}

#[async_trait]
impl GeocodeProvider for CachedGeocoder {
    async fn geocode(&self, query: &str) -> Option<GeocodeResult> {
        if let Some(cached) = self.fresh(query) {
            tracing::debug!("cache hit for {:?}", query);
            return cached;
        }

        let result = self.inner.geocode(query).await;
        self.entries.insert(
            query.to_string(),
            CacheEntry {
                result: result.clone(),
                fetched_at: Instant::now(),
            },
        );

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Inner provider stub counting how often the "network" is hit.
    struct CountingProvider {
        calls: AtomicUsize,
        response: Option<GeocodeResult>,
    }

    impl CountingProvider {
        fn returning(response: Option<GeocodeResult>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                response,
            })
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GeocodeProvider for CountingProvider {
        async fn geocode(&self, _query: &str) -> Option<GeocodeResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response.clone()
        }
    }

    fn sample_result() -> GeocodeResult {
        GeocodeResult::new(40.7128, -74.0060, "New York, NY, USA".to_string(), 0.2)
    }

    fn one_hour() -> Duration {
        Duration::from_secs(3600)
    }

    /// Rewind an entry's fetch time so it looks older than it is.
    fn age_entry(cache: &CachedGeocoder, query: &str, by: Duration) {
        let mut entry = cache.entries.get_mut(query).unwrap();
        entry.fetched_at = Instant::now() - by;
    }

    // ===== Hit/Miss Tests =====

    #[tokio::test]
    async fn test_second_identical_query_is_served_from_cache() {
        let inner = CountingProvider::returning(Some(sample_result()));
        let cache = CachedGeocoder::new(inner.clone(), one_hour());

        let first = cache.geocode("New York").await;
        let second = cache.geocode("New York").await;

        assert_eq!(first, Some(sample_result()));
        assert_eq!(second, Some(sample_result()));
        assert_eq!(inner.call_count(), 1);
    }

    #[tokio::test]
    async fn test_distinct_queries_each_hit_the_provider() {
        let inner = CountingProvider::returning(Some(sample_result()));
        let cache = CachedGeocoder::new(inner.clone(), one_hour());

        cache.geocode("New York").await;
        cache.geocode("Boston").await;

        assert_eq!(inner.call_count(), 2);
    }

    #[tokio::test]
    async fn test_keys_are_case_and_whitespace_sensitive() {
        let inner = CountingProvider::returning(Some(sample_result()));
        let cache = CachedGeocoder::new(inner.clone(), one_hour());

        cache.geocode("New York").await;
        cache.geocode("new york").await;
        cache.geocode("New York ").await;

        assert_eq!(inner.call_count(), 3);
    }

    #[tokio::test]
    async fn test_misses_are_cached_too() {
        let inner = CountingProvider::returning(None);
        let cache = CachedGeocoder::new(inner.clone(), one_hour());

        assert!(cache.geocode("Atlantis").await.is_none());
        assert!(cache.geocode("Atlantis").await.is_none());

        assert_eq!(inner.call_count(), 1);
    }

    // ===== TTL Tests =====

    #[tokio::test]
    async fn test_expired_entry_triggers_refetch() {
        let inner = CountingProvider::returning(Some(sample_result()));
        let cache = CachedGeocoder::new(inner.clone(), one_hour());

        cache.geocode("New York").await;
        age_entry(&cache, "New York", Duration::from_secs(3601));

        cache.geocode("New York").await;

        assert_eq!(inner.call_count(), 2);
    }

    #[tokio::test]
    async fn test_entry_just_inside_ttl_is_still_served() {
        let inner = CountingProvider::returning(Some(sample_result()));
        let cache = CachedGeocoder::new(inner.clone(), one_hour());

        cache.geocode("New York").await;
        age_entry(&cache, "New York", Duration::from_secs(3500));

        cache.geocode("New York").await;

        assert_eq!(inner.call_count(), 1);
    }

    // ===== Cleanup Tests =====

    #[tokio::test]
    async fn test_cleanup_expired_removes_only_stale_entries() {
        let inner = CountingProvider::returning(Some(sample_result()));
        let cache = CachedGeocoder::new(inner.clone(), one_hour());

        cache.geocode("old").await;
        cache.geocode("fresh").await;
        age_entry(&cache, "old", Duration::from_secs(7200));

        let removed = cache.cleanup_expired();

        assert_eq!(removed, 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_cleanup_on_empty_cache() {
        let inner = CountingProvider::returning(None);
        let cache = CachedGeocoder::new(inner, one_hour());

        assert_eq!(cache.cleanup_expired(), 0);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_start_gc_sweeps_expired_entries() {
        let inner = CountingProvider::returning(Some(sample_result()));
        let cache = CachedGeocoder::new(inner, Duration::from_millis(50));

        cache.geocode("New York").await;
        age_entry(&cache, "New York", Duration::from_millis(200));

        cache.start_gc(Duration::from_millis(20));
        tokio::time::sleep(Duration::from_millis(60)).await;

        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_len_counts_entries() {
        let inner = CountingProvider::returning(Some(sample_result()));
        let cache = CachedGeocoder::new(inner, one_hour());

        assert_eq!(cache.len(), 0);
        cache.geocode("a").await;
        cache.geocode("b").await;
        assert_eq!(cache.len(), 2);
    }
}
