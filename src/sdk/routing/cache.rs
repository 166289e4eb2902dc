use super::batch::BatchFetcher;
use super::error::RoutingError;
use super::route::{GeometryResult, RouteDirection, RouteDirectionKey};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

struct CacheEntry {
    results: Arc<Vec<GeometryResult>>,
    fetched_at: Instant,
}

// One slot per key. Holding the slot's async mutex across the upstream fetch
// is what collapses concurrent same-key callers onto a single batch.
type Slot = Arc<tokio::sync::Mutex<Option<CacheEntry>>>;

/// Memoizes batch results per (route, direction) with a TTL. Entries are
/// replaced wholesale on expiry, never mutated in place.
pub struct GeometryCache {
    ttl: Duration,
    slots: Mutex<HashMap<RouteDirectionKey, Slot>>,
}

impl GeometryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slots: Mutex::new(HashMap::new()),
        }
    }

    // The map lock is held only long enough to clone the slot handle, so
    // fetches for distinct keys never block each other.
    fn slot(&self, key: &RouteDirectionKey) -> Slot {
        let mut slots = self.slots.lock().expect("cache slot map poisoned");
        Arc::clone(slots.entry(key.clone()).or_default())
    }

    /// Returns the live cached batch for the route's key, or runs one
    /// upstream fetch and caches it. Concurrent calls for the same key
    /// collapse onto a single fetch; an expired entry silently recomputes.
    pub async fn get_or_fetch(
        &self,
        fetcher: &BatchFetcher,
        route: &RouteDirection,
    ) -> Result<Arc<Vec<GeometryResult>>, RoutingError> {
        let key = route.key();
        let slot = self.slot(&key);

        let mut entry = slot.lock().await;
        if let Some(cached) = entry.as_ref() {
            if cached.fetched_at.elapsed() < self.ttl {
                log::debug!("[CACHE HIT] {}", key);
                return Ok(Arc::clone(&cached.results));
            }
            log::debug!("[CACHE EXPIRED] {}", key);
        }

        let results = Arc::new(fetcher.fetch_all(route).await?);
        *entry = Some(CacheEntry {
            results: Arc::clone(&results),
            fetched_at: Instant::now(),
        });
        Ok(results)
    }
}
