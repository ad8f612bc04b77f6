//! Time-windowed response cache keyed by request identity.
//!
//! Each identity holds at most one live entry. A store always replaces the
//! previous entry as a whole, so readers observe either the old response or
//! the new one, never a mix. There is no explicit invalidation: entries only
//! go stale when their deadline passes, and stale entries are reclaimed
//! lazily on lookup or by the periodic sweep.

use crate::storage::cache::clock::{Clock, SystemClock};
use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::interval;

/// Identity of an outbound request: resource path plus its raw query string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestKey {
    path: String,
    query: Option<String>,
}

impl RequestKey {
    /// Splits a relative resource locator such as `/products/search?q=cap`.
    pub fn from_resource(resource: &str) -> Self {
        match resource.split_once('?') {
            Some((path, query)) if !query.is_empty() => Self {
                path: path.to_string(),
                query: Some(query.to_string()),
            },
            Some((path, _)) => Self {
                path: path.to_string(),
                query: None,
            },
            None => Self {
                path: resource.to_string(),
                query: None,
            },
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }
}

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.query {
            Some(q) => write!(f, "{}?{}", self.path, q),
            None => f.write_str(&self.path),
        }
    }
}

/// Freshness policy attached to an outbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Always go upstream and never record the response.
    NoStore,
    /// Serve a recorded response for up to `seconds` after it was fetched.
    Revalidate { seconds: u64 },
}

impl CachePolicy {
    pub const fn revalidate(seconds: u64) -> Self {
        CachePolicy::Revalidate { seconds }
    }

    /// Freshness window in seconds, `None` for [`CachePolicy::NoStore`].
    pub fn window(&self) -> Option<u64> {
        match self {
            CachePolicy::NoStore => None,
            CachePolicy::Revalidate { seconds } => Some(*seconds),
        }
    }
}

/// A recorded upstream response body and its freshness deadline.
#[derive(Debug, Clone)]
pub struct CachedResponse {
    pub body: Arc<[u8]>,
    pub fetched_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl CachedResponse {
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// The catalog cache service.
///
/// Created once at process start and handed to the data client; it is never
/// torn down. Backed by a sharded map so lookups and stores for different
/// identities never contend on the same lock.
pub struct CatalogCache {
    entries: DashMap<RequestKey, CachedResponse>,
    clock: Arc<dyn Clock>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            clock,
        }
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Returns the live entry for `key`, or `None` when there is no entry or
    /// its deadline has been reached.
    pub fn lookup(&self, key: &RequestKey) -> Option<CachedResponse> {
        let now = self.clock.now();
        if let Some(entry) = self.entries.get(key) {
            if entry.is_fresh_at(now) {
                return Some(entry.clone());
            }
        }
        // Only drop the entry if it is still the stale one; a concurrent store
        // may already have replaced it.
        self.entries.remove_if(key, |_, entry| !entry.is_fresh_at(now));
        None
    }

    /// Records `body` under `key` for `ttl_seconds`, replacing any existing
    /// entry regardless of its freshness.
    pub fn store(&self, key: RequestKey, body: Arc<[u8]>, ttl_seconds: u64) -> CachedResponse {
        let fetched_at = self.clock.now();
        let expires_at = i64::try_from(ttl_seconds)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|ttl| fetched_at.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let entry = CachedResponse {
            body,
            fetched_at,
            expires_at,
        };
        self.entries.insert(key, entry.clone());
        entry
    }

    /// Removes every entry whose deadline has passed. Returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_fresh_at(now));
        before.saturating_sub(self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Spawns the periodic expired-entry sweep. Runs until `shutdown` is notified.
    pub fn start_background_sweep_task(
        self: Arc<Self>,
        period: Duration,
        shutdown: Arc<Notify>,
    ) -> JoinHandle<()> {
        let period = period.max(Duration::from_secs(1));
        tokio::spawn(async move {
            let mut ticker = interval(period);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let purged = self.purge_expired();
                        if purged > 0 {
                            tracing::debug!(purged, remaining = self.len(), "swept expired cache entries");
                        }
                    }
                    _ = shutdown.notified() => {
                        tracing::info!("cache sweep task shutting down");
                        break;
                    }
                }
            }
        })
    }
}

impl Default for CatalogCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::cache::clock::ManualClock;

    fn cache_with_clock() -> (CatalogCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::default());
        (CatalogCache::with_clock(clock.clone()), clock)
    }

    fn body(s: &str) -> Arc<[u8]> {
        Arc::from(s.as_bytes())
    }

    #[test]
    fn request_key_splits_path_and_query() {
        let key = RequestKey::from_resource("/products/search?q=cap");
        assert_eq!(key.path(), "/products/search");
        assert_eq!(key.query(), Some("q=cap"));
        assert_eq!(key.to_string(), "/products/search?q=cap");

        let bare = RequestKey::from_resource("/products/featured?");
        assert_eq!(bare, RequestKey::from_resource("/products/featured"));
    }

    #[test]
    fn query_is_part_of_identity() {
        let (cache, _clock) = cache_with_clock();
        cache.store(RequestKey::from_resource("/p?a=1"), body("one"), 60);
        assert!(cache.lookup(&RequestKey::from_resource("/p?a=2")).is_none());
        assert!(cache.lookup(&RequestKey::from_resource("/p")).is_none());
        assert!(cache.lookup(&RequestKey::from_resource("/p?a=1")).is_some());
    }

    #[test]
    fn entry_is_served_until_deadline() {
        let (cache, clock) = cache_with_clock();
        let key = RequestKey::from_resource("/products/cap");
        cache.store(key.clone(), body("cap"), 3600);

        clock.advance_secs(3599);
        let hit = cache.lookup(&key).expect("fresh entry");
        assert_eq!(&*hit.body, b"cap");

        clock.advance_secs(1);
        assert!(cache.lookup(&key).is_none());
        assert!(cache.is_empty(), "stale entry is dropped on lookup");
    }

    #[test]
    fn store_replaces_fresh_entry() {
        let (cache, _clock) = cache_with_clock();
        let key = RequestKey::from_resource("/products/cap");
        cache.store(key.clone(), body("old"), 3600);
        cache.store(key.clone(), body("new"), 3600);

        assert_eq!(cache.len(), 1);
        assert_eq!(&*cache.lookup(&key).unwrap().body, b"new");
    }

    #[test]
    fn zero_ttl_is_immediately_stale() {
        let (cache, _clock) = cache_with_clock();
        let key = RequestKey::from_resource("/products/cap");
        cache.store(key.clone(), body("cap"), 0);
        assert!(cache.lookup(&key).is_none());
    }

    #[test]
    fn huge_ttl_saturates() {
        let (cache, _clock) = cache_with_clock();
        let entry = cache.store(RequestKey::from_resource("/x"), body("x"), u64::MAX);
        assert_eq!(entry.expires_at, DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn purge_drops_only_expired_entries() {
        let (cache, clock) = cache_with_clock();
        cache.store(RequestKey::from_resource("/short"), body("s"), 10);
        cache.store(RequestKey::from_resource("/long"), body("l"), 1000);

        clock.advance_secs(11);
        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.lookup(&RequestKey::from_resource("/long")).is_some());
    }

    #[test]
    fn policy_window() {
        assert_eq!(CachePolicy::NoStore.window(), None);
        assert_eq!(CachePolicy::revalidate(3600).window(), Some(3600));
    }

    #[tokio::test]
    async fn sweep_task_stops_on_shutdown() {
        let (cache, _clock) = cache_with_clock();
        let shutdown = Arc::new(Notify::new());
        let handle = Arc::new(cache)
            .start_background_sweep_task(Duration::from_secs(1), shutdown.clone());
        shutdown.notify_one();
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("sweep task should exit")
            .expect("sweep task should not panic");
    }
}
