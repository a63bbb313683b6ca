use std::sync::Mutex;

use cached::Cached;
use cached::TimedCache;

use crate::domain::song::models::SongPage;
use crate::domain::song::models::SongPageQuery;

/// Five-minute memoization of catalog listing results, keyed by the full
/// query tuple.
///
/// Entries expire on TTL only; writes do not invalidate, so a freshly
/// created or updated song can be invisible to cached listings for up to
/// the lifespan. Acceptable staleness for a browse view. Concurrent
/// misses for the same key may each hit the store (no in-flight dedupe).
pub struct SongPageCache {
    inner: Mutex<TimedCache<SongPageQuery, SongPage>>,
}

impl SongPageCache {
    const LIFESPAN_SECONDS: u64 = 300;

    pub fn new() -> Self {
        Self::with_lifespan(Self::LIFESPAN_SECONDS)
    }

    pub fn with_lifespan(seconds: u64) -> Self {
        Self {
            inner: Mutex::new(TimedCache::with_lifespan(seconds)),
        }
    }

    pub fn get(&self, query: &SongPageQuery) -> Option<SongPage> {
        self.lock().cache_get(query).cloned()
    }

    pub fn insert(&self, query: SongPageQuery, page: SongPage) {
        self.lock().cache_set(query, page);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, TimedCache<SongPageQuery, SongPage>> {
        // A panic while holding the lock leaves a plain map; the cached
        // values themselves cannot be left inconsistent.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for SongPageCache {
    fn default() -> Self {
        Self::new()
    }
}
