use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;
use tracing::trace;

use crate::matcher::HostMatcher;

/// Default LRU cache size
pub const DEFAULT_CACHE_SIZE: usize = 1024;

/// A frozen [`HostMatcher`] with an LRU cache of lookup results.
///
/// Both hits and misses are cached. The matcher can no longer be
/// modified, so cached results never go stale.
pub struct CachedHostMatcher<V: Clone> {
    matcher: HostMatcher<V>,
    cache: Mutex<LruCache<String, Option<V>>>,
}

impl<V: Clone> CachedHostMatcher<V> {
    /// Wrap a matcher. A `cache_size` of zero is treated as one.
    pub fn new(matcher: HostMatcher<V>, cache_size: usize) -> Self {
        let cache_size = NonZeroUsize::new(cache_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            matcher,
            cache: Mutex::new(LruCache::new(cache_size)),
        }
    }

    /// Look up a hostname, consulting the cache first
    pub fn lookup(&self, host: &str) -> Option<V> {
        let key = self.matcher.normalize(host);

        let mut cache = self.cache.lock();

        if let Some(cached) = cache.get(&*key) {
            trace!(host, "host match cache hit");
            return cached.clone();
        }

        // Matching is CPU-only, so compute while holding the lock to avoid a stampede
        trace!(host, "host match cache miss");
        let result = self.matcher.lookup(&key).cloned();
        cache.put(key.into_owned(), result.clone());

        result
    }

    /// Check if any rule matches `host`
    pub fn matches(&self, host: &str) -> bool {
        self.lookup(host).is_some()
    }

    /// The underlying matcher
    pub fn matcher(&self) -> &HostMatcher<V> {
        &self.matcher
    }

    /// Number of cached hostnames
    pub fn cached_len(&self) -> usize {
        self.cache.lock().len()
    }

    /// Clear the cache
    pub fn clear_cache(&self) {
        self.cache.lock().clear();
    }
}

impl<V: Clone> From<HostMatcher<V>> for CachedHostMatcher<V> {
    fn from(matcher: HostMatcher<V>) -> Self {
        Self::new(matcher, DEFAULT_CACHE_SIZE)
    }
}
