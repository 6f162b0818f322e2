//! Expiring cache over a pluggable backend.

use super::clock::{Clock, SystemClock};
use super::freshness::CacheRead;
use super::memory::InMemoryCacheBackend;
use super::traits::{CacheBackend, CacheStats};
use chrono::{DateTime, Utc};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Configuration for [`TtlCache`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// How long an entry stays servable after it was stored.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(15 * 60),
        }
    }
}

impl CacheConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the entry TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Cache whose entries are served only while `now - cached_at < ttl`.
///
/// No single-flight: concurrent misses on one key each go to the origin, and
/// the last [`TtlCache::insert`] wins.
pub struct TtlCache<V, B = InMemoryCacheBackend<V>>
where
    B: CacheBackend<V>,
{
    backend: Arc<B>,
    clock: Arc<dyn Clock>,
    config: CacheConfig,
    hits: AtomicU64,
    misses: AtomicU64,
    expirations: AtomicU64,
    _value: PhantomData<fn() -> V>,
}

impl<V> TtlCache<V>
where
    V: Clone + Send + Sync,
{
    /// In-memory cache on the system clock.
    pub fn new(config: CacheConfig) -> Self {
        Self::with_backend(Arc::new(InMemoryCacheBackend::new()), Arc::new(SystemClock), config)
    }

    /// In-memory cache on a caller-supplied clock.
    pub fn with_clock(clock: Arc<dyn Clock>, config: CacheConfig) -> Self {
        Self::with_backend(Arc::new(InMemoryCacheBackend::new()), clock, config)
    }
}

impl<V, B> TtlCache<V, B>
where
    B: CacheBackend<V>,
{
    pub fn with_backend(backend: Arc<B>, clock: Arc<dyn Clock>, config: CacheConfig) -> Self {
        Self {
            backend,
            clock,
            config,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            expirations: AtomicU64::new(0),
            _value: PhantomData,
        }
    }

    /// Look up `key`. Expired entries are removed and reported as absent.
    pub fn get(&self, key: &str) -> Option<CacheRead<V>> {
        let now = self.clock.now();
        match self.backend.get(key) {
            Some((value, cached_at)) if self.is_live(cached_at, now) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(CacheRead::from_cache(value, cached_at))
            }
            Some((_, cached_at)) => {
                // A concurrent insert may have restamped the key since the read.
                if self.backend.remove_if_stamped(key, cached_at) {
                    self.expirations.fetch_add(1, Ordering::Relaxed);
                }
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Store `value` under `key` stamped with the current time, overwriting
    /// any previous entry. Returns the stamp.
    pub fn insert(&self, key: &str, value: V) -> DateTime<Utc> {
        let now = self.clock.now();
        self.backend.put(key, value, now);
        now
    }

    pub fn invalidate(&self, key: &str) -> bool {
        self.backend.remove(key)
    }

    pub fn clear(&self) -> u64 {
        self.backend.clear()
    }

    /// Current time according to the cache's clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn ttl(&self) -> Duration {
        self.config.ttl
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            expirations: self.expirations.load(Ordering::Relaxed),
            entry_count: self.backend.len(),
        }
    }

    fn is_live(&self, cached_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match (now - cached_at).to_std() {
            Ok(age) => age < self.config.ttl,
            // Stamped in the future relative to the clock: age is effectively zero.
            Err(_) => !self.config.ttl.is_zero(),
        }
    }
}

impl<V, B> std::fmt::Debug for TtlCache<V, B>
where
    B: CacheBackend<V>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache")
            .field("ttl", &self.config.ttl)
            .field("stats", &self.stats())
            .finish()
    }
}
