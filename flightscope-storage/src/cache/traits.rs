//! Cache backend trait and statistics.

use chrono::{DateTime, Utc};

/// Storage for cached values and the time they were cached.
///
/// Backends know nothing about expiry; [`super::TtlCache`] decides what is
/// still servable. Implementations must be safe for concurrent use and must
/// not hold locks across calls.
pub trait CacheBackend<V>: Send + Sync {
    /// Get a value and when it was cached.
    fn get(&self, key: &str) -> Option<(V, DateTime<Utc>)>;

    /// Store a value, replacing any existing entry for `key`.
    fn put(&self, key: &str, value: V, cached_at: DateTime<Utc>);

    /// Remove an entry. Returns true if one existed.
    fn remove(&self, key: &str) -> bool;

    /// Remove the entry only if it is still stamped `cached_at`, atomically.
    /// Returns true if it was removed.
    fn remove_if_stamped(&self, key: &str, cached_at: DateTime<Utc>) -> bool;

    /// Remove all entries, returning how many were dropped.
    fn clear(&self) -> u64;

    /// Number of entries currently stored, expired or not.
    fn len(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Statistics about cache usage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of lookups that found nothing servable.
    pub misses: u64,
    /// Number of entries dropped because they outlived the TTL.
    pub expirations: u64,
    /// Number of entries currently in cache.
    pub entry_count: u64,
}

impl CacheStats {
    /// Calculate the hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_rate() {
        assert_eq!(CacheStats::default().hit_rate(), 0.0);

        let stats = CacheStats {
            hits: 3,
            misses: 1,
            ..Default::default()
        };
        assert!((stats.hit_rate() - 0.75).abs() < f64::EPSILON);
    }
}
