//! In-process cache backend on a sharded concurrent map.

use super::traits::CacheBackend;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

/// [`CacheBackend`] holding entries in a [`DashMap`].
#[derive(Debug)]
pub struct InMemoryCacheBackend<V> {
    entries: DashMap<String, (V, DateTime<Utc>)>,
}

impl<V> InMemoryCacheBackend<V> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl<V> Default for InMemoryCacheBackend<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> CacheBackend<V> for InMemoryCacheBackend<V>
where
    V: Clone + Send + Sync,
{
    fn get(&self, key: &str) -> Option<(V, DateTime<Utc>)> {
        // Clone out so the shard guard is released before returning.
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    fn put(&self, key: &str, value: V, cached_at: DateTime<Utc>) {
        self.entries.insert(key.to_string(), (value, cached_at));
    }

    fn remove(&self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    fn remove_if_stamped(&self, key: &str, cached_at: DateTime<Utc>) -> bool {
        self.entries
            .remove_if(key, |_, (_, stamp)| *stamp == cached_at)
            .is_some()
    }

    fn clear(&self) -> u64 {
        let count = self.entries.len() as u64;
        self.entries.clear();
        count
    }

    fn len(&self) -> u64 {
        self.entries.len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_get_remove() {
        let backend = InMemoryCacheBackend::new();
        let at = Utc::now();

        backend.put("k", "v1".to_string(), at);
        backend.put("k", "v2".to_string(), at);
        assert_eq!(backend.len(), 1);
        assert_eq!(backend.get("k").map(|(v, _)| v), Some("v2".to_string()));

        assert!(backend.remove("k"));
        assert!(!backend.remove("k"));
        assert!(backend.is_empty());
    }

    #[test]
    fn test_remove_if_stamped_keeps_newer_entry() {
        let backend = InMemoryCacheBackend::new();
        let old = Utc::now();
        let newer = old + chrono::Duration::seconds(30);

        backend.put("k", "fresh".to_string(), newer);
        assert!(!backend.remove_if_stamped("k", old));
        assert_eq!(backend.get("k").map(|(v, _)| v), Some("fresh".to_string()));

        assert!(backend.remove_if_stamped("k", newer));
        assert!(backend.is_empty());
    }

    #[test]
    fn test_clear_reports_count() {
        let backend = InMemoryCacheBackend::new();
        backend.put("a", 1, Utc::now());
        backend.put("b", 2, Utc::now());
        assert_eq!(backend.clear(), 2);
        assert!(backend.get("a").is_none());
    }
}
