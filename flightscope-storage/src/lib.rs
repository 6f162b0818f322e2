//! FlightScope Storage
//!
//! Short-lived response caching for outbound API results. Entries live in
//! process memory only and are served while younger than the configured TTL.

pub mod cache;

pub use cache::{
    CacheBackend, CacheConfig, CacheRead, CacheStats, Clock, InMemoryCacheBackend, ManualClock,
    SystemClock, TtlCache,
};
