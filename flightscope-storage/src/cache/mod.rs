//! Cache layer with explicit expiry.
//!
//! [`TtlCache`] wraps a pluggable [`CacheBackend`] and a [`Clock`]. An entry
//! is served only while `now - cached_at < ttl`; older entries are treated as
//! absent and dropped. Reads return [`CacheRead<T>`], which tells the caller
//! whether the value came from the cache and how old it is.
//!
//! # Example
//!
//! ```ignore
//! let cache = TtlCache::new(CacheConfig::default().with_ttl(Duration::from_secs(900)));
//! cache.insert("arrivals_DXB", payload);
//!
//! if let Some(read) = cache.get("arrivals_DXB") {
//!     assert!(read.was_cache_hit());
//! }
//! ```

pub mod clock;
pub mod freshness;
pub mod memory;
pub mod traits;
pub mod ttl;

pub use clock::{Clock, ManualClock, SystemClock};
pub use freshness::CacheRead;
pub use memory::InMemoryCacheBackend;
pub use traits::{CacheBackend, CacheStats};
pub use ttl::{CacheConfig, TtlCache};
