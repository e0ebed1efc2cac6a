//! # recencycache
//!
//! Bounded LRU cache that is safe to share between threads.
//!
//! ## Architecture
//! - **HashMap**: AHash index from key to list handle (O(1))
//! - **Recency list**: `recencylist::List` of `(key, value)` entries, most
//!   recently used at the front, eviction from the back (O(1))
//! - **Locking**: one `parking_lot::Mutex` over index and list, so every
//!   operation is linearizable
//! - **Stats**: lock-free hit/miss/eviction counters
//!
//! ```
//! use recencycache::LruCache;
//!
//! let cache = LruCache::new(2).unwrap();
//! assert!(!cache.set("a", 1));
//! assert!(!cache.set("b", 2));
//! assert_eq!(cache.get(&"a"), Some(1));
//!
//! // "b" is now the least recently used entry
//! cache.set("c", 3);
//! assert_eq!(cache.get(&"b"), None);
//! ```

#![warn(missing_docs)]

mod cache;
mod config;
mod error;
mod stats;

pub use cache::LruCache;
pub use config::{CacheConfig, DEFAULT_PREALLOCATION};
pub use error::{Error, Result};
pub use stats::{CacheStats, StatsSnapshot};
