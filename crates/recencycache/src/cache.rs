//! LRU cache over a handle-addressed recency list

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use ahash::RandomState;
use parking_lot::Mutex;
use recencylist::{Handle, List};
use tracing::{debug, trace};

use crate::config::CacheConfig;
use crate::error::{Error, Result};
use crate::stats::CacheStats;

/// Payload stored in each list node; the key lets eviction find its index entry
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Index and recency list, always locked together
struct Inner<K, V> {
    index: HashMap<K, Handle, RandomState>,
    list: List<Entry<K, V>>,
}

impl<K, V> Inner<K, V>
where
    K: Hash + Eq,
{
    fn with_capacity(capacity: usize) -> Result<Self> {
        let mut index = HashMap::with_hasher(RandomState::new());
        let mut list = List::new();

        index
            .try_reserve(capacity)
            .map_err(|_| Error::Allocation { requested: capacity })?;
        list.try_reserve(capacity)
            .map_err(|_| Error::Allocation { requested: capacity })?;

        Ok(Self { index, list })
    }

    fn lookup<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).copied()
    }

    /// Drop the back entry. Returns false if the list was empty.
    fn evict(&mut self) -> bool {
        match self.list.back() {
            Some(tail) => {
                let entry = self.list.remove(tail);
                self.index.remove(&entry.key);
                true
            }
            None => false,
        }
    }
}

/// Thread-safe LRU cache with fixed capacity
///
/// Every operation takes one exclusive lock over the key index and the
/// recency list, so concurrent calls behave as if run one after another.
/// Share it between threads with `Arc<LruCache<K, V>>`.
pub struct LruCache<K, V> {
    inner: Mutex<Inner<K, V>>,
    stats: CacheStats,
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new LRU cache holding at most `capacity` entries
    ///
    /// # Errors
    /// * `Error::ZeroCapacity` - `capacity` is 0
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_config(CacheConfig::new(capacity))
    }

    /// Create a new LRU cache from a validated config
    ///
    /// # Errors
    /// * `Error::ZeroCapacity` - `config.capacity` is 0
    /// * `Error::Allocation` - the requested preallocation cannot be reserved
    pub fn with_config(config: CacheConfig) -> Result<Self> {
        config.validate()?;
        debug!(
            capacity = config.capacity,
            preallocated = config.preallocation(),
            "creating LRU cache"
        );

        Ok(Self {
            inner: Mutex::new(Inner::with_capacity(config.preallocation())?),
            stats: CacheStats::new(),
            capacity: config.capacity,
        })
    }

    /// Insert or overwrite `key`, making it the most recently used entry
    ///
    /// When a new key would exceed capacity, the least recently used entry
    /// is evicted first.
    ///
    /// # Returns
    /// * `true` if the key was already present and its value was replaced
    pub fn set(&self, key: K, value: V) -> bool {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        if let Some(handle) = inner.lookup(&key) {
            inner.list.get_mut(handle).value = value;
            inner.list.move_to_front(handle);
            self.stats.record_update();
            return true;
        }

        if inner.list.len() >= self.capacity && inner.evict() {
            self.stats.record_eviction();
            trace!(len = inner.list.len(), "evicted least recently used entry");
        }

        let handle = inner.list.push_front(Entry {
            key: key.clone(),
            value,
        });
        inner.index.insert(key, handle);
        self.stats.record_insert();

        false
    }

    /// Look up `key`, marking it most recently used on a hit
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        let mut inner = self.inner.lock();

        match inner.lookup(key) {
            Some(handle) => {
                inner.list.move_to_front(handle);
                self.stats.record_hit();
                Some(inner.list.get(handle).value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Look up `key` without touching its recency or the hit/miss counters
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        let inner = self.inner.lock();
        inner
            .lookup(key)
            .map(|handle| inner.list.get(handle).value.clone())
    }

    /// Check whether `key` is present without touching its recency
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().index.contains_key(key)
    }

    /// Remove `key`, returning its value if it was present
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        let handle = inner.index.remove(key)?;
        self.stats.record_removal();
        Some(inner.list.remove(handle).value)
    }

    /// Drop every entry (statistics are kept)
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        let dropped = inner.list.len();

        inner.index.clear();
        inner.list.clear();
        debug!(dropped, "cleared LRU cache");
    }

    /// Get current number of entries
    pub fn len(&self) -> usize {
        self.inner.lock().list.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Snapshot of all keys, most recently used first
    pub fn keys_by_recency(&self) -> Vec<K> {
        let inner = self.inner.lock();
        inner.list.iter().map(|entry| entry.key.clone()).collect()
    }

    /// Verify that the index and the recency list describe the same entries
    ///
    /// Validates the list's own links, then checks that every list entry is
    /// indexed under its key with its own handle, that both sides hold the
    /// same number of entries, and that capacity is respected.
    pub fn check_consistency(&self) -> Result<()> {
        let inner = self.inner.lock();
        inner.list.validate()?;

        let len = inner.list.len();
        if len != inner.index.len() {
            return Err(Error::Inconsistent(format!(
                "index holds {} keys, list holds {} entries",
                inner.index.len(),
                len
            )));
        }
        if len > self.capacity {
            return Err(Error::Inconsistent(format!(
                "{} entries exceed capacity {}",
                len, self.capacity
            )));
        }

        let mut cursor = inner.list.front();
        while let Some(handle) = cursor {
            let entry = inner.list.get(handle);
            if inner.lookup(&entry.key) != Some(handle) {
                return Err(Error::Inconsistent(format!(
                    "list slot {} is not indexed under its key",
                    handle.index()
                )));
            }
            cursor = inner.list.next(handle);
        }

        Ok(())
    }
}
