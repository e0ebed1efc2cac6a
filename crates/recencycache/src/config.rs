//! Cache configuration

use crate::error::{Error, Result};

/// Upper bound on what [`CacheConfig::new`] preallocates; larger caches
/// grow their index and list on demand
pub const DEFAULT_PREALLOCATION: usize = 1024;

/// Construction parameters for [`LruCache`](crate::LruCache)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries held at once
    pub capacity: usize,

    /// Entries to preallocate room for in the index and list.
    /// Clamped to `capacity`. Reservation failure is reported as
    /// `Error::Allocation` rather than aborting.
    pub initial_capacity: usize,
}

impl CacheConfig {
    /// Config for `capacity` entries, preallocating at most
    /// [`DEFAULT_PREALLOCATION`] of them
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            initial_capacity: capacity.min(DEFAULT_PREALLOCATION),
        }
    }

    /// Preallocate room for `initial_capacity` entries up front
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Reject configurations the cache cannot honour
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        Ok(())
    }

    pub(crate) fn preallocation(&self) -> usize {
        self.initial_capacity.min(self.capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_zero_capacity() {
        assert_eq!(CacheConfig::new(0).validate(), Err(Error::ZeroCapacity));
        assert!(CacheConfig::new(1).validate().is_ok());
    }

    #[test]
    fn test_config_default_preallocation_bounded() {
        assert_eq!(CacheConfig::new(8).preallocation(), 8);
        assert_eq!(
            CacheConfig::new(usize::MAX).preallocation(),
            DEFAULT_PREALLOCATION
        );
        assert!(CacheConfig::new(usize::MAX).validate().is_ok());
    }

    #[test]
    fn test_config_preallocation_clamped() {
        let config = CacheConfig::new(8).with_initial_capacity(1024);
        assert_eq!(config.preallocation(), 8);

        let config = CacheConfig::new(8).with_initial_capacity(2);
        assert_eq!(config.preallocation(), 2);
    }
}
