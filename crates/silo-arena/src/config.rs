/// Configuration for an [`ArenaAllocator`].
///
/// [`ArenaAllocator`]: crate::arena::ArenaAllocator
#[derive(Clone, Debug)]
pub struct ArenaConfig {
    /// Capacity of the primary arena in bytes (default: 64 MiB).
    pub capacity: u64,
    /// Budget for fallback allocations beyond the primary arena.
    ///
    /// `None` leaves fallback unbounded, mirroring overflow regions that
    /// spill to disk-backed memory.
    pub fallback_capacity: Option<u64>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            capacity: 64 * 1024 * 1024, // 64 MiB
            fallback_capacity: None,
        }
    }
}

impl ArenaConfig {
    /// Config with the given primary capacity and no fallback bound.
    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            capacity,
            fallback_capacity: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_64_mib_unbounded_fallback() {
        let config = ArenaConfig::default();
        assert_eq!(config.capacity, 64 * 1024 * 1024);
        assert!(config.fallback_capacity.is_none());
    }

    #[test]
    fn with_capacity_sets_primary_only() {
        let config = ArenaConfig::with_capacity(4096);
        assert_eq!(config.capacity, 4096);
        assert!(config.fallback_capacity.is_none());
    }
}
