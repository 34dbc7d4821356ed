use std::collections::BTreeMap;

use tracing::debug;

use crate::config::ArenaConfig;
use crate::region::Region;
use crate::traits::Allocator;

/// First-fit free-list allocator over a fixed-capacity arena.
///
/// The primary arena `[0, capacity)` is tracked as a set of free blocks
/// keyed by offset; allocation carves from the first block large enough,
/// and freeing coalesces with adjacent free blocks so the arena does not
/// fragment permanently.
///
/// Fallback allocation bump-allocates offsets past the primary capacity.
/// Fallback offsets are never reused — the overflow budget is accounting,
/// not a second free list — which matches overflow regions whose backing
/// (e.g. disk-spilled maps) is created and destroyed per allocation.
pub struct ArenaAllocator {
    config: ArenaConfig,
    /// Free blocks of the primary arena: offset → length.
    free: BTreeMap<u64, u64>,
    allocated: u64,
    fallback_allocated: u64,
    /// Next fallback offset; starts one past the primary arena.
    fallback_cursor: u64,
}

impl ArenaAllocator {
    /// Create an allocator over an empty arena.
    pub fn new(config: ArenaConfig) -> Self {
        let mut free = BTreeMap::new();
        if config.capacity > 0 {
            free.insert(0, config.capacity);
        }
        let fallback_cursor = config.capacity;
        Self {
            config,
            free,
            allocated: 0,
            fallback_allocated: 0,
            fallback_cursor,
        }
    }

    /// Allocator with the given primary capacity and no fallback bound.
    pub fn with_capacity(capacity: u64) -> Self {
        Self::new(ArenaConfig::with_capacity(capacity))
    }

    /// Number of free blocks in the primary arena (coalescing diagnostic).
    pub fn free_block_count(&self) -> usize {
        self.free.len()
    }
}

impl Allocator for ArenaAllocator {
    fn allocate(&mut self, size: u64) -> Option<Region> {
        if size == 0 {
            return Some(Region::new(0, 0));
        }
        let offset = self
            .free
            .iter()
            .find(|(_, &len)| len >= size)
            .map(|(&offset, _)| offset)?;
        let block_len = self.free.remove(&offset).expect("block just found");
        if block_len > size {
            self.free.insert(offset + size, block_len - size);
        }
        self.allocated += size;
        Some(Region::new(offset, size))
    }

    fn fallback_allocate(&mut self, size: u64) -> Option<Region> {
        if let Some(budget) = self.config.fallback_capacity {
            if self.fallback_allocated + size > budget {
                return None;
            }
        }
        let region = Region {
            offset: self.fallback_cursor,
            len: size,
            fallback: true,
        };
        self.fallback_cursor += size;
        self.fallback_allocated += size;
        debug!(offset = region.offset, size, "fallback allocation");
        Some(region)
    }

    fn free(&mut self, region: Region) {
        if region.is_empty() {
            return;
        }
        if region.fallback {
            self.fallback_allocated -= region.len;
            return;
        }
        self.allocated -= region.len;

        let mut offset = region.offset;
        let mut len = region.len;
        // Coalesce with the free block ending where this region starts.
        if let Some((&prev_offset, &prev_len)) = self.free.range(..offset).next_back() {
            debug_assert!(prev_offset + prev_len <= offset, "double free or overlap");
            if prev_offset + prev_len == offset {
                self.free.remove(&prev_offset);
                offset = prev_offset;
                len += prev_len;
            }
        }
        // Coalesce with the free block starting where this region ends.
        if let Some(next_len) = self.free.remove(&region.end()) {
            len += next_len;
        }
        self.free.insert(offset, len);
    }

    fn capacity(&self) -> u64 {
        self.config.capacity
    }

    fn allocated(&self) -> u64 {
        self.allocated
    }

    fn fallback_allocated(&self) -> u64 {
        self.fallback_allocated
    }
}

impl std::fmt::Debug for ArenaAllocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArenaAllocator")
            .field("capacity", &self.config.capacity)
            .field("allocated", &self.allocated)
            .field("fallback_allocated", &self.fallback_allocated)
            .field("free_blocks", &self.free.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Primary allocation
    // -----------------------------------------------------------------------

    #[test]
    fn allocate_tracks_accounting() {
        let mut arena = ArenaAllocator::with_capacity(1024);
        let region = arena.allocate(100).unwrap();
        assert_eq!(region.offset, 0);
        assert_eq!(region.len, 100);
        assert!(!region.fallback);
        assert_eq!(arena.allocated(), 100);
        assert_eq!(arena.available(), 924);

        arena.free(region);
        assert_eq!(arena.allocated(), 0);
        assert_eq!(arena.available(), 1024);
    }

    #[test]
    fn allocate_beyond_capacity_fails() {
        let mut arena = ArenaAllocator::with_capacity(128);
        assert!(arena.allocate(129).is_none());
        assert!(arena.allocate(128).is_some());
        assert!(arena.allocate(1).is_none());
    }

    #[test]
    fn zero_size_allocation_occupies_nothing() {
        let mut arena = ArenaAllocator::with_capacity(16);
        let region = arena.allocate(0).unwrap();
        assert!(region.is_empty());
        assert_eq!(arena.allocated(), 0);
        arena.free(region);
        assert_eq!(arena.allocated(), 0);
    }

    #[test]
    fn first_fit_reuses_freed_space() {
        let mut arena = ArenaAllocator::with_capacity(300);
        let a = arena.allocate(100).unwrap();
        let _b = arena.allocate(100).unwrap();
        arena.free(a);
        let c = arena.allocate(50).unwrap();
        assert_eq!(c.offset, 0);
    }

    // -----------------------------------------------------------------------
    // Coalescing
    // -----------------------------------------------------------------------

    #[test]
    fn freeing_adjacent_blocks_coalesces() {
        let mut arena = ArenaAllocator::with_capacity(300);
        let a = arena.allocate(100).unwrap();
        let b = arena.allocate(100).unwrap();
        let c = arena.allocate(100).unwrap();
        assert_eq!(arena.free_block_count(), 0);

        arena.free(b);
        assert_eq!(arena.free_block_count(), 1);
        arena.free(a);
        // a and b merged into one block covering [0, 200).
        assert_eq!(arena.free_block_count(), 1);
        let merged = arena.allocate(200).unwrap();
        assert_eq!(merged.offset, 0);

        arena.free(merged);
        arena.free(c);
        // Everything coalesces back to a single block.
        assert_eq!(arena.free_block_count(), 1);
        assert_eq!(arena.allocate(300).unwrap().offset, 0);
    }

    #[test]
    fn freeing_between_free_neighbors_merges_three_blocks() {
        let mut arena = ArenaAllocator::with_capacity(300);
        let a = arena.allocate(100).unwrap();
        let b = arena.allocate(100).unwrap();
        let c = arena.allocate(100).unwrap();
        arena.free(a);
        arena.free(c);
        assert_eq!(arena.free_block_count(), 2);
        arena.free(b);
        assert_eq!(arena.free_block_count(), 1);
    }

    // -----------------------------------------------------------------------
    // Fallback allocation
    // -----------------------------------------------------------------------

    #[test]
    fn fallback_regions_sit_past_primary_capacity() {
        let mut arena = ArenaAllocator::with_capacity(100);
        let region = arena.fallback_allocate(50).unwrap();
        assert!(region.fallback);
        assert_eq!(region.offset, 100);
        assert_eq!(arena.fallback_allocated(), 50);

        let second = arena.fallback_allocate(10).unwrap();
        assert_eq!(second.offset, 150);

        arena.free(region);
        assert_eq!(arena.fallback_allocated(), 10);
        // Fallback offsets are never reused.
        assert_eq!(arena.fallback_allocate(1).unwrap().offset, 160);
    }

    #[test]
    fn fallback_respects_budget() {
        let mut arena = ArenaAllocator::new(ArenaConfig {
            capacity: 100,
            fallback_capacity: Some(100),
        });
        let first = arena.fallback_allocate(60).unwrap();
        assert!(arena.fallback_allocate(60).is_none());
        assert!(arena.fallback_allocate(40).is_some());

        arena.free(first);
        // Freed budget becomes available again.
        assert!(arena.fallback_allocate(60).is_some());
    }

    #[test]
    fn fallback_does_not_consume_primary_space() {
        let mut arena = ArenaAllocator::with_capacity(100);
        let _fb = arena.fallback_allocate(1000).unwrap();
        assert_eq!(arena.allocated(), 0);
        assert!(arena.allocate(100).is_some());
    }

    // -----------------------------------------------------------------------
    // Accounting across mixed operations
    // -----------------------------------------------------------------------

    #[test]
    fn accounting_matches_outstanding_regions() {
        let mut arena = ArenaAllocator::with_capacity(1000);
        let regions: Vec<_> = (0..5).map(|_| arena.allocate(100).unwrap()).collect();
        let fallback = arena.fallback_allocate(37).unwrap();
        assert_eq!(arena.allocated(), 500);
        assert_eq!(arena.fallback_allocated(), 37);

        for region in regions {
            arena.free(region);
        }
        arena.free(fallback);
        assert_eq!(arena.allocated(), 0);
        assert_eq!(arena.fallback_allocated(), 0);
        assert_eq!(arena.free_block_count(), 1);
    }

    #[test]
    fn debug_format_shows_accounting() {
        let mut arena = ArenaAllocator::with_capacity(256);
        let _region = arena.allocate(64).unwrap();
        let debug = format!("{arena:?}");
        assert!(debug.contains("ArenaAllocator"));
        assert!(debug.contains("allocated"));
    }
}
