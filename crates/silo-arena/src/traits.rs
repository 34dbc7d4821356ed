use crate::region::Region;

/// Allocation boundary the lifecycle manager carves object memory through.
///
/// All implementations must satisfy these invariants:
/// - A returned [`Region`] is exclusively owned by the caller until it is
///   passed back to `free`, which must happen exactly once.
/// - `allocate` draws only from the primary arena; `fallback_allocate`
///   draws only from the overflow budget and marks its regions as fallback.
/// - Allocation failure (`None`) is a normal, expected outcome — the
///   caller reclaims space and retries. It is never an error condition.
/// - `allocated()` and `fallback_allocated()` equal the byte sum of
///   outstanding regions of each kind at all times.
pub trait Allocator: Send {
    /// Carve `size` bytes out of the primary arena.
    ///
    /// Returns `None` when no sufficiently large contiguous range exists.
    /// A zero-size request always succeeds and occupies no space.
    fn allocate(&mut self, size: u64) -> Option<Region>;

    /// Carve `size` bytes out of the fallback budget.
    ///
    /// Returns `None` when the budget would be exceeded. Only called when
    /// the caller explicitly permits fallback allocation.
    fn fallback_allocate(&mut self, size: u64) -> Option<Region>;

    /// Return a region to the allocator.
    fn free(&mut self, region: Region);

    /// Capacity of the primary arena in bytes.
    fn capacity(&self) -> u64;

    /// Bytes currently allocated from the primary arena.
    fn allocated(&self) -> u64;

    /// Bytes currently allocated from fallback capacity.
    fn fallback_allocated(&self) -> u64;

    /// Unallocated bytes remaining in the primary arena.
    fn available(&self) -> u64 {
        self.capacity() - self.allocated()
    }
}
