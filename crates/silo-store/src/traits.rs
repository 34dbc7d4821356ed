use silo_types::ObjectId;

use crate::error::StoreResult;
use crate::record::LocalObject;

/// Keyed storage for [`LocalObject`] records.
///
/// All implementations must satisfy these invariants:
/// - Exactly one live record per id: `create` on a present id fails and
///   leaves the existing record untouched.
/// - `remove` yields the record by value — the region handle moves out
///   with it so the caller can release the allocation exactly once.
/// - The store holds no policy: sealing, reference counting, and eviction
///   decisions all happen in the lifecycle manager.
///
/// Methods take `&mut self`: the manager is the store's only owner and all
/// operations arrive through one request-processing loop.
pub trait ObjectStore: Send {
    /// Insert a record under its own id.
    ///
    /// Fails with `AlreadyExists` (leaving the present record unchanged)
    /// if the id is live. Returns a view of the inserted record.
    fn create(&mut self, object: LocalObject) -> StoreResult<&LocalObject>;

    /// Look up a record by id.
    fn get(&self, id: &ObjectId) -> Option<&LocalObject>;

    /// Look up a record by id for mutation.
    fn get_mut(&mut self, id: &ObjectId) -> Option<&mut LocalObject>;

    /// Remove and return the record. Fails with `NotFound` if absent.
    fn remove(&mut self, id: &ObjectId) -> StoreResult<LocalObject>;

    /// Number of live records.
    fn len(&self) -> usize;

    /// Returns `true` if no records are live.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visit every live record (debug dump and cross-check scans).
    fn for_each(&self, visit: &mut dyn FnMut(&LocalObject));

    /// Total bytes across all live records, computed by scanning.
    ///
    /// The manager keeps incremental counters for its hot paths; this scan
    /// exists so tests can cross-check them.
    fn total_bytes(&self) -> u64 {
        let mut sum = 0;
        self.for_each(&mut |object| sum += object.object_size());
        sum
    }
}
