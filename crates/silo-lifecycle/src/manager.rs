use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, warn};

use silo_arena::{Allocator, Region};
use silo_policy::{EvictionPolicy, LruEvictionPolicy};
use silo_store::{InMemoryObjectStore, LocalObject, ObjectStore};
use silo_types::{ObjectId, ObjectInfo, ObjectSource};

use crate::error::{LifecycleError, LifecycleResult};

/// Invoked synchronously, exactly once, when an object is actually
/// destroyed: immediate delete, deferred delete, or eviction. Never
/// invoked for abort. The callback cannot fail the operation.
pub type DeleteObjectCallback = Box<dyn FnMut(&ObjectId) + Send>;

/// Authoritative owner of every object's lifecycle state.
///
/// The manager is the only writer to its store, policy, and allocator,
/// and keeps three things in lock-step at all times:
///
/// - the policy's eligible set is exactly `{id : sealed && ref_count == 0}`;
/// - every live record owns one arena region, freed exactly once at
///   destruction;
/// - the running counters equal what a full scan of the store would
///   recompute.
pub struct ObjectLifecycleManager {
    store: Box<dyn ObjectStore>,
    policy: Box<dyn EvictionPolicy>,
    allocator: Box<dyn Allocator>,
    on_delete: DeleteObjectCallback,
    num_bytes_in_use: u64,
    num_bytes_created_total: u64,
    num_objects_created_total: u64,
    num_bytes_unsealed: u64,
    num_objects_unsealed: u64,
}

impl ObjectLifecycleManager {
    /// Manager with the production store and eviction policy.
    pub fn new(allocator: Box<dyn Allocator>, on_delete: DeleteObjectCallback) -> Self {
        Self::with_parts(
            Box::new(InMemoryObjectStore::new()),
            Box::new(LruEvictionPolicy::new()),
            allocator,
            on_delete,
        )
    }

    /// Manager assembled from caller-supplied collaborators.
    pub fn with_parts(
        store: Box<dyn ObjectStore>,
        policy: Box<dyn EvictionPolicy>,
        allocator: Box<dyn Allocator>,
        on_delete: DeleteObjectCallback,
    ) -> Self {
        Self {
            store,
            policy,
            allocator,
            on_delete,
            num_bytes_in_use: 0,
            num_bytes_created_total: 0,
            num_objects_created_total: 0,
            num_bytes_unsealed: 0,
            num_objects_unsealed: 0,
        }
    }

    /// Create a new, unsealed object.
    ///
    /// If the primary arena cannot satisfy the allocation, eligible
    /// objects are evicted to cover the shortfall and the allocation is
    /// retried once; after that, fallback capacity is used when
    /// `allow_fallback` is set. A duplicate id fails without touching
    /// any state.
    pub fn create_object(
        &mut self,
        info: ObjectInfo,
        source: ObjectSource,
        allow_fallback: bool,
    ) -> LifecycleResult<&LocalObject> {
        let id = info.object_id;
        if self.store.get(&id).is_some() {
            return Err(LifecycleError::ObjectExists(id));
        }
        let size = info.object_size();
        let Some(region) = self.allocate_with_eviction(size, allow_fallback) else {
            warn!(?id, size, "out of memory creating object");
            return Err(LifecycleError::OutOfMemory { size });
        };

        self.policy.on_created(id, size);
        self.num_bytes_created_total += size;
        self.num_objects_created_total += 1;
        self.num_bytes_unsealed += size;
        self.num_objects_unsealed += 1;
        debug!(?id, size, %source, fallback = region.fallback, "object created");

        // The duplicate check above makes this infallible under the
        // single-writer model.
        self.store
            .create(LocalObject::new(info, source, region))
            .map_err(|_| LifecycleError::ObjectExists(id))
    }

    /// Look up an object's record.
    pub fn get_object(&self, id: &ObjectId) -> Option<&LocalObject> {
        self.store.get(id)
    }

    /// Seal an object, making it immutable and shareable.
    ///
    /// Returns `None` if the object is absent or already sealed. A sealed,
    /// unreferenced object immediately becomes an eviction candidate.
    pub fn seal_object(&mut self, id: &ObjectId) -> Option<&LocalObject> {
        let record = self.store.get_mut(id)?;
        if record.sealed() {
            return None;
        }
        record.seal();
        let size = record.object_size();
        let unreferenced = record.ref_count() == 0;

        self.num_bytes_unsealed -= size;
        self.num_objects_unsealed -= 1;
        if unreferenced {
            self.policy.on_eligible(id);
        }
        debug!(?id, size, "object sealed");
        self.store.get(id)
    }

    /// Abort an unsealed object, destroying it regardless of references.
    ///
    /// Returns `false` if the object is absent or already sealed. The
    /// deletion callback is not invoked: an aborted object was never
    /// visible to readers.
    pub fn abort_object(&mut self, id: &ObjectId) -> bool {
        match self.store.get(id) {
            Some(record) if !record.sealed() => {}
            _ => return false,
        }
        let Ok(record) = self.store.remove(id) else {
            return false;
        };
        let size = record.object_size();
        self.num_bytes_unsealed -= size;
        self.num_objects_unsealed -= 1;
        if record.ref_count() > 0 {
            self.num_bytes_in_use -= size;
        }
        self.policy.on_removed(id);
        self.allocator.free(record.into_region());
        debug!(?id, size, "object aborted");
        true
    }

    /// Delete a sealed object.
    ///
    /// An unreferenced object is destroyed immediately. A referenced one
    /// is marked pending deletion — the delete executes when the last
    /// reference is released — and the call reports `ObjectInUse`.
    pub fn delete_object(&mut self, id: &ObjectId) -> LifecycleResult<()> {
        let Some(record) = self.store.get_mut(id) else {
            return Err(LifecycleError::ObjectNonexistent(*id));
        };
        if !record.sealed() {
            return Err(LifecycleError::ObjectNotSealed(*id));
        }
        if record.ref_count() > 0 {
            record.mark_pending_deletion();
            debug!(?id, "deletion deferred until references release");
            return Err(LifecycleError::ObjectInUse(*id));
        }
        self.destroy_object(id);
        Ok(())
    }

    /// Take a reference on an object. Returns `false` if it is absent.
    pub fn add_reference(&mut self, id: &ObjectId) -> bool {
        let Some(record) = self.store.get_mut(id) else {
            return false;
        };
        let size = record.object_size();
        let sealed = record.sealed();
        if record.increment_ref() == 1 {
            self.num_bytes_in_use += size;
            if sealed {
                self.policy.on_ineligible(id);
            }
        }
        true
    }

    /// Release a reference on an object.
    ///
    /// Returns `false` if the object is absent or its count is already
    /// zero. Dropping the last reference executes a pending deletion, or
    /// re-registers a sealed object as an eviction candidate.
    pub fn remove_reference(&mut self, id: &ObjectId) -> bool {
        let Some(record) = self.store.get_mut(id) else {
            return false;
        };
        if record.ref_count() == 0 {
            return false;
        }
        if record.decrement_ref() > 0 {
            return true;
        }
        let size = record.object_size();
        let sealed = record.sealed();
        let pending = record.pending_deletion();
        self.num_bytes_in_use -= size;
        if pending {
            self.destroy_object(id);
        } else if sealed {
            self.policy.on_eligible(id);
        }
        true
    }

    /// Evict eligible objects summing to at least `size` bytes, best
    /// effort: if the eligible total falls short, everything eligible
    /// goes. Returns the bytes actually freed.
    pub fn require_space(&mut self, size: u64) -> u64 {
        let victims = self.policy.choose_victims(size);
        self.evict_objects(&victims)
    }

    /// Whether the object exists and is sealed.
    pub fn is_object_sealed(&self, id: &ObjectId) -> bool {
        self.store.get(id).is_some_and(|record| record.sealed())
    }

    /// Number of live objects.
    pub fn num_objects(&self) -> usize {
        self.store.len()
    }

    /// Bytes held by objects with at least one reference.
    pub fn num_bytes_in_use(&self) -> u64 {
        self.num_bytes_in_use
    }

    /// Total bytes ever allocated for objects. Monotonic.
    pub fn num_bytes_created_total(&self) -> u64 {
        self.num_bytes_created_total
    }

    /// Total objects ever created. Monotonic.
    pub fn num_objects_created_total(&self) -> u64 {
        self.num_objects_created_total
    }

    /// Bytes held by currently-unsealed objects.
    pub fn num_bytes_unsealed(&self) -> u64 {
        self.num_bytes_unsealed
    }

    /// Number of currently-unsealed objects.
    pub fn num_objects_unsealed(&self) -> u64 {
        self.num_objects_unsealed
    }

    /// The eviction policy's own debug rendering.
    pub fn eviction_policy_debug_string(&self) -> String {
        self.policy.debug_string()
    }

    /// Render the operational state: counters, a per-source breakdown,
    /// arena accounting, and the policy's view.
    pub fn debug_dump(&self, out: &mut impl fmt::Write) -> fmt::Result {
        writeln!(out, "object lifecycle manager:")?;
        writeln!(
            out,
            "- {} objects ({} bytes)",
            self.store.len(),
            self.store.total_bytes()
        )?;
        writeln!(out, "- {} bytes in use", self.num_bytes_in_use)?;
        writeln!(
            out,
            "- {} objects ({} bytes) created total",
            self.num_objects_created_total, self.num_bytes_created_total
        )?;
        writeln!(
            out,
            "- {} objects ({} bytes) unsealed",
            self.num_objects_unsealed, self.num_bytes_unsealed
        )?;
        let mut by_source: BTreeMap<String, (usize, u64)> = BTreeMap::new();
        self.store.for_each(&mut |object| {
            let entry = by_source.entry(object.source().to_string()).or_default();
            entry.0 += 1;
            entry.1 += object.object_size();
        });
        for (source, (count, bytes)) in &by_source {
            writeln!(out, "- source {source}: {count} objects ({bytes} bytes)")?;
        }
        writeln!(
            out,
            "- arena: {}/{} bytes allocated, {} fallback",
            self.allocator.allocated(),
            self.allocator.capacity(),
            self.allocator.fallback_allocated()
        )?;
        writeln!(out, "- {}", self.policy.debug_string())
    }

    fn allocate_with_eviction(&mut self, size: u64, allow_fallback: bool) -> Option<Region> {
        if let Some(region) = self.allocator.allocate(size) {
            return Some(region);
        }
        let shortfall = size.saturating_sub(self.allocator.available());
        let victims = self.policy.choose_victims(shortfall);
        if !victims.is_empty() {
            self.evict_objects(&victims);
            if let Some(region) = self.allocator.allocate(size) {
                return Some(region);
            }
        }
        if allow_fallback {
            return self.allocator.fallback_allocate(size);
        }
        None
    }

    fn evict_objects(&mut self, victims: &[ObjectId]) -> u64 {
        let mut freed = 0;
        for id in victims {
            freed += self.destroy_object(id);
        }
        if freed > 0 {
            warn!(victims = victims.len(), freed, "evicted objects to reclaim space");
        }
        freed
    }

    /// Final teardown shared by immediate delete, deferred delete, and
    /// eviction. Caller guarantees the object exists, is sealed, and is
    /// unreferenced. Returns the bytes released.
    fn destroy_object(&mut self, id: &ObjectId) -> u64 {
        let Ok(record) = self.store.remove(id) else {
            debug_assert!(false, "destroy of untracked object: {id:?}");
            return 0;
        };
        debug_assert!(
            record.sealed() && record.ref_count() == 0,
            "destroy of unsealed or referenced object: {id:?}"
        );
        let size = record.object_size();
        self.policy.on_removed(id);
        (self.on_delete)(id);
        self.allocator.free(record.into_region());
        debug!(?id, size, "object destroyed");
        size
    }
}

impl fmt::Debug for ObjectLifecycleManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectLifecycleManager")
            .field("objects", &self.store.len())
            .field("bytes_in_use", &self.num_bytes_in_use)
            .field("bytes_unsealed", &self.num_bytes_unsealed)
            .finish()
    }
}
