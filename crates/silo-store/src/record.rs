use silo_arena::Region;
use silo_types::{ObjectId, ObjectInfo, ObjectSource};

/// The authoritative record for one object while it lives in this process.
///
/// A `LocalObject` owns its arena [`Region`] for its entire life; the
/// region is returned to the allocator exactly once, when the record is
/// destroyed. The sealed flag is set at most once and never reset, and the
/// reference count never underflows — both transitions are driven by the
/// lifecycle manager, which is the only writer.
#[derive(Debug)]
pub struct LocalObject {
    info: ObjectInfo,
    source: ObjectSource,
    region: Region,
    sealed: bool,
    ref_count: u64,
    pending_deletion: bool,
}

impl LocalObject {
    /// Fresh record: unsealed, unreferenced, not pending deletion.
    pub fn new(info: ObjectInfo, source: ObjectSource, region: Region) -> Self {
        Self {
            info,
            source,
            region,
            sealed: false,
            ref_count: 0,
            pending_deletion: false,
        }
    }

    /// The id this record lives under.
    pub fn id(&self) -> ObjectId {
        self.info.object_id
    }

    /// Creation-time metadata.
    pub fn info(&self) -> &ObjectInfo {
        &self.info
    }

    /// How the object came to exist.
    pub fn source(&self) -> ObjectSource {
        self.source
    }

    /// The arena region holding the object's bytes.
    pub fn region(&self) -> Region {
        self.region
    }

    /// Total footprint in bytes (data + metadata).
    pub fn object_size(&self) -> u64 {
        self.info.object_size()
    }

    /// Whether the object has been sealed (immutable and shareable).
    pub fn sealed(&self) -> bool {
        self.sealed
    }

    /// Flip the sealed flag. Legal exactly once, on an unsealed record.
    pub fn seal(&mut self) {
        debug_assert!(!self.sealed, "object sealed twice");
        self.sealed = true;
    }

    /// Current reference count.
    pub fn ref_count(&self) -> u64 {
        self.ref_count
    }

    /// Increment the reference count, returning the new count.
    pub fn increment_ref(&mut self) -> u64 {
        self.ref_count += 1;
        self.ref_count
    }

    /// Decrement the reference count, returning the new count.
    /// Legal only when the count is positive.
    pub fn decrement_ref(&mut self) -> u64 {
        debug_assert!(self.ref_count > 0, "reference count underflow");
        self.ref_count -= 1;
        self.ref_count
    }

    /// Whether a deferred deletion has been recorded against this object.
    pub fn pending_deletion(&self) -> bool {
        self.pending_deletion
    }

    /// Record a deferred deletion; executed when the count drops to zero.
    pub fn mark_pending_deletion(&mut self) {
        self.pending_deletion = true;
    }

    /// Whether the object may be chosen as an eviction victim right now.
    pub fn eviction_eligible(&self) -> bool {
        self.sealed && self.ref_count == 0
    }

    /// Consume the record, yielding the region for release.
    pub fn into_region(self) -> Region {
        self.region
    }
}
