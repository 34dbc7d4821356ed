use silo_types::ObjectId;

/// Victim-selection boundary for arena eviction.
///
/// The lifecycle manager calls the notify hooks at exactly these
/// transitions:
/// - `on_created` — the object exists but is not yet eligible;
/// - `on_eligible` — the object became sealed with zero references, or a
///   sealed object's reference count returned to zero;
/// - `on_ineligible` — a sealed object's reference count left zero;
/// - `on_removed` — the object is gone (deleted, aborted, or evicted);
///   stop tracking it entirely.
///
/// Any divergence from that schedule breaks the manager's eligibility
/// invariant, so implementations may assume the calls are well-formed
/// rather than validating them.
pub trait EvictionPolicy: Send {
    /// Start tracking a newly created object of `size` bytes.
    fn on_created(&mut self, id: ObjectId, size: u64);

    /// The object became an eviction candidate.
    fn on_eligible(&mut self, id: &ObjectId);

    /// The object stopped being an eviction candidate.
    fn on_ineligible(&mut self, id: &ObjectId);

    /// The object no longer exists; forget it.
    fn on_removed(&mut self, id: &ObjectId);

    /// Select currently-eligible victims whose sizes sum to at least
    /// `target_bytes`, in eviction order.
    ///
    /// If the eligible total falls short, returns every eligible id —
    /// best effort, not a guarantee.
    fn choose_victims(&self, target_bytes: u64) -> Vec<ObjectId>;

    /// Total bytes across currently-eligible objects.
    fn eligible_bytes(&self) -> u64;

    /// Internal state rendered for the operational debug dump.
    fn debug_string(&self) -> String;
}
