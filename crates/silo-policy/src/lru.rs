use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use silo_types::ObjectId;

use crate::traits::EvictionPolicy;

/// Least-recently-eligible-first eviction policy.
///
/// Every tracked object has a recorded size; eligible objects additionally
/// hold a position in a recency order keyed by a monotonic tick. Becoming
/// eligible (again) assigns a fresh tick, so victims come back
/// oldest-eligible-first — the object that has sat unreferenced the
/// longest goes first.
pub struct LruEvictionPolicy {
    /// Sizes of all tracked objects, eligible or not.
    sizes: HashMap<ObjectId, u64>,
    /// Eligible objects in recency order: tick → id, oldest first.
    order: BTreeMap<u64, ObjectId>,
    /// Reverse lookup: eligible id → its tick in `order`.
    ticks: HashMap<ObjectId, u64>,
    next_tick: u64,
    eligible_bytes: u64,
}

impl LruEvictionPolicy {
    /// Create an empty policy.
    pub fn new() -> Self {
        Self {
            sizes: HashMap::new(),
            order: BTreeMap::new(),
            ticks: HashMap::new(),
            next_tick: 0,
            eligible_bytes: 0,
        }
    }

    /// Number of tracked objects (eligible or not).
    pub fn tracked_count(&self) -> usize {
        self.sizes.len()
    }

    /// Number of currently-eligible objects.
    pub fn eligible_count(&self) -> usize {
        self.order.len()
    }
}

impl Default for LruEvictionPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl EvictionPolicy for LruEvictionPolicy {
    fn on_created(&mut self, id: ObjectId, size: u64) {
        let previous = self.sizes.insert(id, size);
        debug_assert!(previous.is_none(), "object created twice: {id:?}");
    }

    fn on_eligible(&mut self, id: &ObjectId) {
        debug_assert!(self.sizes.contains_key(id), "untracked object: {id:?}");
        debug_assert!(!self.ticks.contains_key(id), "already eligible: {id:?}");
        let tick = self.next_tick;
        self.next_tick += 1;
        self.order.insert(tick, *id);
        self.ticks.insert(*id, tick);
        self.eligible_bytes += self.sizes[id];
    }

    fn on_ineligible(&mut self, id: &ObjectId) {
        if let Some(tick) = self.ticks.remove(id) {
            self.order.remove(&tick);
            self.eligible_bytes -= self.sizes[id];
        } else {
            debug_assert!(false, "ineligible notification for non-candidate: {id:?}");
        }
    }

    fn on_removed(&mut self, id: &ObjectId) {
        if let Some(tick) = self.ticks.remove(id) {
            self.order.remove(&tick);
            self.eligible_bytes -= self.sizes[id];
        }
        let removed = self.sizes.remove(id);
        debug_assert!(removed.is_some(), "removed notification for untracked: {id:?}");
    }

    fn choose_victims(&self, target_bytes: u64) -> Vec<ObjectId> {
        let mut victims = Vec::new();
        let mut chosen_bytes = 0u64;
        for id in self.order.values() {
            if chosen_bytes >= target_bytes {
                break;
            }
            victims.push(*id);
            chosen_bytes += self.sizes[id];
        }
        debug!(
            target_bytes,
            chosen_bytes,
            victims = victims.len(),
            "selected eviction victims"
        );
        victims
    }

    fn eligible_bytes(&self) -> u64 {
        self.eligible_bytes
    }

    fn debug_string(&self) -> String {
        format!(
            "lru policy: {} tracked, {} eligible ({} bytes)",
            self.sizes.len(),
            self.order.len(),
            self.eligible_bytes
        )
    }
}

impl std::fmt::Debug for LruEvictionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LruEvictionPolicy")
            .field("tracked", &self.sizes.len())
            .field("eligible", &self.order.len())
            .field("eligible_bytes", &self.eligible_bytes)
            .finish()
    }
}
