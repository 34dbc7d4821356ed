use std::collections::hash_map::Entry;
use std::collections::HashMap;

use silo_types::ObjectId;

use crate::error::{StoreError, StoreResult};
use crate::record::LocalObject;
use crate::traits::ObjectStore;

/// In-memory, `HashMap`-based object store.
///
/// The production backend: object records are process-local metadata, so a
/// plain map is all the storage this boundary ever needs. No interior
/// locking — the lifecycle manager is the single writer.
pub struct InMemoryObjectStore {
    objects: HashMap<ObjectId, LocalObject>,
}

impl InMemoryObjectStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            objects: HashMap::new(),
        }
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectStore for InMemoryObjectStore {
    fn create(&mut self, object: LocalObject) -> StoreResult<&LocalObject> {
        match self.objects.entry(object.id()) {
            Entry::Occupied(occupied) => Err(StoreError::AlreadyExists(*occupied.key())),
            Entry::Vacant(vacant) => Ok(vacant.insert(object)),
        }
    }

    fn get(&self, id: &ObjectId) -> Option<&LocalObject> {
        self.objects.get(id)
    }

    fn get_mut(&mut self, id: &ObjectId) -> Option<&mut LocalObject> {
        self.objects.get_mut(id)
    }

    fn remove(&mut self, id: &ObjectId) -> StoreResult<LocalObject> {
        self.objects.remove(id).ok_or(StoreError::NotFound(*id))
    }

    fn len(&self) -> usize {
        self.objects.len()
    }

    fn for_each(&self, visit: &mut dyn FnMut(&LocalObject)) {
        for object in self.objects.values() {
            visit(object);
        }
    }
}

impl std::fmt::Debug for InMemoryObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryObjectStore")
            .field("object_count", &self.len())
            .finish()
    }
}
