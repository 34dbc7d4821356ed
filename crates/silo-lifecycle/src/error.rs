use thiserror::Error;

use silo_types::ObjectId;

/// Everything a lifecycle operation can report as a failure.
///
/// This taxonomy is closed on purpose: callers dispatch on it, and a
/// variant that "shouldn't happen" is a bug in the manager, not a new
/// error case. Operations whose failure means "precondition not met"
/// (abort, reference counting) return `bool` instead.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum LifecycleError {
    /// An object with this id already exists; nothing was changed.
    #[error("object {0} already exists")]
    ObjectExists(ObjectId),

    /// The arena could not provide the bytes, even after eviction.
    #[error("out of memory: {size} bytes requested")]
    OutOfMemory { size: u64 },

    /// No object with this id is tracked.
    #[error("object {0} does not exist")]
    ObjectNonexistent(ObjectId),

    /// The operation requires a sealed object.
    #[error("object {0} is not sealed")]
    ObjectNotSealed(ObjectId),

    /// The object is referenced; its deletion was deferred.
    #[error("object {0} is in use, deletion deferred")]
    ObjectInUse(ObjectId),
}

/// Convenience alias for lifecycle results.
pub type LifecycleResult<T> = Result<T, LifecycleError>;
