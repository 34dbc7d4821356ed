use silo_types::ObjectId;

/// Failures from the object record store.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    /// A live record already exists under this id.
    #[error("record already present for {0}")]
    AlreadyExists(ObjectId),

    /// No live record exists under this id.
    #[error("no record for {0}")]
    NotFound(ObjectId),
}

/// Convenience alias for fallible store calls.
pub type StoreResult<T> = Result<T, StoreError>;
