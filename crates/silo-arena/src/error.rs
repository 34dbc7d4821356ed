use crate::region::Region;

/// Errors from arena mapping operations.
#[derive(Debug, thiserror::Error)]
pub enum ArenaError {
    /// A region does not fall inside the mapped arena.
    #[error("region [{offset}, {offset}+{len}) out of bounds for arena of {capacity} bytes")]
    OutOfBounds { offset: u64, len: u64, capacity: u64 },

    /// Fallback regions live outside the primary arena and have no mapping.
    #[error("fallback region {0:?} is not backed by the arena mapping")]
    UnmappedFallback(Region),

    /// I/O error creating or growing the backing map.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for arena operations.
pub type ArenaResult<T> = Result<T, ArenaError>;
