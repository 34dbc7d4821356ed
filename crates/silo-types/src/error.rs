use thiserror::Error;

/// Failures when parsing or converting foundation types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    /// The input was not valid hexadecimal.
    #[error("malformed hex: {0}")]
    InvalidHex(String),

    /// The input decoded to the wrong number of bytes.
    #[error("expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}
