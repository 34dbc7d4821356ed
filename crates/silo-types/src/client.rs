use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identity of the client connection that owns an object.
///
/// The request layer assigns these; Silo only carries them for accounting
/// and never interprets the value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClientId(u64);

impl ClientId {
    /// Wrap a raw client identifier.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw identifier value.
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "client:{}", self.0)
    }
}

impl From<u64> for ClientId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_raw_value() {
        let id = ClientId::new(42);
        assert_eq!(id.as_u64(), 42);
        assert_eq!(ClientId::from(42), id);
    }

    #[test]
    fn display_format() {
        assert_eq!(format!("{}", ClientId::new(7)), "client:7");
    }
}
