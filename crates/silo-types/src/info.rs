use std::fmt;

use serde::{Deserialize, Serialize};

use crate::client::ClientId;
use crate::object::ObjectId;

/// How an object came to exist.
///
/// Carried for accounting only; the lifecycle state machine treats all
/// sources identically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectSource {
    /// Created by a client writing data into the arena.
    ClientWrite,
    /// Placeholder recording an error in place of real data.
    ErrorPlaceholder,
    /// Re-created from an external copy via fallback allocation.
    Restored,
}

impl fmt::Display for ObjectSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClientWrite => write!(f, "client-write"),
            Self::ErrorPlaceholder => write!(f, "error-placeholder"),
            Self::Restored => write!(f, "restored"),
        }
    }
}

/// Immutable metadata supplied when an object is created.
///
/// `ObjectInfo` is fixed at creation and copied into the object record;
/// nothing in it changes for the life of the object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectInfo {
    /// The identifier the object will live under.
    pub object_id: ObjectId,
    /// Requested size of the data payload in bytes.
    pub data_size: u64,
    /// Requested size of the metadata payload in bytes.
    pub metadata_size: u64,
    /// The client that requested creation.
    pub owner: ClientId,
}

impl ObjectInfo {
    /// Create metadata for a new object.
    pub fn new(object_id: ObjectId, data_size: u64, metadata_size: u64, owner: ClientId) -> Self {
        Self {
            object_id,
            data_size,
            metadata_size,
            owner,
        }
    }

    /// Total allocation footprint: data plus metadata.
    pub fn object_size(&self) -> u64 {
        self.data_size + self.metadata_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_info() -> ObjectInfo {
        ObjectInfo::new(ObjectId::from_bytes(b"sample"), 1000, 24, ClientId::new(1))
    }

    #[test]
    fn object_size_sums_data_and_metadata() {
        let info = sample_info();
        assert_eq!(info.object_size(), 1024);
    }

    #[test]
    fn zero_sized_object_is_legal() {
        let info = ObjectInfo::new(ObjectId::null(), 0, 0, ClientId::new(0));
        assert_eq!(info.object_size(), 0);
    }

    #[test]
    fn serde_roundtrip() {
        let info = sample_info();
        let json = serde_json::to_string(&info).unwrap();
        let parsed: ObjectInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(info, parsed);
    }

    #[test]
    fn source_display() {
        assert_eq!(format!("{}", ObjectSource::ClientWrite), "client-write");
        assert_eq!(
            format!("{}", ObjectSource::ErrorPlaceholder),
            "error-placeholder"
        );
        assert_eq!(format!("{}", ObjectSource::Restored), "restored");
    }
}
