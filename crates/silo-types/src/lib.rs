//! Foundation types for Silo, a capacity-bounded shared-memory object store.
//!
//! This crate provides the identity and metadata types used throughout the
//! Silo system. Every other Silo crate depends on `silo-types`.
//!
//! # Key Types
//!
//! - [`ObjectId`] — Externally supplied, globally unique 32-byte object identifier
//! - [`ClientId`] — Opaque identity of the client that created an object
//! - [`ObjectInfo`] — Immutable creation-time metadata (sizes, owner)
//! - [`ObjectSource`] — Closed tag recording how an object came to exist

pub mod client;
pub mod error;
pub mod info;
pub mod object;

pub use client::ClientId;
pub use error::TypeError;
pub use info::{ObjectInfo, ObjectSource};
pub use object::ObjectId;
