//! Arena allocation for Silo, a capacity-bounded shared-memory object store.
//!
//! This crate owns the allocation boundary: carving byte ranges out of a
//! fixed-capacity arena so that object data can be shared between processes
//! without copying. Allocation failure is a normal outcome here — the
//! lifecycle manager responds to it by evicting objects, not by erroring out.
//!
//! # Components
//!
//! - [`Allocator`] — the contract the lifecycle manager allocates through
//! - [`Region`] — an allocated byte range (offset + length + fallback flag)
//! - [`ArenaAllocator`] — first-fit free-list allocator over the primary
//!   arena, with bump-allocated fallback capacity beyond it
//! - [`ArenaMapping`] — `mmap`-backed bytes addressed by [`Region`]s
//!
//! # Design Rules
//!
//! 1. A region is carved once and freed exactly once; the allocator never
//!    inspects or retains region contents.
//! 2. Primary allocation never exceeds the configured capacity; fallback
//!    allocation draws only from the explicit overflow budget.
//! 3. Running totals (`allocated`, `fallback_allocated`) always equal the
//!    sum of outstanding regions.

pub mod arena;
pub mod config;
pub mod error;
pub mod mapping;
pub mod region;
pub mod traits;

pub use arena::ArenaAllocator;
pub use config::ArenaConfig;
pub use error::{ArenaError, ArenaResult};
pub use mapping::ArenaMapping;
pub use region::Region;
pub use traits::Allocator;
