use std::fs::OpenOptions;
use std::path::Path;

use memmap2::MmapMut;

use crate::error::{ArenaError, ArenaResult};
use crate::region::Region;

/// Memory-mapped bytes backing the primary arena.
///
/// The mapping resolves [`Region`]s handed out by an allocator of the same
/// capacity into byte slices. It performs no allocation bookkeeping of its
/// own — callers must only pass regions they currently own, the same rule
/// the allocator enforces for `free`.
///
/// Fallback regions live outside the primary arena and are not backed by
/// this mapping; resolving one is an error.
pub struct ArenaMapping {
    map: MmapMut,
}

impl ArenaMapping {
    /// Map an anonymous region of `capacity` bytes.
    pub fn anonymous(capacity: u64) -> ArenaResult<Self> {
        let map = MmapMut::map_anon(capacity as usize)?;
        Ok(Self { map })
    }

    /// Map `capacity` bytes backed by the file at `path`, creating and
    /// sizing the file as needed. This is the shape a multi-process
    /// deployment shares: every process maps the same file.
    pub fn file_backed(path: &Path, capacity: u64) -> ArenaResult<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;
        file.set_len(capacity)?;
        // Safety: the mapping is private to this process handle; Silo's
        // single-writer model serializes all mutation through one owner.
        let map = unsafe { MmapMut::map_mut(&file)? };
        Ok(Self { map })
    }

    /// Capacity of the mapping in bytes.
    pub fn capacity(&self) -> u64 {
        self.map.len() as u64
    }

    fn byte_range(&self, region: &Region) -> ArenaResult<std::ops::Range<usize>> {
        if region.fallback {
            return Err(ArenaError::UnmappedFallback(*region));
        }
        if region.end() > self.capacity() {
            return Err(ArenaError::OutOfBounds {
                offset: region.offset,
                len: region.len,
                capacity: self.capacity(),
            });
        }
        Ok(region.offset as usize..region.end() as usize)
    }

    /// Read-only view of a region's bytes.
    pub fn slice(&self, region: &Region) -> ArenaResult<&[u8]> {
        let range = self.byte_range(region)?;
        Ok(&self.map[range])
    }

    /// Mutable view of a region's bytes.
    pub fn slice_mut(&mut self, region: &Region) -> ArenaResult<&mut [u8]> {
        let range = self.byte_range(region)?;
        Ok(&mut self.map[range])
    }
}

impl std::fmt::Debug for ArenaMapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArenaMapping")
            .field("capacity", &self.capacity())
            .finish()
    }
}
