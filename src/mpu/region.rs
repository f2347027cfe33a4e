//! Region Descriptors and Access Permissions
//!
//! One `RegionDescriptor` describes one MPU slot: a contiguous address range
//! and the accesses an unprivileged task may make inside it.
//!
//! # Descriptor Structure
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    RegionDescriptor                      │
//! ├──────────────────────────────────────────────────────────┤
//! │  range: AddrRange        - [base, base + length)         │
//! │  permission: Permission  - READ, WRITE, both or none     │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Descriptors are immutable once built. Overlapping descriptors are allowed;
//! they come from trusted task creation parameters.

use core::fmt;

use bitflags::bitflags;

use super::range::AddrRange;

bitflags! {
    /// Accesses granted by a region, or requested for a buffer.
    ///
    /// A region satisfies a request when its bits are a superset of the
    /// requested bits.
    #[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
    pub struct Permission: u8 {
        /// The buffer is read by the kernel primitive.
        const READ = 1 << 0;
        /// The buffer is written by the kernel primitive.
        const WRITE = 1 << 1;
        /// The buffer is both read and written.
        const READ_WRITE = Self::READ.bits() | Self::WRITE.bits();
    }
}

/// Error type for region and region table construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionError {
    /// `base + length` wraps the address space.
    Overflow,
    /// The region covers no bytes.
    Empty,
    /// Every hardware region slot is already in use.
    TableFull,
}

impl fmt::Display for RegionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overflow => write!(f, "region end overflows address space"),
            Self::Empty => write!(f, "region has zero length"),
            Self::TableFull => write!(f, "no free region slot"),
        }
    }
}

/// A memory region with attached access rights.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RegionDescriptor {
    range: AddrRange,
    permission: Permission,
}

impl RegionDescriptor {
    /// Create a descriptor for `[base, base + length)`.
    pub const fn new(
        base: usize,
        length: usize,
        permission: Permission,
    ) -> Result<Self, RegionError> {
        if length == 0 {
            return Err(RegionError::Empty);
        }
        match AddrRange::new(base, length) {
            Some(range) => Ok(Self { range, permission }),
            None => Err(RegionError::Overflow),
        }
    }

    /// Base address of the region.
    #[inline]
    pub const fn base(&self) -> usize {
        self.range.start()
    }

    /// Length of the region in bytes.
    #[inline]
    pub const fn length(&self) -> usize {
        self.range.len()
    }

    /// Address range covered by the region.
    #[inline]
    pub const fn range(&self) -> AddrRange {
        self.range
    }

    /// Accesses granted inside the region.
    #[inline]
    pub const fn permission(&self) -> Permission {
        self.permission
    }

    /// Check if this single region grants `requested` over all of `buffer`.
    #[inline]
    pub fn permits(&self, buffer: AddrRange, requested: Permission) -> bool {
        self.range.contains(buffer) && self.permission.contains(requested)
    }
}

impl fmt::Debug for RegionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Region({:#x}+{:#x}, {:?})",
            self.base(),
            self.length(),
            self.permission
        )
    }
}
