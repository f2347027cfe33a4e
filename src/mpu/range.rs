//! Address Ranges
//!
//! Half-open `[start, start + len)` ranges over the flat address space the
//! MPU protects.
//!
//! # Security Properties
//! - The end address is computed with checked arithmetic; a range that
//!   would wrap the address space cannot be constructed
//! - Containment is a pure comparison on validated bounds

use core::fmt;

/// A contiguous, non-wrapping address range.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddrRange {
    start: usize,
    end: usize,
}

impl AddrRange {
    /// Create the range `[start, start + len)`.
    ///
    /// Returns `None` if the end address overflows.
    #[inline]
    pub const fn new(start: usize, len: usize) -> Option<Self> {
        match start.checked_add(len) {
            Some(end) => Some(Self { start, end }),
            None => None,
        }
    }

    /// First address inside the range.
    #[inline]
    pub const fn start(self) -> usize {
        self.start
    }

    /// First address past the range.
    #[inline]
    pub const fn end(self) -> usize {
        self.end
    }

    /// Length in bytes.
    #[inline]
    pub const fn len(self) -> usize {
        self.end - self.start
    }

    /// Check if the range covers no bytes.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Check if `other` lies entirely within this range.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Check if the two ranges share at least one byte.
    #[inline]
    pub const fn overlaps(self, other: Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Debug for AddrRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AddrRange({:#x}..{:#x})", self.start, self.end)
    }
}
