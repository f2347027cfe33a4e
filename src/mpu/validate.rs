//! Buffer Access Validation
//!
//! Decides whether a caller-supplied pointer/length pair lies inside memory
//! the calling task may touch with the requested access.
//!
//! # Security Principles
//! - Fail-secure: deny unless one region grants the whole buffer
//! - No splicing: a buffer spanning two regions is denied, even if each
//!   region grants the access on its own part (the MPU checks every
//!   access against a single region)
//! - Overflowing `ptr + len` is denied
//! - A null pointer is always authorized; gated calls use it for
//!   "no output wanted"
//!
//! The check is pure and bounded by `MAX_REGIONS` iterations, so it can run
//! with preemption enabled and inside interrupt-latency budgets.

use super::range::AddrRange;
use super::region::Permission;
use super::table::RegionTable;

/// Check a buffer against a task's region table.
///
/// # Arguments
/// * `table` - The calling task's region table
/// * `ptr` - Buffer address (0 means "no buffer")
/// * `len` - Buffer length in bytes
/// * `requested` - Accesses the kernel primitive will make
///
/// # Returns
/// `true` if `ptr` is null, or if a single region contains
/// `[ptr, ptr + len)` and grants every requested access.
pub fn is_authorized(
    table: &RegionTable,
    ptr: usize,
    len: usize,
    requested: Permission,
) -> bool {
    if ptr == 0 {
        return true;
    }

    let buffer = match AddrRange::new(ptr, len) {
        Some(buffer) => buffer,
        None => return false,
    };

    table.iter().any(|region| region.permits(buffer, requested))
}

/// The low-level "is this address range covered by an authorized region"
/// check used by the gateway.
///
/// Ports with hardware-assisted lookups can implement this against the MPU
/// registers; `RegionAuthority` is the portable implementation.
pub trait BufferAuthority {
    /// Same contract as [`is_authorized`].
    fn is_authorized(
        &self,
        table: &RegionTable,
        ptr: usize,
        len: usize,
        requested: Permission,
    ) -> bool;
}

impl<A: BufferAuthority + ?Sized> BufferAuthority for &A {
    #[inline]
    fn is_authorized(
        &self,
        table: &RegionTable,
        ptr: usize,
        len: usize,
        requested: Permission,
    ) -> bool {
        (**self).is_authorized(table, ptr, len, requested)
    }
}

/// Software region-table walk.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionAuthority;

impl BufferAuthority for RegionAuthority {
    #[inline]
    fn is_authorized(
        &self,
        table: &RegionTable,
        ptr: usize,
        len: usize,
        requested: Permission,
    ) -> bool {
        is_authorized(table, ptr, len, requested)
    }
}
