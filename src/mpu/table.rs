//! Region Table
//!
//! The ordered set of MPU regions one task may touch while unprivileged.
//!
//! # Design
//! - Fixed-size array of region slots, one per hardware MPU region
//! - Filled once, then installed wholesale into a task record
//! - No in-place edits after installation; a new table replaces the old one

use crate::config::MAX_REGIONS;

use super::region::{RegionDescriptor, RegionError};

/// A fixed-capacity, ordered set of region descriptors.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RegionTable {
    /// Region slots; only the first `len` are populated.
    slots: [Option<RegionDescriptor>; MAX_REGIONS],
    /// Number of populated slots.
    len: usize,
}

impl RegionTable {
    /// Create a table granting nothing.
    pub const fn empty() -> Self {
        Self {
            slots: [None; MAX_REGIONS],
            len: 0,
        }
    }

    /// Build a table from a list of descriptors, in order.
    pub fn from_regions(regions: &[RegionDescriptor]) -> Result<Self, RegionError> {
        let mut table = Self::empty();
        for region in regions {
            table.push(*region)?;
        }
        Ok(table)
    }

    /// Append a region to the next free slot.
    ///
    /// Only used while a table is being built; installed tables are
    /// reached through shared references.
    pub fn push(&mut self, region: RegionDescriptor) -> Result<(), RegionError> {
        let slot = self.slots.get_mut(self.len).ok_or(RegionError::TableFull)?;
        *slot = Some(region);
        self.len += 1;
        Ok(())
    }

    /// Number of populated regions.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Check if the table grants nothing.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Look up the region in slot `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&RegionDescriptor> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Iterate over populated regions in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &RegionDescriptor> + '_ {
        self.slots[..self.len].iter().flatten()
    }
}

impl Default for RegionTable {
    fn default() -> Self {
        Self::empty()
    }
}
