//! Task Privilege Records
//!
//! The part of a task control block the gateway consults on every call:
//! who the task is, whether it runs privileged, and which regions it owns.

use core::fmt;

use crate::config::PRIVILEGE_BIT;
use crate::mpu::RegionTable;

/// Identity of a task.
///
/// A newtype so arbitrary integers are not mistaken for task handles.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct TaskId(u32);

impl TaskId {
    /// Create a task identity.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw value.
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TaskId({})", self.0)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Privilege-related task creation parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TaskParameters {
    /// Scheduling priority, without the privilege bit.
    pub priority: u32,
    /// Whether the task runs privileged.
    pub privileged: bool,
    /// Regions the task may access while unprivileged.
    pub regions: RegionTable,
}

impl TaskParameters {
    /// Parameters for a privileged task. Privileged tasks bypass
    /// validation, so they carry an empty table.
    pub const fn privileged(priority: u32) -> Self {
        Self {
            priority,
            privileged: true,
            regions: RegionTable::empty(),
        }
    }

    /// Parameters for a restricted task confined to `regions`.
    pub const fn unprivileged(priority: u32, regions: RegionTable) -> Self {
        Self {
            priority,
            privileged: false,
            regions,
        }
    }

    /// Split a raw creation priority carrying `PRIVILEGE_BIT`.
    ///
    /// `regions` is dropped if the bit is set.
    pub const fn from_raw_priority(raw: u32, regions: RegionTable) -> Self {
        let priority = raw & !PRIVILEGE_BIT;
        if raw & PRIVILEGE_BIT != 0 {
            Self::privileged(priority)
        } else {
            Self::unprivileged(priority, regions)
        }
    }
}

/// Per-task privilege state, owned by the task control block.
///
/// The gateway only ever borrows a record for the duration of one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPrivilegeRecord {
    id: TaskId,
    privileged: bool,
    regions: RegionTable,
}

impl TaskPrivilegeRecord {
    /// Create the record for a newly created task.
    pub fn new(id: TaskId, params: TaskParameters) -> Self {
        let regions = if params.privileged {
            RegionTable::empty()
        } else {
            params.regions
        };
        Self {
            id,
            privileged: params.privileged,
            regions,
        }
    }

    /// Owning task.
    #[inline]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Check if the task runs privileged.
    #[inline]
    pub const fn is_privileged(&self) -> bool {
        self.privileged
    }

    /// Regions the task may access while unprivileged.
    #[inline]
    pub const fn regions(&self) -> &RegionTable {
        &self.regions
    }

    /// Swap in a new region table as a whole, returning the old one.
    ///
    /// Requires exclusive access, so no gated call can be reading the
    /// table mid-swap.
    pub(crate) fn replace_regions(&mut self, regions: RegionTable) -> RegionTable {
        core::mem::replace(&mut self.regions, regions)
    }
}
