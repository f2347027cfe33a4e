//! Compile-time Configuration
//!
//! Sizing and encoding constants shared by the region tables, the task
//! registry and task creation.
//!
//! # Notes
//! - Values mirror what the target MPU and port layer can support
//! - Changing `MAX_REGIONS` changes the per-task footprint of every
//!   `TaskPrivilegeRecord`

/// Memory protection unit limits
pub mod mpu {
    /// Number of MPU region slots one task may own.
    pub const MAX_REGIONS: usize = 8;
}

/// Task registry limits and creation encoding
pub mod tasks {
    /// Number of task records the registry can hold at once.
    pub const MAX_TASKS: usize = 16;

    /// Bit OR-ed into a creation priority to request privileged execution.
    pub const PRIVILEGE_BIT: u32 = 0x8000_0000;
}

pub use mpu::MAX_REGIONS;
pub use tasks::{MAX_TASKS, PRIVILEGE_BIT};
