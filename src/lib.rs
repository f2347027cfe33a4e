//! kgate - Privilege-Checked Call Gateway
//!
//! Lets unprivileged tasks of an MPU-protected real-time kernel call
//! kernel primitives safely.
//!
//! # Components
//! - `mpu`: per-task region tables and buffer validation
//! - `privilege`: raise/restore protocol over the port's privilege register
//! - `task`: per-task privilege records and the task registry
//! - `kernel`: the wrapped primitives and the types they exchange
//! - `gateway`: the gated calls themselves
//!
//! # Security Features
//! - Every buffer an unprivileged task passes is checked against its own
//!   region table before the kernel touches it
//! - Privilege is raised only for the duration of the primitive and
//!   always restored to the entry level
//! - Privileged tasks pay no validation cost
//!
//! # Targets
//! - Bare metal (`no_std`, no heap)
//! - Host, with `privilege::SimulatedPort` standing in for the hardware

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod config;
pub mod gateway;
pub mod kernel;
pub mod mpu;
pub mod privilege;
pub mod task;

#[cfg(test)]
mod testutil;

pub use gateway::{BufferArg, CallContext, CallState, Gateway, NotPermitted};
pub use mpu::{Permission, RegionDescriptor, RegionTable};
pub use privilege::{PrivilegeController, PrivilegePort};
pub use task::{TaskId, TaskParameters, TaskPrivilegeRecord};

/// Crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
