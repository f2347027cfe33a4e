//! Memory Protection Regions
//!
//! Describes what memory an unprivileged task may touch, and checks
//! caller-supplied buffers against that description.
//!
//! # Design
//! - Each task owns one `RegionTable` of up to `MAX_REGIONS` descriptors
//! - Tables are built at task creation and replaced only as a whole
//! - Validation is a pure function of (table, pointer, length, permission)
//!
//! # Security Properties
//! - A buffer is authorized only if a single region contains all of it
//! - Address arithmetic is checked; wrapping ranges are never authorized

pub mod range;
pub mod region;
pub mod table;
pub mod validate;

pub use range::AddrRange;
pub use region::{Permission, RegionDescriptor, RegionError};
pub use table::RegionTable;
pub use validate::{is_authorized, BufferAuthority, RegionAuthority};
