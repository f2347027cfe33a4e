//! Task Privilege State
//!
//! Records, per task, whether it runs privileged and which memory it may
//! touch, for the whole life of the task.
//!
//! # Lifecycle
//! - Created with the task, from its creation parameters
//! - Read by every gated call the task makes
//! - Region tables replaced only as a whole
//! - Destroyed with the task; a task cannot be deleted out from under
//!   its own gated call

pub mod record;
pub mod registry;

pub use record::{TaskId, TaskParameters, TaskPrivilegeRecord};
pub use registry::{TaskError, TaskRegistry, TASKS};
