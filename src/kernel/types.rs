//! Kernel Object Handles and Value Types
//!
//! Opaque handles and plain-data types that cross the gateway unchanged.
//!
//! # Handle Structure
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      Handle<T>                           │
//! ├──────────────────────────────────────────────────────────┤
//! │  raw: usize              - Kernel-side object reference  │
//! │  _phantom: PhantomData   - Object kind (queue, task...)  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Handles are scalars as far as the gateway is concerned: they are passed
//! through untouched and never validated against region tables.

use core::fmt;
use core::marker::PhantomData;

/// Tick count type used for delays and timeouts.
pub type TickType = u32;

/// Signed result/flag word shared with the port layer.
pub type BaseType = i32;

/// Opaque per-task application tag.
pub type TaskTag = usize;

/// Block forever when used as a timeout.
pub const MAX_DELAY: TickType = TickType::MAX;

/// Typed, opaque reference to a kernel object.
pub struct Handle<T> {
    raw: usize,
    _phantom: PhantomData<T>,
}

impl<T> Handle<T> {
    /// Wrap a raw kernel object reference.
    #[inline]
    pub const fn from_raw(raw: usize) -> Self {
        Self {
            raw,
            _phantom: PhantomData,
        }
    }

    /// Get the raw reference.
    #[inline]
    pub const fn raw(self) -> usize {
        self.raw
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T> Eq for Handle<T> {}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({:#x})", self.raw)
    }
}

/// Marker types for kernel objects.
pub mod objects {
    /// Message queue.
    #[derive(Debug)]
    pub struct Queue;

    /// Task control block.
    #[derive(Debug)]
    pub struct Task;

    /// Software timer.
    #[derive(Debug)]
    pub struct Timer;
}

pub type QueueHandle = Handle<objects::Queue>;
pub type TaskHandle = Handle<objects::Task>;
pub type TimerHandle = Handle<objects::Timer>;

/// Where a queue send places the item.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum QueuePosition {
    Back = 0,
    Front = 1,
    Overwrite = 2,
}

/// Scheduler state of a task.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[repr(u8)]
pub enum TaskState {
    Running = 0,
    Ready = 1,
    Blocked = 2,
    Suspended = 3,
    Deleted = 4,
    /// Ask the kernel to determine the state itself.
    #[default]
    Invalid = 5,
}

/// Snapshot of one task, filled in by the kernel.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TaskStatus {
    pub handle: Option<TaskHandle>,
    pub name: &'static str,
    pub number: u32,
    pub state: TaskState,
    pub current_priority: u32,
    pub base_priority: u32,
    pub run_time_counter: u32,
    pub stack_base: usize,
    pub stack_high_water_mark: u16,
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self {
            handle: None,
            name: "",
            number: 0,
            state: TaskState::Invalid,
            current_priority: 0,
            base_priority: 0,
            run_time_counter: 0,
            stack_base: 0,
            stack_high_water_mark: 0,
        }
    }
}

/// Timeout bookkeeping captured by set-timeout-state.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct TimeOut {
    pub overflow_count: i32,
    pub entered_tick: TickType,
}

/// How a notification updates the target's notification value.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum NotifyAction {
    NoAction = 0,
    SetBits = 1,
    Increment = 2,
    SetValueWithOverwrite = 3,
    SetValueWithoutOverwrite = 4,
}

/// Commands accepted by the timer service.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(i8)]
pub enum TimerCommand {
    ExecuteCallbackFromIsr = -2,
    ExecuteCallback = -1,
    StartDontTrace = 0,
    Start = 1,
    Reset = 2,
    Stop = 3,
    ChangePeriod = 4,
    Delete = 5,
    StartFromIsr = 6,
    ResetFromIsr = 7,
    StopFromIsr = 8,
    ChangePeriodFromIsr = 9,
}
