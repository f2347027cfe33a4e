//! Wrapped Kernel Primitives
//!
//! The unguarded kernel operations the gateway delegates to. They are
//! implemented by the scheduler, queue and timer code of the kernel proper;
//! this crate only consumes them.
//!
//! # Safety Contract
//! Every primitive taking a raw pointer dereferences it with full
//! privilege. Callers must pass either null (where the primitive accepts
//! it) or a pointer valid for the documented access and length. The
//! gateway establishes this for unprivileged callers by validating the
//! pointer against the caller's region table first.

pub mod types;

pub use types::{
    BaseType, Handle, NotifyAction, QueueHandle, QueuePosition, TaskHandle, TaskState, TaskStatus,
    TaskTag, TickType, TimeOut, TimerCommand, TimerHandle, MAX_DELAY,
};

/// Queue operations.
pub trait QueuePrimitives {
    /// Size in bytes of one item of `queue`.
    ///
    /// Called by the gateway before privilege is raised, to size the
    /// buffer check. Ports must make it safe to call from an unprivileged
    /// context, for example by keeping the item size outside the
    /// protected queue control block.
    fn item_size(&self, queue: QueueHandle) -> usize;

    /// Copy one item from `item` into the queue.
    ///
    /// # Safety
    /// `item` must be valid for reads of `item_size(queue)` bytes.
    unsafe fn generic_send(
        &self,
        queue: QueueHandle,
        item: *const u8,
        ticks_to_wait: TickType,
        position: QueuePosition,
    ) -> bool;

    /// Move the head item into `buffer`.
    ///
    /// # Safety
    /// `buffer` must be valid for writes of `item_size(queue)` bytes.
    unsafe fn receive(&self, queue: QueueHandle, buffer: *mut u8, ticks_to_wait: TickType)
        -> bool;

    /// Copy the head item into `buffer` without removing it.
    ///
    /// # Safety
    /// `buffer` must be valid for writes of `item_size(queue)` bytes.
    unsafe fn peek(&self, queue: QueueHandle, buffer: *mut u8, ticks_to_wait: TickType) -> bool;
}

/// Task, notification and timeout operations.
///
/// A `None` task handle means the calling task.
pub trait TaskPrimitives {
    /// Block until `*previous_wake + increment`, then advance `*previous_wake`.
    ///
    /// # Safety
    /// `previous_wake` must be valid for reads and writes.
    unsafe fn delay_until(&self, previous_wake: *mut TickType, increment: TickType) -> bool;

    /// Fill `*status` with a snapshot of `task`.
    ///
    /// # Safety
    /// `status` must be valid for writes.
    unsafe fn get_info(
        &self,
        task: Option<TaskHandle>,
        status: *mut TaskStatus,
        get_free_stack_space: bool,
        state: TaskState,
    );

    /// Write a human-readable task table into `buffer`.
    ///
    /// # Safety
    /// `buffer` must be valid for writes of `len` bytes.
    unsafe fn list_tasks(&self, buffer: *mut u8, len: usize);

    /// Write a human-readable run-time statistics table into `buffer`.
    ///
    /// # Safety
    /// `buffer` must be valid for writes of `len` bytes.
    unsafe fn run_time_stats(&self, buffer: *mut u8, len: usize);

    /// Capture the current tick state into `*timeout`.
    ///
    /// # Safety
    /// `timeout` must be valid for writes.
    unsafe fn set_timeout_state(&self, timeout: *mut TimeOut);

    /// Check whether the deadline captured in `*timeout` has passed,
    /// updating `*ticks_to_wait` with the time remaining.
    ///
    /// # Safety
    /// Both pointers must be valid for reads and writes.
    unsafe fn check_for_timeout(&self, timeout: *mut TimeOut, ticks_to_wait: *mut TickType)
        -> bool;

    /// Notify `task`, optionally returning its previous value.
    ///
    /// # Safety
    /// `previous_value` must be null or valid for writes.
    unsafe fn generic_notify(
        &self,
        task: TaskHandle,
        index: usize,
        value: u32,
        action: NotifyAction,
        previous_value: *mut u32,
    ) -> bool;

    /// Wait for a notification on `index`, optionally returning its value.
    ///
    /// # Safety
    /// `value` must be null or valid for writes.
    unsafe fn generic_notify_wait(
        &self,
        index: usize,
        clear_on_entry: u32,
        clear_on_exit: u32,
        value: *mut u32,
        ticks_to_wait: TickType,
    ) -> bool;

    /// Fill up to `capacity` entries of `statuses` with task snapshots,
    /// returning the number written.
    ///
    /// # Safety
    /// `statuses` must be valid for writes of `capacity` entries and
    /// `total_run_time` must be null or valid for writes.
    unsafe fn system_state(
        &self,
        statuses: *mut TaskStatus,
        capacity: usize,
        total_run_time: *mut u32,
    ) -> usize;

    /// Invoke the application hook registered for `task` with `parameter`.
    ///
    /// # Safety
    /// `parameter` must be valid for whatever the hook does with it.
    unsafe fn call_application_hook(&self, task: Option<TaskHandle>, parameter: *mut u8)
        -> BaseType;

    /// Read the application tag of `task`.
    fn application_tag(&self, task: Option<TaskHandle>) -> TaskTag;

    /// Set the application tag of `task`.
    fn set_application_tag(&self, task: Option<TaskHandle>, tag: TaskTag);
}

/// Software timer operations.
pub trait TimerPrimitives {
    /// Post `command` to the timer service.
    ///
    /// # Safety
    /// `higher_priority_woken` must be null or valid for writes.
    unsafe fn generic_command(
        &self,
        timer: TimerHandle,
        command: TimerCommand,
        value: TickType,
        higher_priority_woken: *mut BaseType,
        ticks_to_wait: TickType,
    ) -> bool;
}
