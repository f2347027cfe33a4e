//! Task, Notification and Timeout Gated Calls

use core::mem::size_of;

use crate::kernel::{
    BaseType, NotifyAction, TaskHandle, TaskPrimitives, TaskState, TaskStatus, TaskTag, TickType,
    TimeOut,
};
use crate::mpu::{BufferAuthority, Permission};
use crate::privilege::PrivilegePort;
use crate::task::TaskPrivilegeRecord;

use super::{BufferArg, Gateway};

impl<K: TaskPrimitives, P: PrivilegePort, A: BufferAuthority> Gateway<K, P, A> {
    /// Block until `*previous_wake + increment`.
    ///
    /// `*previous_wake` is read and advanced by the kernel.
    ///
    /// # Safety
    /// A privileged caller's `previous_wake` must be valid for reads and
    /// writes.
    pub unsafe fn task_delay_until(
        &self,
        caller: &TaskPrivilegeRecord,
        previous_wake: *mut TickType,
        increment: TickType,
    ) -> bool {
        self.invoke(
            caller,
            |_| [BufferArg::read_write(previous_wake)],
            // SAFETY: `previous_wake` validated, or caller privileged
            |k| unsafe { k.delay_until(previous_wake, increment) },
        )
    }

    /// Snapshot `task` into `*status`.
    ///
    /// A denied call leaves `*status` untouched.
    ///
    /// # Safety
    /// A privileged caller's `status` must be valid for writes.
    pub unsafe fn task_get_info(
        &self,
        caller: &TaskPrivilegeRecord,
        task: Option<TaskHandle>,
        status: *mut TaskStatus,
        get_free_stack_space: bool,
        state: TaskState,
    ) {
        self.invoke(
            caller,
            |_| [BufferArg::write(status)],
            // SAFETY: `status` validated, or caller privileged
            |k| unsafe { k.get_info(task, status, get_free_stack_space, state) },
        )
    }

    /// Write the task table as text into `buffer[..len]`.
    ///
    /// # Safety
    /// A privileged caller's `buffer` must be valid for writes of `len` bytes.
    pub unsafe fn task_list(&self, caller: &TaskPrivilegeRecord, buffer: *mut u8, len: usize) {
        self.invoke(
            caller,
            |_| [BufferArg::bytes(buffer.cast_const(), len, Permission::WRITE)],
            // SAFETY: `buffer[..len]` validated, or caller privileged
            |k| unsafe { k.list_tasks(buffer, len) },
        )
    }

    /// Write run-time statistics as text into `buffer[..len]`.
    ///
    /// # Safety
    /// A privileged caller's `buffer` must be valid for writes of `len` bytes.
    pub unsafe fn task_run_time_stats(
        &self,
        caller: &TaskPrivilegeRecord,
        buffer: *mut u8,
        len: usize,
    ) {
        self.invoke(
            caller,
            |_| [BufferArg::bytes(buffer.cast_const(), len, Permission::WRITE)],
            // SAFETY: `buffer[..len]` validated, or caller privileged
            |k| unsafe { k.run_time_stats(buffer, len) },
        )
    }

    /// Capture the current tick state into `*timeout`.
    ///
    /// # Safety
    /// A privileged caller's `timeout` must be valid for writes.
    pub unsafe fn task_set_timeout_state(
        &self,
        caller: &TaskPrivilegeRecord,
        timeout: *mut TimeOut,
    ) {
        self.invoke(
            caller,
            |_| [BufferArg::write(timeout)],
            // SAFETY: `timeout` validated, or caller privileged
            |k| unsafe { k.set_timeout_state(timeout) },
        )
    }

    /// Check whether the deadline in `*timeout` has elapsed.
    ///
    /// Both `*timeout` and `*ticks_to_wait` are read and updated.
    ///
    /// # Safety
    /// A privileged caller's pointers must be valid for reads and writes.
    pub unsafe fn task_check_for_timeout(
        &self,
        caller: &TaskPrivilegeRecord,
        timeout: *mut TimeOut,
        ticks_to_wait: *mut TickType,
    ) -> bool {
        self.invoke(
            caller,
            |_| {
                [
                    BufferArg::read_write(timeout),
                    BufferArg::read_write(ticks_to_wait),
                ]
            },
            // SAFETY: both pointers validated, or caller privileged
            |k| unsafe { k.check_for_timeout(timeout, ticks_to_wait) },
        )
    }

    /// Send a notification to `task`.
    ///
    /// `previous_value` may be null if the prior value is not wanted.
    ///
    /// # Safety
    /// A privileged caller's `previous_value` must be null or valid for
    /// writes.
    pub unsafe fn task_generic_notify(
        &self,
        caller: &TaskPrivilegeRecord,
        task: TaskHandle,
        index: usize,
        value: u32,
        action: NotifyAction,
        previous_value: *mut u32,
    ) -> bool {
        self.invoke(
            caller,
            |_| [BufferArg::write(previous_value)],
            // SAFETY: `previous_value` null or validated, or caller privileged
            |k| unsafe { k.generic_notify(task, index, value, action, previous_value) },
        )
    }

    /// Wait for a notification on `index`.
    ///
    /// `value` may be null if the notification value is not wanted.
    ///
    /// # Safety
    /// A privileged caller's `value` must be null or valid for writes.
    pub unsafe fn task_generic_notify_wait(
        &self,
        caller: &TaskPrivilegeRecord,
        index: usize,
        clear_on_entry: u32,
        clear_on_exit: u32,
        value: *mut u32,
        ticks_to_wait: TickType,
    ) -> bool {
        self.invoke(
            caller,
            |_| [BufferArg::write(value)],
            // SAFETY: `value` null or validated, or caller privileged
            |k| unsafe {
                k.generic_notify_wait(index, clear_on_entry, clear_on_exit, value, ticks_to_wait)
            },
        )
    }

    /// Fill `statuses[..capacity]` with task snapshots.
    ///
    /// The array is checked for exactly `capacity` entries.
    ///
    /// # Returns
    /// Number of entries written, or 0 if denied.
    ///
    /// # Safety
    /// A privileged caller's `statuses` must be valid for writes of
    /// `capacity` entries; `total_run_time` null or valid for writes.
    pub unsafe fn task_system_state(
        &self,
        caller: &TaskPrivilegeRecord,
        statuses: *mut TaskStatus,
        capacity: usize,
        total_run_time: *mut u32,
    ) -> usize {
        self.invoke(
            caller,
            |_| {
                [
                    BufferArg::array(statuses.cast_const(), capacity, Permission::WRITE),
                    BufferArg::write(total_run_time),
                ]
            },
            // SAFETY: both buffers null or validated, or caller privileged
            |k| unsafe { k.system_state(statuses, capacity, total_run_time) },
        )
    }

    /// Invoke the application hook of `task` with `*parameter`.
    ///
    /// The hook may both read and write the parameter.
    ///
    /// # Safety
    /// A privileged caller's `parameter` must be valid for whatever the
    /// hook does with it.
    pub unsafe fn task_call_application_hook<T>(
        &self,
        caller: &TaskPrivilegeRecord,
        task: Option<TaskHandle>,
        parameter: *mut T,
    ) -> BaseType {
        self.invoke(
            caller,
            |_| {
                [BufferArg::bytes(
                    parameter.cast_const().cast(),
                    size_of::<T>(),
                    Permission::READ_WRITE,
                )]
            },
            // SAFETY: `parameter` validated, or caller privileged
            |k| unsafe { k.call_application_hook(task, parameter.cast()) },
        )
    }

    /// Read the application tag of `task`.
    pub fn task_application_tag(
        &self,
        caller: &TaskPrivilegeRecord,
        task: Option<TaskHandle>,
    ) -> TaskTag {
        self.invoke(caller, |_| [] as [BufferArg; 0], |k| k.application_tag(task))
    }

    /// Set the application tag of `task`.
    pub fn task_set_application_tag(
        &self,
        caller: &TaskPrivilegeRecord,
        task: Option<TaskHandle>,
        tag: TaskTag,
    ) {
        self.invoke(caller, |_| [] as [BufferArg; 0], |k| k.set_application_tag(task, tag))
    }
}
