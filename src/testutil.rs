//! Test doubles: spy kernel primitives, a spy buffer authority, and task
//! record builders.

use core::cell::{Cell, RefCell};
use core::mem::size_of;

use crate::kernel::{
    BaseType, NotifyAction, QueueHandle, QueuePosition, QueuePrimitives, TaskHandle, TaskPrimitives,
    TaskState, TaskStatus, TaskTag, TickType, TimeOut, TimerCommand, TimerHandle, TimerPrimitives,
};
use crate::mpu::{BufferAuthority, Permission, RegionAuthority, RegionDescriptor, RegionTable};
use crate::task::{TaskId, TaskParameters, TaskPrivilegeRecord};

/// Stack high-water mark reported when free stack space is requested.
pub const HIGH_WATER_MARK: u16 = 1234;

/// An unprivileged task owning the given `(base, len, permission)` regions.
pub fn restricted_task(regions: &[(usize, usize, Permission)]) -> TaskPrivilegeRecord {
    let mut table = RegionTable::empty();
    for &(base, len, perm) in regions {
        table.push(RegionDescriptor::new(base, len, perm).unwrap()).unwrap();
    }
    TaskPrivilegeRecord::new(TaskId::new(1), TaskParameters::unprivileged(1, table))
}

/// A privileged task.
pub fn trusted_task() -> TaskPrivilegeRecord {
    TaskPrivilegeRecord::new(TaskId::new(2), TaskParameters::privileged(1))
}

/// The region covering exactly `value`.
pub fn region_of<T>(value: &T, perm: Permission) -> (usize, usize, Permission) {
    (value as *const T as usize, size_of::<T>(), perm)
}

/// One recorded primitive invocation, pointers reduced to addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Call {
    QueueSend {
        queue: QueueHandle,
        item: usize,
        ticks: TickType,
        position: QueuePosition,
    },
    QueueReceive {
        queue: QueueHandle,
        buffer: usize,
        ticks: TickType,
    },
    QueuePeek {
        queue: QueueHandle,
        buffer: usize,
        ticks: TickType,
    },
    DelayUntil {
        previous_wake: usize,
        increment: TickType,
    },
    GetInfo {
        task: Option<TaskHandle>,
        status: usize,
        get_free_stack_space: bool,
        state: TaskState,
    },
    ListTasks {
        buffer: usize,
        len: usize,
    },
    RunTimeStats {
        buffer: usize,
        len: usize,
    },
    SetTimeoutState {
        timeout: usize,
    },
    CheckForTimeout {
        timeout: usize,
        ticks_to_wait: usize,
    },
    Notify {
        task: TaskHandle,
        index: usize,
        value: u32,
        action: NotifyAction,
        previous_value: usize,
    },
    NotifyWait {
        index: usize,
        clear_on_entry: u32,
        clear_on_exit: u32,
        value: usize,
        ticks: TickType,
    },
    SystemState {
        statuses: usize,
        capacity: usize,
        total_run_time: usize,
    },
    ApplicationHook {
        task: Option<TaskHandle>,
        parameter: usize,
    },
    GetTag {
        task: Option<TaskHandle>,
    },
    SetTag {
        task: Option<TaskHandle>,
        tag: TaskTag,
    },
    TimerCommand {
        timer: TimerHandle,
        command: TimerCommand,
        value: TickType,
        higher_priority_woken: usize,
        ticks: TickType,
    },
}

/// Kernel primitives that record every call and return canned results.
///
/// Output pointers are written only when non-null, like the real kernel.
pub struct SpyKernel {
    pub item_size: usize,
    pub result: bool,
    pub hook_result: BaseType,
    pub tag: Cell<TaskTag>,
    pub tasks: usize,
    item_size_queries: Cell<usize>,
    calls: RefCell<Vec<Call>>,
}

impl SpyKernel {
    pub fn new(result: bool) -> Self {
        Self {
            item_size: 1,
            result,
            hook_result: 1,
            tag: Cell::new(0),
            tasks: 3,
            item_size_queries: Cell::new(0),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn item_size_queries(&self) -> usize {
        self.item_size_queries.get()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl QueuePrimitives for SpyKernel {
    fn item_size(&self, _queue: QueueHandle) -> usize {
        self.item_size_queries.set(self.item_size_queries.get() + 1);
        self.item_size
    }

    unsafe fn generic_send(
        &self,
        queue: QueueHandle,
        item: *const u8,
        ticks: TickType,
        position: QueuePosition,
    ) -> bool {
        self.record(Call::QueueSend {
            queue,
            item: item as usize,
            ticks,
            position,
        });
        self.result
    }

    unsafe fn receive(&self, queue: QueueHandle, buffer: *mut u8, ticks: TickType) -> bool {
        self.record(Call::QueueReceive {
            queue,
            buffer: buffer as usize,
            ticks,
        });
        self.result
    }

    unsafe fn peek(&self, queue: QueueHandle, buffer: *mut u8, ticks: TickType) -> bool {
        self.record(Call::QueuePeek {
            queue,
            buffer: buffer as usize,
            ticks,
        });
        self.result
    }
}

impl TaskPrimitives for SpyKernel {
    unsafe fn delay_until(&self, previous_wake: *mut TickType, increment: TickType) -> bool {
        self.record(Call::DelayUntil {
            previous_wake: previous_wake as usize,
            increment,
        });
        if !previous_wake.is_null() {
            // SAFETY: caller guarantees validity
            unsafe { *previous_wake = (*previous_wake).wrapping_add(increment) };
        }
        self.result
    }

    unsafe fn get_info(
        &self,
        task: Option<TaskHandle>,
        status: *mut TaskStatus,
        get_free_stack_space: bool,
        state: TaskState,
    ) {
        self.record(Call::GetInfo {
            task,
            status: status as usize,
            get_free_stack_space,
            state,
        });
        if status.is_null() {
            return;
        }
        // SAFETY: caller guarantees validity
        let status = unsafe { &mut *status };
        status.handle = task;
        status.state = match state {
            TaskState::Invalid => TaskState::Suspended,
            other => other,
        };
        if get_free_stack_space {
            status.stack_high_water_mark = HIGH_WATER_MARK;
        }
    }

    unsafe fn list_tasks(&self, buffer: *mut u8, len: usize) {
        self.record(Call::ListTasks {
            buffer: buffer as usize,
            len,
        });
    }

    unsafe fn run_time_stats(&self, buffer: *mut u8, len: usize) {
        self.record(Call::RunTimeStats {
            buffer: buffer as usize,
            len,
        });
    }

    unsafe fn set_timeout_state(&self, timeout: *mut TimeOut) {
        self.record(Call::SetTimeoutState {
            timeout: timeout as usize,
        });
    }

    unsafe fn check_for_timeout(
        &self,
        timeout: *mut TimeOut,
        ticks_to_wait: *mut TickType,
    ) -> bool {
        self.record(Call::CheckForTimeout {
            timeout: timeout as usize,
            ticks_to_wait: ticks_to_wait as usize,
        });
        self.result
    }

    unsafe fn generic_notify(
        &self,
        task: TaskHandle,
        index: usize,
        value: u32,
        action: NotifyAction,
        previous_value: *mut u32,
    ) -> bool {
        self.record(Call::Notify {
            task,
            index,
            value,
            action,
            previous_value: previous_value as usize,
        });
        self.result
    }

    unsafe fn generic_notify_wait(
        &self,
        index: usize,
        clear_on_entry: u32,
        clear_on_exit: u32,
        value: *mut u32,
        ticks: TickType,
    ) -> bool {
        self.record(Call::NotifyWait {
            index,
            clear_on_entry,
            clear_on_exit,
            value: value as usize,
            ticks,
        });
        if !value.is_null() {
            // SAFETY: caller guarantees validity
            unsafe { *value = 0x5a5a };
        }
        self.result
    }

    unsafe fn system_state(
        &self,
        statuses: *mut TaskStatus,
        capacity: usize,
        total_run_time: *mut u32,
    ) -> usize {
        self.record(Call::SystemState {
            statuses: statuses as usize,
            capacity,
            total_run_time: total_run_time as usize,
        });
        let written = self.tasks.min(capacity);
        for i in 0..written {
            // SAFETY: caller guarantees `capacity` writable entries
            unsafe {
                statuses.add(i).write(TaskStatus {
                    number: i as u32 + 1,
                    state: TaskState::Ready,
                    ..TaskStatus::default()
                })
            };
        }
        written
    }

    unsafe fn call_application_hook(
        &self,
        task: Option<TaskHandle>,
        parameter: *mut u8,
    ) -> BaseType {
        self.record(Call::ApplicationHook {
            task,
            parameter: parameter as usize,
        });
        self.hook_result
    }

    fn application_tag(&self, task: Option<TaskHandle>) -> TaskTag {
        self.record(Call::GetTag { task });
        self.tag.get()
    }

    fn set_application_tag(&self, task: Option<TaskHandle>, tag: TaskTag) {
        self.record(Call::SetTag { task, tag });
        self.tag.set(tag);
    }
}

impl TimerPrimitives for SpyKernel {
    unsafe fn generic_command(
        &self,
        timer: TimerHandle,
        command: TimerCommand,
        value: TickType,
        higher_priority_woken: *mut BaseType,
        ticks: TickType,
    ) -> bool {
        self.record(Call::TimerCommand {
            timer,
            command,
            value,
            higher_priority_woken: higher_priority_woken as usize,
            ticks,
        });
        self.result
    }
}

/// Buffer authority that counts and records checks, then defers to the
/// region-table walk.
#[derive(Default)]
pub struct SpyAuthority {
    checks: RefCell<Vec<(usize, usize, Permission)>>,
}

impl SpyAuthority {
    pub fn calls(&self) -> usize {
        self.checks.borrow().len()
    }

    pub fn checks(&self) -> Vec<(usize, usize, Permission)> {
        self.checks.borrow().clone()
    }
}

impl BufferAuthority for SpyAuthority {
    fn is_authorized(
        &self,
        table: &RegionTable,
        ptr: usize,
        len: usize,
        requested: Permission,
    ) -> bool {
        self.checks.borrow_mut().push((ptr, len, requested));
        RegionAuthority.is_authorized(table, ptr, len, requested)
    }
}
