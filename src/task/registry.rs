//! Task Registry
//!
//! Holds the privilege record of every live task, from creation to
//! deletion.
//!
//! # Design
//! - Fixed-size array of record slots
//! - Task identities come from a monotonic counter and are never reused
//! - Operations: create, lookup, replace regions, delete
//!
//! # Security Properties
//! - A deleted task's identity no longer resolves
//! - Region replacement needs `&mut self`, which cannot coexist with a
//!   record borrowed by an in-flight gated call
//! - Privileged tasks keep an empty region table for their whole life
//!
//! # Locking
//! Gated calls may block inside the wrapped primitive. Take a `snapshot()`
//! of the caller's record under `TASKS.lock()` and release the lock before
//! entering the gateway; never hand it a borrow obtained through the guard.

use core::fmt;

use log::{debug, warn};
use spin::Mutex;

use crate::config::MAX_TASKS;
use crate::mpu::RegionTable;

use super::record::{TaskId, TaskParameters, TaskPrivilegeRecord};

/// Error type for registry operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskError {
    /// Every record slot is occupied.
    NoFreeSlot,
    /// No live task has this identity.
    UnknownTask,
    /// The identity counter has wrapped.
    IdsExhausted,
    /// Privileged tasks carry no region table.
    PrivilegedTask,
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFreeSlot => write!(f, "no free task slot"),
            Self::UnknownTask => write!(f, "unknown task"),
            Self::IdsExhausted => write!(f, "task identities exhausted"),
            Self::PrivilegedTask => write!(f, "task is privileged"),
        }
    }
}

/// Registry of live task privilege records.
#[derive(Debug)]
pub struct TaskRegistry {
    /// Record slots.
    slots: [Option<TaskPrivilegeRecord>; MAX_TASKS],
    /// Identity handed to the next created task.
    next_id: u32,
}

impl TaskRegistry {
    /// Create an empty registry.
    pub const fn new() -> Self {
        const EMPTY: Option<TaskPrivilegeRecord> = None;
        Self {
            slots: [EMPTY; MAX_TASKS],
            next_id: 1,
        }
    }

    /// Create the record for a new task.
    pub fn create(&mut self, params: TaskParameters) -> Result<TaskId, TaskError> {
        let Some(slot) = self.slots.iter_mut().find(|slot| slot.is_none()) else {
            warn!("task registry full ({} tasks)", MAX_TASKS);
            return Err(TaskError::NoFreeSlot);
        };

        let id = TaskId::new(self.next_id);
        let Some(next_id) = self.next_id.checked_add(1) else {
            warn!("task identities exhausted at {}", id);
            return Err(TaskError::IdsExhausted);
        };
        self.next_id = next_id;

        let record = slot.insert(TaskPrivilegeRecord::new(id, params));
        debug!(
            "task {} created: priority={} privileged={} regions={}",
            id,
            params.priority,
            record.is_privileged(),
            record.regions().len()
        );
        Ok(id)
    }

    /// Look up a live task's record.
    pub fn get(&self, id: TaskId) -> Result<&TaskPrivilegeRecord, TaskError> {
        self.slots
            .iter()
            .flatten()
            .find(|record| record.id() == id)
            .ok_or(TaskError::UnknownTask)
    }

    /// Copy a live task's record out of the registry.
    ///
    /// Use this to obtain the `caller` of a gated call, so the registry
    /// lock is not held while the primitive runs.
    pub fn snapshot(&self, id: TaskId) -> Result<TaskPrivilegeRecord, TaskError> {
        self.get(id).cloned()
    }

    /// Install a new region table for a task, returning the old one.
    ///
    /// Privileged tasks are refused with `TaskError::PrivilegedTask`.
    pub fn replace_regions(
        &mut self,
        id: TaskId,
        regions: RegionTable,
    ) -> Result<RegionTable, TaskError> {
        let Some(record) = self.record_mut(id) else {
            warn!("region replacement for unknown task {}", id);
            return Err(TaskError::UnknownTask);
        };
        if record.is_privileged() {
            warn!("region replacement refused for privileged task {}", id);
            return Err(TaskError::PrivilegedTask);
        }
        let count = regions.len();
        let old = record.replace_regions(regions);
        debug!("task {} regions replaced ({} -> {})", id, old.len(), count);
        Ok(old)
    }

    /// Remove a task's record.
    pub fn delete(&mut self, id: TaskId) -> Result<TaskPrivilegeRecord, TaskError> {
        let Some(slot) = self
            .slots
            .iter_mut()
            .find(|slot| slot.as_ref().is_some_and(|record| record.id() == id))
        else {
            warn!("delete of unknown task {}", id);
            return Err(TaskError::UnknownTask);
        };
        let record = slot.take().ok_or(TaskError::UnknownTask)?;
        debug!("task {} deleted", id);
        Ok(record)
    }

    /// Number of live tasks.
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Check if no task is live.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn record_mut(&mut self, id: TaskId) -> Option<&mut TaskPrivilegeRecord> {
        self.slots.iter_mut().flatten().find(|record| record.id() == id)
    }
}

impl Default for TaskRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Kernel-wide task registry protected by spinlock
pub static TASKS: Mutex<TaskRegistry> = Mutex::new(TaskRegistry::new());
