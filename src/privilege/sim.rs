//! Simulated Privilege Register
//!
//! A host-side stand-in for the processor's privilege control register.
//! Used by tests and by host simulations of the kernel.
//!
//! The register belongs to the executing context. `switch()` plays the part
//! of the port layer's context switch: it saves the outgoing context's live
//! level and loads the incoming one, so a task preempted between `raise()`
//! and `restore()` resumes privileged.

use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::task::TaskPrivilegeRecord;

use super::PrivilegePort;

/// Privilege level saved with a switched-out execution context.
///
/// Not `Clone`; each saved level is resumed at most once.
#[must_use = "a saved context must be handed back to SimulatedPort::switch"]
#[derive(Debug, PartialEq, Eq)]
pub struct SavedContext {
    privileged: bool,
}

impl SavedContext {
    /// Context of a task that has not run yet: its creation-time level.
    pub const fn fresh(task: &TaskPrivilegeRecord) -> Self {
        Self {
            privileged: task.is_privileged(),
        }
    }

    /// Check if the context was privileged when saved.
    #[inline]
    pub const fn was_privileged(&self) -> bool {
        self.privileged
    }
}

/// Simulated privilege register with access counters.
#[derive(Debug, Default)]
pub struct SimulatedPort {
    privileged: AtomicBool,
    raises: AtomicUsize,
    resets: AtomicUsize,
}

impl SimulatedPort {
    /// Create a register starting at the given level.
    pub const fn new(privileged: bool) -> Self {
        Self {
            privileged: AtomicBool::new(privileged),
            raises: AtomicUsize::new(0),
            resets: AtomicUsize::new(0),
        }
    }

    /// Switch to `incoming`, returning the outgoing context's saved level.
    ///
    /// Does not count as a raise or reset.
    pub fn switch(&self, incoming: SavedContext) -> SavedContext {
        let outgoing = self.privileged.swap(incoming.privileged, Ordering::SeqCst);
        SavedContext {
            privileged: outgoing,
        }
    }

    /// Number of unprivileged-to-privileged transitions performed.
    pub fn raise_count(&self) -> usize {
        self.raises.load(Ordering::SeqCst)
    }

    /// Number of privileged-to-unprivileged transitions performed.
    pub fn reset_count(&self) -> usize {
        self.resets.load(Ordering::SeqCst)
    }
}

impl PrivilegePort for SimulatedPort {
    fn is_privileged(&self) -> bool {
        self.privileged.load(Ordering::SeqCst)
    }

    fn raise(&self) {
        self.raises.fetch_add(1, Ordering::SeqCst);
        self.privileged.store(true, Ordering::SeqCst);
    }

    fn reset(&self) {
        self.resets.fetch_add(1, Ordering::SeqCst);
        self.privileged.store(false, Ordering::SeqCst);
    }
}
