//! Privilege-Checked Call Gateway
//!
//! Lets unprivileged tasks reach kernel primitives that need full
//! privilege, after checking every buffer they hand over.
//!
//! # Call Protocol
//! ```text
//! ENTRY ──privileged──────────────────────────┐
//!   │                                         ▼
//!   └─unprivileged─▶ VALIDATING ──ok──▶ RAISED ──▶ DELEGATED ──▶ RESTORED
//!                        │
//!                        └──any buffer denied──▶ REJECTED
//! ```
//!
//! 1. A privileged caller skips validation
//! 2. Otherwise every buffer argument is checked against the caller's
//!    region table with the access the primitive will make
//! 3. Any denial returns the primitive's "not permitted" value; the
//!    primitive is not called
//! 4. Privilege is raised, the primitive runs, privilege is restored to
//!    the entry level, and the primitive's result is returned unchanged
//!
//! # Security Properties
//! - An unauthorized buffer never reaches a kernel primitive
//! - Validation happens before the raise, so a rejected call never
//!   changes the privilege level
//! - The level after a call always equals the level before it
//! - Nothing here blocks, retries or logs; blocking happens inside the
//!   primitive after delegation
//!
//! Per-service wrappers live in `queue`, `task` and `timer`; each one only
//! describes its buffer arguments and names its primitive.

pub mod queue;
pub mod task;
pub mod timer;

use core::mem::size_of;

use crate::kernel::BaseType;
use crate::mpu::{BufferAuthority, Permission, RegionAuthority};
use crate::privilege::{PrivilegeController, PrivilegePort};
use crate::task::TaskPrivilegeRecord;

/// Result value a gated call returns when access is denied.
///
/// Matches the value the wrapped primitive uses for "did not happen", so
/// callers see one failure value whichever side declined.
pub trait NotPermitted {
    fn not_permitted() -> Self;
}

impl NotPermitted for bool {
    #[inline]
    fn not_permitted() -> Self {
        false
    }
}

impl NotPermitted for () {
    #[inline]
    fn not_permitted() -> Self {}
}

impl NotPermitted for usize {
    #[inline]
    fn not_permitted() -> Self {
        0
    }
}

impl NotPermitted for BaseType {
    #[inline]
    fn not_permitted() -> Self {
        0
    }
}

/// One pointer argument of a gated call and the access the primitive
/// makes through it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BufferArg {
    addr: usize,
    len: usize,
    access: Permission,
}

impl BufferArg {
    /// A raw byte buffer.
    #[inline]
    pub fn bytes(ptr: *const u8, len: usize, access: Permission) -> Self {
        Self {
            addr: ptr as usize,
            len,
            access,
        }
    }

    /// A single `T` the primitive reads.
    #[inline]
    pub fn read<T>(ptr: *const T) -> Self {
        Self::bytes(ptr.cast(), size_of::<T>(), Permission::READ)
    }

    /// A single `T` the primitive writes.
    #[inline]
    pub fn write<T>(ptr: *mut T) -> Self {
        Self::bytes(ptr.cast_const().cast(), size_of::<T>(), Permission::WRITE)
    }

    /// A single `T` the primitive reads and writes.
    #[inline]
    pub fn read_write<T>(ptr: *mut T) -> Self {
        Self::bytes(ptr.cast_const().cast(), size_of::<T>(), Permission::READ_WRITE)
    }

    /// `count` consecutive `T`s.
    ///
    /// If the byte length overflows it saturates to `usize::MAX`, which no
    /// non-null buffer can satisfy.
    #[inline]
    pub fn array<T>(ptr: *const T, count: usize, access: Permission) -> Self {
        let len = count.checked_mul(size_of::<T>()).unwrap_or(usize::MAX);
        Self::bytes(ptr.cast(), len, access)
    }

    /// Buffer address.
    #[inline]
    pub const fn addr(&self) -> usize {
        self.addr
    }

    /// Buffer length in bytes.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Check if the buffer covers no bytes.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Accesses the primitive makes.
    #[inline]
    pub const fn access(&self) -> Permission {
        self.access
    }
}

/// Progress of one gated call.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CallState {
    Entry,
    Validating,
    /// Terminal: a buffer was denied and the primitive was not called.
    Rejected,
    Raised,
    Delegated,
    /// Terminal: the primitive ran and privilege is back at entry level.
    Restored,
}

impl CallState {
    /// Check if no further transition is possible.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Restored)
    }

    const fn can_advance_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Entry, Self::Validating)
                | (Self::Entry, Self::Raised)
                | (Self::Validating, Self::Rejected)
                | (Self::Validating, Self::Raised)
                | (Self::Raised, Self::Delegated)
                | (Self::Delegated, Self::Restored)
        )
    }
}

/// Stack-scoped record of one gated call.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CallContext {
    entry_privileged: bool,
    validated: bool,
    state: CallState,
}

impl CallContext {
    fn enter(entry_privileged: bool) -> Self {
        Self {
            entry_privileged,
            validated: false,
            state: CallState::Entry,
        }
    }

    fn advance(&mut self, next: CallState) {
        debug_assert!(
            self.state.can_advance_to(next),
            "illegal gateway transition {:?} -> {:?}",
            self.state,
            next
        );
        self.state = next;
    }

    /// Privilege level observed at entry.
    #[inline]
    pub const fn entry_privileged(&self) -> bool {
        self.entry_privileged
    }

    /// Check if buffer arguments were validated (unprivileged caller).
    #[inline]
    pub const fn validated(&self) -> bool {
        self.validated
    }

    /// Current state.
    #[inline]
    pub const fn state(&self) -> CallState {
        self.state
    }
}

/// The gateway: kernel primitives, the privilege controller and the
/// buffer authority, bound together.
#[derive(Debug)]
pub struct Gateway<K, P, A = RegionAuthority> {
    kernel: K,
    privilege: PrivilegeController<P>,
    authority: A,
}

impl<K, P: PrivilegePort> Gateway<K, P, RegionAuthority> {
    /// Create a gateway using the portable region-table walk.
    pub const fn new(kernel: K, port: P) -> Self {
        Self::with_authority(kernel, port, RegionAuthority)
    }
}

impl<K, P: PrivilegePort, A: BufferAuthority> Gateway<K, P, A> {
    /// Create a gateway with a port-specific buffer authority.
    pub const fn with_authority(kernel: K, port: P, authority: A) -> Self {
        Self {
            kernel,
            privilege: PrivilegeController::new(port),
            authority,
        }
    }

    /// The wrapped kernel primitives.
    #[inline]
    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// The privilege controller.
    #[inline]
    pub fn privilege(&self) -> &PrivilegeController<P> {
        &self.privilege
    }

    /// The buffer authority.
    #[inline]
    pub fn authority(&self) -> &A {
        &self.authority
    }

    /// Run one gated call.
    ///
    /// # Arguments
    /// * `caller` - Privilege record of the calling task
    /// * `describe` - Lists the call's buffer arguments; only evaluated for
    ///   unprivileged callers
    /// * `primitive` - Calls the wrapped primitive
    ///
    /// # Returns
    /// The primitive's result, or `R::not_permitted()` if a buffer was
    /// denied.
    #[inline]
    pub fn invoke<R, D, Args, F>(
        &self,
        caller: &TaskPrivilegeRecord,
        describe: D,
        primitive: F,
    ) -> R
    where
        R: NotPermitted,
        D: FnOnce(&K) -> Args,
        Args: AsRef<[BufferArg]>,
        F: FnOnce(&K) -> R,
    {
        self.invoke_traced(caller, describe, primitive).0
    }

    /// Same as [`Gateway::invoke`], also returning the terminal call context.
    pub fn invoke_traced<R, D, Args, F>(
        &self,
        caller: &TaskPrivilegeRecord,
        describe: D,
        primitive: F,
    ) -> (R, CallContext)
    where
        R: NotPermitted,
        D: FnOnce(&K) -> Args,
        Args: AsRef<[BufferArg]>,
        F: FnOnce(&K) -> R,
    {
        let mut ctx = CallContext::enter(self.privilege.currently_privileged());

        if !ctx.entry_privileged {
            ctx.advance(CallState::Validating);
            let args = describe(&self.kernel);
            if !self.authorize(caller, args.as_ref()) {
                ctx.advance(CallState::Rejected);
                return (R::not_permitted(), ctx);
            }
            ctx.validated = true;
        }

        let token = self.privilege.raise();
        ctx.advance(CallState::Raised);
        let result = primitive(&self.kernel);
        ctx.advance(CallState::Delegated);
        self.privilege.restore(token);
        ctx.advance(CallState::Restored);

        (result, ctx)
    }

    fn authorize(&self, caller: &TaskPrivilegeRecord, args: &[BufferArg]) -> bool {
        args.iter().all(|arg| {
            self.authority
                .is_authorized(caller.regions(), arg.addr, arg.len, arg.access)
        })
    }
}
