//! Privilege Control
//!
//! Raises the executing context to full privilege around a kernel call and
//! puts it back afterwards.
//!
//! # Privilege Levels
//! - Privileged: kernel code and privileged tasks; MPU checks bypassed
//! - Unprivileged: restricted tasks; every access checked against the
//!   task's region table
//!
//! # Security Considerations
//! - The level observed before `raise()` is captured in a `PriorToken`
//! - `restore()` consumes the token, so each raise is undone exactly once
//! - Raising while already privileged is a no-op, and so is the matching
//!   restore; a privileged caller is never dropped to unprivileged
//!
//! The hardware side is the `PrivilegePort` trait, implemented by the port
//! layer for a concrete processor and by `sim::SimulatedPort` on the host.

pub mod sim;

pub use sim::{SavedContext, SimulatedPort};

/// Hardware privilege primitive provided by the port layer.
///
/// All three operations are single register accesses and cannot fail.
pub trait PrivilegePort {
    /// Read the current privilege level of the executing context.
    fn is_privileged(&self) -> bool;

    /// Elevate the executing context to privileged.
    fn raise(&self);

    /// Drop the executing context to unprivileged.
    fn reset(&self);
}

impl<P: PrivilegePort + ?Sized> PrivilegePort for &P {
    #[inline]
    fn is_privileged(&self) -> bool {
        (**self).is_privileged()
    }

    #[inline]
    fn raise(&self) {
        (**self).raise()
    }

    #[inline]
    fn reset(&self) {
        (**self).reset()
    }
}

/// The privilege level observed when `raise()` was called.
///
/// Neither `Clone` nor `Copy`; hand it back to `restore()` exactly once.
#[must_use = "privilege must be restored with PrivilegeController::restore"]
#[derive(Debug, PartialEq, Eq)]
pub struct PriorToken {
    was_privileged: bool,
}

impl PriorToken {
    /// Check if the caller was already privileged before the raise.
    #[inline]
    pub const fn was_privileged(&self) -> bool {
        self.was_privileged
    }
}

/// Raise/restore protocol on top of a `PrivilegePort`.
#[derive(Debug)]
pub struct PrivilegeController<P> {
    port: P,
}

impl<P: PrivilegePort> PrivilegeController<P> {
    /// Wrap a port.
    pub const fn new(port: P) -> Self {
        Self { port }
    }

    /// Access the underlying port.
    #[inline]
    pub fn port(&self) -> &P {
        &self.port
    }

    /// Check if the executing context is privileged.
    #[inline]
    pub fn currently_privileged(&self) -> bool {
        self.port.is_privileged()
    }

    /// Elevate to privileged, remembering the prior level.
    #[inline]
    pub fn raise(&self) -> PriorToken {
        let was_privileged = self.port.is_privileged();
        if !was_privileged {
            self.port.raise();
        }
        PriorToken { was_privileged }
    }

    /// Return to the level recorded in `token`.
    #[inline]
    pub fn restore(&self, token: PriorToken) {
        if !token.was_privileged {
            self.port.reset();
        }
    }

    /// Run `f` privileged, restoring the prior level afterwards.
    #[inline]
    pub fn with_raised<R>(&self, f: impl FnOnce() -> R) -> R {
        let token = self.raise();
        let result = f();
        self.restore(token);
        result
    }
}
