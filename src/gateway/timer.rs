//! Timer Gated Calls

use crate::kernel::{BaseType, TickType, TimerCommand, TimerHandle, TimerPrimitives};
use crate::mpu::BufferAuthority;
use crate::privilege::PrivilegePort;
use crate::task::TaskPrivilegeRecord;

use super::{BufferArg, Gateway};

impl<K: TimerPrimitives, P: PrivilegePort, A: BufferAuthority> Gateway<K, P, A> {
    /// Post `command` to the timer service for `timer`.
    ///
    /// `higher_priority_woken` is only written by the from-ISR commands
    /// and may be null.
    ///
    /// # Safety
    /// A privileged caller's `higher_priority_woken` must be null or valid
    /// for writes.
    pub unsafe fn timer_generic_command(
        &self,
        caller: &TaskPrivilegeRecord,
        timer: TimerHandle,
        command: TimerCommand,
        value: TickType,
        higher_priority_woken: *mut BaseType,
        ticks_to_wait: TickType,
    ) -> bool {
        self.invoke(
            caller,
            |_| [BufferArg::write(higher_priority_woken)],
            // SAFETY: `higher_priority_woken` null or validated, or caller privileged
            |k| unsafe {
                k.generic_command(timer, command, value, higher_priority_woken, ticks_to_wait)
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mpu::Permission;
    use crate::privilege::SimulatedPort;
    use crate::testutil::{region_of, restricted_task, trusted_task, Call, SpyKernel};
    use core::ptr;

    const TIMER: TimerHandle = TimerHandle::from_raw(0x77);
    const STOP: TimerCommand = TimerCommand::StopFromIsr;

    #[test]
    fn test_command_without_woken_flag() {
        let caller = restricted_task(&[]);
        let port = SimulatedPort::new(false);
        let gate = Gateway::new(SpyKernel::new(true), &port);

        let ok = unsafe {
            gate.timer_generic_command(&caller, TIMER, TimerCommand::Start, 10, ptr::null_mut(), 5)
        };

        assert!(ok);
        assert_eq!(
            gate.kernel().calls(),
            vec![Call::TimerCommand {
                timer: TIMER,
                command: TimerCommand::Start,
                value: 10,
                higher_priority_woken: 0,
                ticks: 5
            }]
        );
        assert!(!port.is_privileged());
    }

    #[test]
    fn test_woken_flag_needs_write() {
        let mut woken: BaseType = 0;
        let port = SimulatedPort::new(false);

        let writable = restricted_task(&[region_of(&woken, Permission::WRITE)]);
        let gate = Gateway::new(SpyKernel::new(true), &port);
        assert!(unsafe {
            gate.timer_generic_command(&writable, TIMER, STOP, 0, &mut woken, 0)
        });

        let readable = restricted_task(&[region_of(&woken, Permission::READ)]);
        let gate = Gateway::new(SpyKernel::new(true), &port);
        assert!(!unsafe {
            gate.timer_generic_command(&readable, TIMER, STOP, 0, &mut woken, 0)
        });
        assert_eq!(gate.kernel().call_count(), 0);
        assert_eq!(port.raise_count(), 1);
    }

    #[test]
    fn test_privileged_caller_unchecked() {
        let port = SimulatedPort::new(true);
        let gate = Gateway::new(SpyKernel::new(false), &port);

        let ok = unsafe {
            gate.timer_generic_command(
                &trusted_task(),
                TIMER,
                TimerCommand::ChangePeriod,
                100,
                0x20 as *mut BaseType,
                0,
            )
        };

        assert!(!ok);
        assert_eq!(gate.kernel().call_count(), 1);
        assert!(port.is_privileged());
    }
}
