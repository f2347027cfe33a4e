//! Queue Gated Calls
//!
//! Item buffers are checked for exactly one queue item. The length comes
//! from the queue itself, never from the caller.

use crate::kernel::{QueueHandle, QueuePosition, QueuePrimitives, TickType};
use crate::mpu::{BufferAuthority, Permission};
use crate::privilege::PrivilegePort;
use crate::task::TaskPrivilegeRecord;

use super::{BufferArg, Gateway};

impl<K: QueuePrimitives, P: PrivilegePort, A: BufferAuthority> Gateway<K, P, A> {
    /// Copy one item from `item` into `queue`.
    ///
    /// # Returns
    /// The primitive's result, or `false` if `item` is not readable by the
    /// caller.
    ///
    /// # Safety
    /// A privileged caller's `item` is passed through unchecked and must be
    /// valid for reads of one queue item.
    pub unsafe fn queue_generic_send(
        &self,
        caller: &TaskPrivilegeRecord,
        queue: QueueHandle,
        item: *const u8,
        ticks_to_wait: TickType,
        position: QueuePosition,
    ) -> bool {
        self.invoke(
            caller,
            |k| [BufferArg::bytes(item, k.item_size(queue), Permission::READ)],
            // SAFETY: `item` validated for one item, or caller privileged
            |k| unsafe { k.generic_send(queue, item, ticks_to_wait, position) },
        )
    }

    /// Move the head item of `queue` into `buffer`.
    ///
    /// # Safety
    /// A privileged caller's `buffer` must be valid for writes of one item.
    pub unsafe fn queue_receive(
        &self,
        caller: &TaskPrivilegeRecord,
        queue: QueueHandle,
        buffer: *mut u8,
        ticks_to_wait: TickType,
    ) -> bool {
        self.invoke(
            caller,
            |k| [BufferArg::bytes(buffer.cast_const(), k.item_size(queue), Permission::WRITE)],
            // SAFETY: `buffer` validated for one item, or caller privileged
            |k| unsafe { k.receive(queue, buffer, ticks_to_wait) },
        )
    }

    /// Copy the head item of `queue` into `buffer`, leaving it queued.
    ///
    /// # Safety
    /// A privileged caller's `buffer` must be valid for writes of one item.
    pub unsafe fn queue_peek(
        &self,
        caller: &TaskPrivilegeRecord,
        queue: QueueHandle,
        buffer: *mut u8,
        ticks_to_wait: TickType,
    ) -> bool {
        self.invoke(
            caller,
            |k| [BufferArg::bytes(buffer.cast_const(), k.item_size(queue), Permission::WRITE)],
            // SAFETY: `buffer` validated for one item, or caller privileged
            |k| unsafe { k.peek(queue, buffer, ticks_to_wait) },
        )
    }
}
