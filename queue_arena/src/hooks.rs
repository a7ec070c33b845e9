//! Fatal-condition hooks and the infallible queue API built on them.
//!
//! [`QueueArena`] reports failures as [`QueueError`]. Firmware that treats
//! both failure kinds as terminal can instead use [`Queues`], whose methods
//! never return an error: they divert into a [`FatalHooks`] implementation,
//! which must not return (abort, reset, or unwind).
//!
//! ```should_panic
//! use queue_arena::{PanicHooks, Queues};
//!
//! let mut queues: Queues<PanicHooks> = Queues::new(PanicHooks);
//! let q = queues.create_queue();
//! queues.dequeue_byte(q); // empty: diverges into on_illegal_operation
//! ```

use crate::error::QueueError;
use crate::handle::QueueHandle;
use crate::layout::{ARENA_BYTES, MAX_QUEUES};
use crate::QueueArena;

/// Callbacks invoked on unrecoverable conditions. Neither may return.
pub trait FatalHooks {
    /// No entry slot could be found for an enqueue.
    fn on_out_of_memory(&self) -> !;

    /// The caller misused the API: stale handle, empty dequeue, or no free
    /// header slot on create.
    fn on_illegal_operation(&self) -> !;
}

/// Hooks that unwind with a panic.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanicHooks;

impl FatalHooks for PanicHooks {
    fn on_out_of_memory(&self) -> ! {
        panic!("queue arena: out of memory")
    }

    fn on_illegal_operation(&self) -> ! {
        panic!("queue arena: illegal operation")
    }
}

/// A [`QueueArena`] whose failures go to `H` instead of being returned.
#[derive(Debug, Clone)]
pub struct Queues<H, const BYTES: usize = ARENA_BYTES, const QUEUES: usize = MAX_QUEUES> {
    arena: QueueArena<BYTES, QUEUES>,
    hooks: H,
}

impl<H: FatalHooks, const BYTES: usize, const QUEUES: usize> Queues<H, BYTES, QUEUES> {
    pub const fn new(hooks: H) -> Self {
        Self {
            arena: QueueArena::new(),
            hooks,
        }
    }

    pub fn arena(&self) -> &QueueArena<BYTES, QUEUES> {
        &self.arena
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn into_inner(self) -> (QueueArena<BYTES, QUEUES>, H) {
        (self.arena, self.hooks)
    }

    fn fail(&self, err: QueueError) -> ! {
        match err {
            QueueError::OutOfMemory => self.hooks.on_out_of_memory(),
            QueueError::IllegalOperation(_) => self.hooks.on_illegal_operation(),
        }
    }

    pub fn create_queue(&mut self) -> QueueHandle {
        match self.arena.try_create_queue() {
            Ok(handle) => handle,
            Err(err) => self.fail(err),
        }
    }

    pub fn destroy_queue(&mut self, handle: QueueHandle) {
        if let Err(err) = self.arena.try_destroy_queue(handle) {
            self.fail(err)
        }
    }

    pub fn enqueue_byte(&mut self, handle: QueueHandle, value: u8) {
        if let Err(err) = self.arena.try_enqueue_byte(handle, value) {
            self.fail(err)
        }
    }

    pub fn dequeue_byte(&mut self, handle: QueueHandle) -> u8 {
        match self.arena.try_dequeue_byte(handle) {
            Ok(value) => value,
            Err(err) => self.fail(err),
        }
    }
}

impl<H: FatalHooks + Default, const BYTES: usize, const QUEUES: usize> Default
    for Queues<H, BYTES, QUEUES>
{
    fn default() -> Self {
        Self::new(H::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TinyQueues = Queues<PanicHooks, 23, 4>;

    #[test]
    fn passes_values_through() {
        let mut queues = TinyQueues::default();
        let q = queues.create_queue();
        queues.enqueue_byte(q, 9);
        queues.enqueue_byte(q, 8);
        assert_eq!(queues.dequeue_byte(q), 9);
        assert_eq!(queues.dequeue_byte(q), 8);
        queues.destroy_queue(q);
        assert_eq!(queues.arena().active_queues(), 0);
    }

    #[test]
    #[should_panic(expected = "out of memory")]
    fn out_of_memory_diverges() {
        let mut queues = TinyQueues::default();
        let q = queues.create_queue();
        for v in 0..9 {
            queues.enqueue_byte(q, v);
        }
    }

    #[test]
    #[should_panic(expected = "illegal operation")]
    fn empty_dequeue_diverges() {
        let mut queues = TinyQueues::default();
        let q = queues.create_queue();
        queues.dequeue_byte(q);
    }

    #[test]
    #[should_panic(expected = "illegal operation")]
    fn header_exhaustion_diverges() {
        let mut queues = TinyQueues::default();
        for _ in 0..5 {
            queues.create_queue();
        }
    }
}
