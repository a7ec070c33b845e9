/// Opaque reference to one queue of a [`QueueArena`](crate::QueueArena).
///
/// A handle names a header slot plus the generation that slot had when the
/// queue was created. Destroying the queue bumps the generation, so the old
/// handle is rejected even after the slot is reused by a new queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct QueueHandle {
    id: u8,
    generation: u32,
}

impl QueueHandle {
    pub(crate) const fn new(id: u8, generation: u32) -> Self {
        Self { id, generation }
    }

    /// Header slot index.
    pub const fn id(&self) -> usize {
        self.id as usize
    }

    pub const fn generation(&self) -> u32 {
        self.generation
    }
}
