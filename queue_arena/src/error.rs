#[cfg(feature = "std")]
use thiserror::Error;

/// Why an operation was rejected as caller misuse.
#[cfg_attr(feature = "std", derive(Error))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalOperation {
    #[cfg_attr(feature = "std", error("no header slots available"))]
    NoFreeHeader,

    #[cfg_attr(feature = "std", error("handle does not refer to a live queue"))]
    StaleHandle,

    #[cfg_attr(feature = "std", error("dequeue from an empty queue"))]
    EmptyQueue,
}

/// The two failure kinds of the allocator.
#[cfg_attr(feature = "std", derive(Error))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    #[cfg_attr(feature = "std", error("illegal operation: {0}"))]
    IllegalOperation(IllegalOperation),

    #[cfg_attr(feature = "std", error("out of memory: no free entry slot in the arena"))]
    OutOfMemory,
}

impl From<IllegalOperation> for QueueError {
    fn from(reason: IllegalOperation) -> Self {
        QueueError::IllegalOperation(reason)
    }
}

/// Corruption found by [`QueueArena::check_invariants`](crate::QueueArena::check_invariants).
#[cfg_attr(feature = "std", derive(Error))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    #[cfg_attr(
        feature = "std",
        error("active queue counter is {recorded}, but {actual} headers are valid")
    )]
    ActiveCount { recorded: usize, actual: usize },

    #[cfg_attr(
        feature = "std",
        error("queue {queue} run [{base}, {base}+{length}) exceeds the entry segment")
    )]
    RunOutOfBounds {
        queue: usize,
        base: usize,
        length: usize,
    },

    #[cfg_attr(
        feature = "std",
        error("queue {queue} has length {length} but no base")
    )]
    MissingBase { queue: usize, length: usize },

    #[cfg_attr(
        feature = "std",
        error("queues {first} and {second} both own slot {slot}")
    )]
    Overlap {
        first: usize,
        second: usize,
        slot: usize,
    },

    #[cfg_attr(feature = "std", error("slot {slot} of queue {queue} holds no data"))]
    DeadEntry { queue: usize, slot: usize },

    #[cfg_attr(feature = "std", error("slot {slot} holds data but no queue owns it"))]
    OrphanEntry { slot: usize },

    #[cfg_attr(
        feature = "std",
        error("base slot {slot} of queue {queue} lacks the queue-base marker")
    )]
    MissingBaseMarker { queue: usize, slot: usize },

    #[cfg_attr(
        feature = "std",
        error("slot {slot} carries a queue-base marker but starts no run")
    )]
    StrayBaseMarker { slot: usize },
}

#[cfg(not(feature = "std"))]
impl core::fmt::Display for IllegalOperation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            IllegalOperation::NoFreeHeader => write!(f, "no header slots available"),
            IllegalOperation::StaleHandle => write!(f, "handle does not refer to a live queue"),
            IllegalOperation::EmptyQueue => write!(f, "dequeue from an empty queue"),
        }
    }
}

#[cfg(not(feature = "std"))]
impl core::fmt::Display for QueueError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            QueueError::IllegalOperation(reason) => write!(f, "illegal operation: {}", reason),
            QueueError::OutOfMemory => {
                write!(f, "out of memory: no free entry slot in the arena")
            }
        }
    }
}

#[cfg(not(feature = "std"))]
impl core::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InvariantViolation::ActiveCount { recorded, actual } => write!(
                f,
                "active queue counter is {}, but {} headers are valid",
                recorded, actual
            ),
            InvariantViolation::RunOutOfBounds {
                queue,
                base,
                length,
            } => write!(
                f,
                "queue {} run [{}, {}+{}) exceeds the entry segment",
                queue, base, base, length
            ),
            InvariantViolation::MissingBase { queue, length } => {
                write!(f, "queue {} has length {} but no base", queue, length)
            }
            InvariantViolation::Overlap {
                first,
                second,
                slot,
            } => write!(f, "queues {} and {} both own slot {}", first, second, slot),
            InvariantViolation::DeadEntry { queue, slot } => {
                write!(f, "slot {} of queue {} holds no data", slot, queue)
            }
            InvariantViolation::OrphanEntry { slot } => {
                write!(f, "slot {} holds data but no queue owns it", slot)
            }
            InvariantViolation::MissingBaseMarker { queue, slot } => write!(
                f,
                "base slot {} of queue {} lacks the queue-base marker",
                slot, queue
            ),
            InvariantViolation::StrayBaseMarker { slot } => {
                write!(f, "slot {} carries a queue-base marker but starts no run", slot)
            }
        }
    }
}
