//! Arena geometry.
//!
//! ```text
//! byte 0        active queue count
//! bytes 1..     QUEUES x 24-bit headers   [valid:1][base:11][length:11][-:1]
//! rest          MAX_ENTRIES x 10-bit slots [queue_base:1][valid:1][value:8]
//! ```
//!
//! All fields are packed MSB-first. The module constants describe the
//! reference 2 KiB layout; [`QueueArena`](crate::QueueArena) exposes the same
//! quantities as associated consts for any instantiation.

use packed_bits::BitField;

/// Reference arena size in bytes.
pub const ARENA_BYTES: usize = 2048;
/// Reference header table size.
pub const MAX_QUEUES: usize = 64;

pub const COUNTER_BYTES: usize = 1;
pub const HEADER_BYTES: usize = 3;
pub const HEADER_BITS: usize = HEADER_BYTES * 8;
pub const ENTRY_BIT_WIDTH: usize = 10;

pub const HEADER_VALID: BitField = BitField::new(0, 1);
pub const HEADER_BASE: BitField = BitField::new(1, 11);
pub const HEADER_LENGTH: BitField = BitField::new(12, 11);

pub const ENTRY_QUEUE_BASE: BitField = BitField::new(0, 1);
pub const ENTRY_VALID: BitField = BitField::new(1, 1);
pub const ENTRY_VALUE: BitField = BitField::new(2, 8);

/// The base field must also hold the one-past-the-end sentinel.
pub const MAX_ENCODABLE_ENTRIES: usize = HEADER_BASE.max_value() as usize;

pub const fn monitor_segment_bytes(queues: usize) -> usize {
    COUNTER_BYTES + HEADER_BYTES * queues
}

pub const fn entry_segment_bytes(arena_bytes: usize, queues: usize) -> usize {
    arena_bytes.saturating_sub(monitor_segment_bytes(queues))
}

pub const fn max_entries(arena_bytes: usize, queues: usize) -> usize {
    entry_segment_bytes(arena_bytes, queues) * 8 / ENTRY_BIT_WIDTH
}

pub const MONITOR_SEGMENT_BYTES: usize = monitor_segment_bytes(MAX_QUEUES);
pub const MAX_ENTRIES: usize = max_entries(ARENA_BYTES, MAX_QUEUES);
