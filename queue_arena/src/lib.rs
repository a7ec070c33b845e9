//! # queue_arena
//!
//! Many independent FIFO byte queues packed into one fixed-size, `no_std`
//! friendly arena.
//!
//! The reference layout fits 64 queue headers and 1484 queued bytes into
//! 2 KiB: each header takes 24 bits and each byte slot only 10 (8 data bits
//! plus two flags). A queue's bytes always occupy one contiguous run of slots;
//! when a run needs to grow into space held by other queues, the arena shifts
//! the neighbouring runs in place and repairs their headers.
//!
//! ```rust
//! use queue_arena::QueueArena;
//!
//! let mut arena: QueueArena = QueueArena::new();
//! let a = arena.try_create_queue()?;
//! arena.try_enqueue_byte(a, 0)?;
//! arena.try_enqueue_byte(a, 1)?;
//! let b = arena.try_create_queue()?;
//! arena.try_enqueue_byte(b, 3)?;
//! // a's run grows by shifting b's run one slot to the right
//! arena.try_enqueue_byte(a, 2)?;
//! arena.try_enqueue_byte(b, 4)?;
//!
//! assert_eq!(arena.try_dequeue_byte(a)?, 0);
//! assert_eq!(arena.try_dequeue_byte(a)?, 1);
//! assert_eq!(arena.iter(b)?.collect::<Vec<_>>(), [3, 4]);
//! arena.check_invariants().expect("consistent arena");
//! # Ok::<(), queue_arena::QueueError>(())
//! ```
//!
//! ## Features
//! - `std` (default): `std::error::Error` impls via `thiserror`
//!
//! Without `std` the crate is `#![no_std]` and never allocates. Logging goes
//! through `tracing`; no subscriber is installed by the library.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod arena;
pub mod entry;
pub mod error;
pub mod handle;
pub mod header;
pub mod hooks;
pub mod inspect;
pub mod layout;

pub use arena::QueueArena;
pub use entry::Entry;
pub use error::{IllegalOperation, InvariantViolation, QueueError};
pub use handle::QueueHandle;
pub use header::QueueHeader;
pub use hooks::{FatalHooks, PanicHooks, Queues};
pub use inspect::QueueIter;
pub use layout::{ARENA_BYTES, ENTRY_BIT_WIDTH, MAX_ENTRIES, MAX_QUEUES, MONITOR_SEGMENT_BYTES};
