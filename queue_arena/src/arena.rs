//! The arena and its allocation / defragmentation engine.
//!
//! Every queue owns one contiguous run of slots `[base, base + length)`.
//! Appending a byte takes the nearest free slot at or right of the run's tail;
//! if that slot is not adjacent, the slots in between (other queues' data) are
//! shifted right by one to open the tail. Only when nothing is free to the
//! right is the nearest free slot left of the run used, shifting everything
//! between it and the tail (the run itself included) left by one.
//!
//! Shifted runs are repaired by scanning for the queue-base marker: whenever a
//! marked slot moves, the header whose base named the old slot is updated.
//!
//! All checks happen before the first write, so a failed call leaves the
//! arena exactly as it was.

use tracing::{debug, trace, warn};

use crate::entry::{Direction, Entry, EntryStore, EntryView};
use crate::error::{IllegalOperation, QueueError};
use crate::handle::QueueHandle;
use crate::header::{HeaderTable, HeaderView, QueueHeader};
use crate::layout::{self, ARENA_BYTES, MAX_QUEUES};

type Result<T> = core::result::Result<T, QueueError>;

/// A fixed-size arena packing up to `QUEUES` byte queues into `BYTES` bytes.
///
/// ```
/// use queue_arena::QueueArena;
///
/// let mut arena: QueueArena = QueueArena::new();
/// let q = arena.try_create_queue()?;
/// arena.try_enqueue_byte(q, 7)?;
/// arena.try_enqueue_byte(q, 8)?;
/// assert_eq!(arena.try_dequeue_byte(q)?, 7);
/// assert_eq!(arena.len(q)?, 1);
/// # Ok::<(), queue_arena::QueueError>(())
/// ```
#[derive(Clone)]
pub struct QueueArena<const BYTES: usize = ARENA_BYTES, const QUEUES: usize = MAX_QUEUES> {
    data: [u8; BYTES],
    // kept outside the packed arena: one counter per header slot
    generations: [u32; QUEUES],
}

impl<const BYTES: usize, const QUEUES: usize> Default for QueueArena<BYTES, QUEUES> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const BYTES: usize, const QUEUES: usize> QueueArena<BYTES, QUEUES> {
    pub const ARENA_BYTES: usize = BYTES;
    pub const MAX_QUEUES: usize = QUEUES;
    pub const MONITOR_SEGMENT_BYTES: usize = layout::monitor_segment_bytes(QUEUES);
    pub const MAX_ENTRIES: usize = layout::max_entries(BYTES, QUEUES);

    const LAYOUT_OK: () = {
        assert!(
            QUEUES >= 1 && QUEUES <= u8::MAX as usize,
            "queue count must fit the one-byte counter"
        );
        assert!(
            BYTES > Self::MONITOR_SEGMENT_BYTES,
            "arena too small for its header table"
        );
        assert!(Self::MAX_ENTRIES >= 1, "arena has no room for entries");
        assert!(
            Self::MAX_ENTRIES <= layout::MAX_ENCODABLE_ENTRIES,
            "too many entries for the 11-bit base field"
        );
    };

    /// Creates an empty arena. Invalid layouts fail to compile.
    pub const fn new() -> Self {
        let () = Self::LAYOUT_OK;
        Self {
            data: [0; BYTES],
            generations: [0; QUEUES],
        }
    }

    /// The raw arena bytes.
    pub fn as_bytes(&self) -> &[u8; BYTES] {
        &self.data
    }

    pub(crate) fn headers(&self) -> HeaderView<'_> {
        HeaderView::new(&self.data[..Self::MONITOR_SEGMENT_BYTES], Self::MAX_ENTRIES)
    }

    pub(crate) fn entries(&self) -> EntryView<'_> {
        EntryView::new(&self.data[Self::MONITOR_SEGMENT_BYTES..])
    }

    fn parts(&mut self) -> (HeaderTable<'_>, EntryStore<'_>) {
        let (monitor, entries) = self.data.split_at_mut(Self::MONITOR_SEGMENT_BYTES);
        (
            HeaderTable::new(monitor, Self::MAX_ENTRIES),
            EntryStore::new(entries),
        )
    }

    /// Looks up the live queue `handle` refers to.
    pub(crate) fn resolve(&self, handle: QueueHandle) -> Result<(usize, QueueHeader)> {
        let id = handle.id();
        let header = if id < QUEUES && self.generations[id] == handle.generation() {
            self.headers().get(id)
        } else {
            QueueHeader::VACANT
        };
        if !header.valid {
            warn!(queue = id, generation = handle.generation(), "stale queue handle");
            return Err(IllegalOperation::StaleHandle.into());
        }
        Ok((id, header))
    }

    /// Claims a header slot for a new, empty queue.
    ///
    /// The first free entry slot is recorded as the queue's prospective base
    /// but not marked; if none is free the base stays unresolved and space is
    /// looked for on the first enqueue instead.
    pub fn try_create_queue(&mut self) -> Result<QueueHandle> {
        let (mut headers, entries) = self.parts();
        let Some(id) = headers.view().find_free_header() else {
            warn!(active = headers.view().active_count(), "no header slots available");
            return Err(IllegalOperation::NoFreeHeader.into());
        };

        let base = entries.find_free_slot_from(0, Direction::Up);
        headers.set(
            id,
            QueueHeader {
                valid: true,
                base,
                length: 0,
            },
        );
        let active = headers.view().active_count() + 1;
        headers.set_active_count(active);
        debug!(queue = id, ?base, active, "created queue");

        Ok(QueueHandle::new(id as u8, self.generations[id]))
    }

    /// Releases every slot of the queue and its header slot.
    pub fn try_destroy_queue(&mut self, handle: QueueHandle) -> Result<()> {
        let (id, header) = self.resolve(handle)?;
        let (mut headers, mut entries) = self.parts();

        if let Some((base, length)) = header.run() {
            for slot in base..base + length {
                entries.write_entry(slot, Entry::EMPTY);
            }
        }
        headers.set(id, QueueHeader::VACANT);
        let active = headers.view().active_count() - 1;
        headers.set_active_count(active);
        self.generations[id] = self.generations[id].wrapping_add(1);
        debug!(queue = id, freed = header.length, active, "destroyed queue");
        Ok(())
    }

    /// Appends `value` to the back of the queue, defragmenting if needed.
    pub fn try_enqueue_byte(&mut self, handle: QueueHandle, value: u8) -> Result<()> {
        let (id, header) = self.resolve(handle)?;
        let (mut headers, mut entries) = self.parts();

        let Some((base, length)) = header.run() else {
            // An empty queue owns nothing: its base is only a hint, so it
            // simply takes the free slot nearest to that hint. Without a hint
            // the search starts past the end and falls through to the left.
            let anchor = header.base.unwrap_or(Self::MAX_ENTRIES);
            let slot = entries.find_free_slot_from(anchor, Direction::Up).or_else(|| {
                let left = anchor.checked_sub(1)?;
                entries.find_free_slot_from(left, Direction::Down)
            });
            let Some(slot) = slot else {
                warn!(queue = id, "out of memory");
                return Err(QueueError::OutOfMemory);
            };

            entries.write_entry(slot, Entry::base(value));
            headers.set_base(id, Some(slot));
            headers.set_length(id, 1);
            if header.base != Some(slot) {
                debug!(queue = id, hint = ?header.base, base = slot, "placed empty queue");
            }
            trace!(queue = id, value, slot, "enqueued");
            return Ok(());
        };

        let tail = base + length;
        if let Some(free) = entries.find_free_slot_from(tail, Direction::Up) {
            if free > tail {
                debug!(queue = id, from = tail, to = free, "shifting right");
                entries.shift_right(tail, free, |old, new| {
                    let moved = headers.rebase(old, new);
                    debug_assert!(moved.is_some(), "marker at {} starts no run", old);
                });
            }
            entries.write_entry(tail, Entry::live(value));
            headers.set_length(id, length + 1);
            trace!(queue = id, value, slot = tail, "enqueued");
            return Ok(());
        }

        let left = base
            .checked_sub(1)
            .and_then(|start| entries.find_free_slot_from(start, Direction::Down));
        let Some(free) = left else {
            warn!(queue = id, length, "out of memory");
            return Err(QueueError::OutOfMemory);
        };

        // Shifts [free + 1, tail) left; this queue's own base moves with it.
        debug!(queue = id, from = free, to = tail, "shifting left");
        entries.shift_left(free, tail, |old, new| {
            let moved = headers.rebase(old, new);
            debug_assert!(moved.is_some(), "marker at {} starts no run", old);
        });
        entries.write_entry(tail - 1, Entry::live(value));
        headers.set_length(id, length + 1);
        trace!(queue = id, value, slot = tail - 1, "enqueued");
        Ok(())
    }

    /// Removes and returns the byte at the front of the queue.
    pub fn try_dequeue_byte(&mut self, handle: QueueHandle) -> Result<u8> {
        let (id, header) = self.resolve(handle)?;
        let Some((base, length)) = header.run() else {
            warn!(queue = id, "dequeue from empty queue");
            return Err(IllegalOperation::EmptyQueue.into());
        };
        let (mut headers, mut entries) = self.parts();

        let front = entries.read_entry(base);
        entries.write_entry(base, Entry::EMPTY);
        if length > 1 {
            entries.set_queue_base(base + 1, true);
            headers.set_base(id, Some(base + 1));
        } else {
            headers.set_base(id, None);
        }
        headers.set_length(id, length - 1);
        trace!(queue = id, value = front.value, slot = base, "dequeued");
        Ok(front.value)
    }
}

#[cfg(test)]
impl<const BYTES: usize, const QUEUES: usize> QueueArena<BYTES, QUEUES> {
    pub(crate) fn data_mut(&mut self) -> &mut [u8; BYTES] {
        &mut self.data
    }

    pub(crate) fn corrupt_entry(&mut self, slot: usize, entry: Entry) {
        self.parts().1.write_entry(slot, entry);
    }
}
