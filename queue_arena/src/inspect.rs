//! Read-only views of an arena: queue contents, occupancy and consistency.

use core::fmt;

use crate::QueueArena;
use crate::entry::{Entry, EntryView};
use crate::error::{InvariantViolation, QueueError};
use crate::handle::QueueHandle;
use crate::header::QueueHeader;

impl<const BYTES: usize, const QUEUES: usize> QueueArena<BYTES, QUEUES> {
    /// Number of bytes currently queued.
    pub fn len(&self, handle: QueueHandle) -> Result<usize, QueueError> {
        Ok(self.resolve(handle)?.1.length)
    }

    pub fn is_empty(&self, handle: QueueHandle) -> Result<bool, QueueError> {
        Ok(self.len(handle)? == 0)
    }

    /// The queued bytes, front first, without removing them.
    pub fn iter(&self, handle: QueueHandle) -> Result<QueueIter<'_>, QueueError> {
        let (_, header) = self.resolve(handle)?;
        let (next, end) = match header.run() {
            Some((base, length)) => (base, base + length),
            None => (0, 0),
        };
        Ok(QueueIter {
            entries: self.entries(),
            next,
            end,
        })
    }

    /// Value of the monitor segment's counter.
    pub fn active_queues(&self) -> usize {
        self.headers().active_count()
    }

    pub fn free_slots(&self) -> usize {
        self.entries().free_slots()
    }

    /// Total entry slots, i.e. the most bytes the arena can hold at once.
    pub const fn capacity(&self) -> usize {
        Self::MAX_ENTRIES
    }

    /// Decoded header `id`, or `None` past the end of the table.
    pub fn header(&self, id: usize) -> Option<QueueHeader> {
        (id < QUEUES).then(|| self.headers().get(id))
    }

    /// Decoded slot `slot`, or `None` past the end of the entry segment.
    pub fn entry(&self, slot: usize) -> Option<Entry> {
        self.entries().get(slot)
    }

    /// Verifies the structural invariants of the whole arena.
    ///
    /// Checks the active counter, that every run lies inside the entry
    /// segment, that runs are pairwise disjoint and hold only live slots,
    /// that no live slot is unowned, and that queue-base markers sit exactly
    /// on the bases of non-empty queues.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let headers = self.headers();
        let entries = self.entries();

        let actual = headers.iter().filter(|(_, h)| h.valid).count();
        let recorded = headers.active_count();
        if actual != recorded {
            return Err(InvariantViolation::ActiveCount { recorded, actual });
        }

        for (queue, header) in headers.iter() {
            match header.base {
                None if header.valid && header.length > 0 => {
                    return Err(InvariantViolation::MissingBase {
                        queue,
                        length: header.length,
                    });
                }
                Some(base) if base + header.length > Self::MAX_ENTRIES => {
                    return Err(InvariantViolation::RunOutOfBounds {
                        queue,
                        base,
                        length: header.length,
                    });
                }
                _ => {}
            }
        }

        for (slot, entry) in entries.iter().enumerate() {
            let mut owners = headers.iter().filter(|(_, h)| h.owns(slot));
            let owner = owners.next();
            if let (Some((first, _)), Some((second, _))) = (owner, owners.next()) {
                return Err(InvariantViolation::Overlap {
                    first,
                    second,
                    slot,
                });
            }

            match owner {
                Some((queue, _)) if !entry.valid => {
                    return Err(InvariantViolation::DeadEntry { queue, slot });
                }
                None if entry.valid => {
                    return Err(InvariantViolation::OrphanEntry { slot });
                }
                _ => {}
            }

            let run_start = owner.filter(|(_, h)| h.owns_base(slot));
            match (run_start, entry.is_queue_base) {
                (Some((queue, _)), false) => {
                    return Err(InvariantViolation::MissingBaseMarker { queue, slot });
                }
                (None, true) => return Err(InvariantViolation::StrayBaseMarker { slot }),
                _ => {}
            }
        }

        Ok(())
    }
}

/// Iterator over one queue's bytes, front to back.
#[derive(Debug, Clone)]
pub struct QueueIter<'a> {
    entries: EntryView<'a>,
    next: usize,
    end: usize,
}

impl Iterator for QueueIter<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.next >= self.end {
            return None;
        }
        let value = self.entries.read_entry(self.next).value;
        self.next += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for QueueIter<'_> {}

impl<const BYTES: usize, const QUEUES: usize> fmt::Debug for QueueArena<BYTES, QUEUES> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Runs<'a, const B: usize, const Q: usize>(&'a QueueArena<B, Q>);

        impl<const B: usize, const Q: usize> fmt::Debug for Runs<'_, B, Q> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_map()
                    .entries(
                        self.0
                            .headers()
                            .iter()
                            .filter(|(_, h)| h.valid)
                            .map(|(id, h)| (id, (h.base, h.length))),
                    )
                    .finish()
            }
        }

        f.debug_struct("QueueArena")
            .field("bytes", &BYTES)
            .field("capacity", &Self::MAX_ENTRIES)
            .field("free_slots", &self.free_slots())
            .field("active_queues", &self.active_queues())
            .field("runs", &Runs(self))
            .finish()
    }
}
