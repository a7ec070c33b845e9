//! Queue header table in the monitor segment.

use packed_bits::{BitIndex, bit_ops};

use crate::layout::{
    COUNTER_BYTES, HEADER_BASE, HEADER_BITS, HEADER_BYTES, HEADER_LENGTH, HEADER_VALID,
};

/// Decoded header record.
///
/// `base` is `None` when the queue owns no slot yet; a vacant header always
/// decodes as [`QueueHeader::VACANT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueHeader {
    pub valid: bool,
    pub base: Option<usize>,
    pub length: usize,
}

impl QueueHeader {
    pub const VACANT: Self = Self {
        valid: false,
        base: None,
        length: 0,
    };

    /// `(base, length)` of the run this queue currently owns, if any.
    #[inline]
    pub fn run(&self) -> Option<(usize, usize)> {
        match self.base {
            Some(base) if self.valid && self.length > 0 => Some((base, self.length)),
            _ => None,
        }
    }

    /// Whether this queue's run starts at `slot`.
    #[inline]
    pub fn owns_base(&self, slot: usize) -> bool {
        self.run().is_some_and(|(base, _)| base == slot)
    }

    /// Whether `slot` lies inside this queue's run.
    #[inline]
    pub fn owns(&self, slot: usize) -> bool {
        self.run()
            .is_some_and(|(base, length)| (base..base + length).contains(&slot))
    }
}

#[inline]
fn record(id: usize) -> BitIndex {
    BitIndex::of_byte(COUNTER_BYTES + HEADER_BYTES * id)
}

fn decode(bytes: &[u8], id: usize, invalid_entry: usize) -> QueueHeader {
    let raw = bit_ops::get_bits(bytes, record(id).get(), HEADER_BITS);
    if HEADER_VALID.extract(raw, HEADER_BITS) == 0 {
        return QueueHeader::VACANT;
    }
    let base = HEADER_BASE.extract(raw, HEADER_BITS) as usize;
    QueueHeader {
        valid: true,
        base: (base < invalid_entry).then_some(base),
        length: HEADER_LENGTH.extract(raw, HEADER_BITS) as usize,
    }
}

/// Read-only view of the monitor segment.
#[derive(Debug, Clone, Copy)]
pub struct HeaderView<'a> {
    bytes: &'a [u8],
    invalid_entry: usize,
}

impl<'a> HeaderView<'a> {
    /// `invalid_entry` is the arena's slot count, stored in `base` for "none".
    pub fn new(bytes: &'a [u8], invalid_entry: usize) -> Self {
        Self {
            bytes,
            invalid_entry,
        }
    }

    pub fn capacity(&self) -> usize {
        (self.bytes.len() - COUNTER_BYTES) / HEADER_BYTES
    }

    pub fn active_count(&self) -> usize {
        self.bytes[0] as usize
    }

    pub fn get(&self, id: usize) -> QueueHeader {
        decode(self.bytes, id, self.invalid_entry)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, QueueHeader)> + 'a {
        let view = *self;
        (0..view.capacity()).map(move |id| (id, view.get(id)))
    }

    /// First header slot not in use.
    pub fn find_free_header(&self) -> Option<usize> {
        (0..self.capacity()).find(|&id| !self.get(id).valid)
    }

    /// The non-empty queue whose run starts at `slot`.
    pub fn owner_of_base(&self, slot: usize) -> Option<usize> {
        (0..self.capacity()).find(|&id| self.get(id).owns_base(slot))
    }
}

/// Mutable view of the monitor segment.
#[derive(Debug)]
pub struct HeaderTable<'a> {
    bytes: &'a mut [u8],
    invalid_entry: usize,
}

impl<'a> HeaderTable<'a> {
    pub fn new(bytes: &'a mut [u8], invalid_entry: usize) -> Self {
        Self {
            bytes,
            invalid_entry,
        }
    }

    pub fn view(&self) -> HeaderView<'_> {
        HeaderView::new(self.bytes, self.invalid_entry)
    }

    pub fn get(&self, id: usize) -> QueueHeader {
        self.view().get(id)
    }

    pub fn set_active_count(&mut self, count: usize) {
        debug_assert!(count <= u8::MAX as usize);
        self.bytes[0] = count as u8;
    }

    pub fn set_valid(&mut self, id: usize, valid: bool) {
        HEADER_VALID.write(self.bytes, record(id), valid as u32);
    }

    pub fn set_base(&mut self, id: usize, base: Option<usize>) {
        let raw = base.unwrap_or(self.invalid_entry);
        debug_assert!(raw <= self.invalid_entry);
        HEADER_BASE.write(self.bytes, record(id), raw as u32);
    }

    pub fn set_length(&mut self, id: usize, length: usize) {
        debug_assert!(length <= self.invalid_entry);
        HEADER_LENGTH.write(self.bytes, record(id), length as u32);
    }

    pub fn set(&mut self, id: usize, header: QueueHeader) {
        self.set_valid(id, header.valid);
        self.set_base(id, header.base);
        self.set_length(id, header.length);
    }

    /// Moves the base of whichever non-empty queue starts at `from` to `to`.
    /// Returns the queue id, or `None` if no queue starts at `from`.
    pub fn rebase(&mut self, from: usize, to: usize) -> Option<usize> {
        let id = self.view().owner_of_base(from)?;
        self.set_base(id, Some(to));
        Some(id)
    }
}
