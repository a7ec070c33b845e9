//! Bit-packed slot records in the entry segment.

use packed_bits::{PackedSlice, PackedSliceMut};

use crate::layout::{ENTRY_BIT_WIDTH, ENTRY_QUEUE_BASE, ENTRY_VALID, ENTRY_VALUE};

/// One decoded slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Entry {
    /// Set iff this slot is the current base of some non-empty queue.
    pub is_queue_base: bool,
    /// Set iff the slot holds live data.
    pub valid: bool,
    pub value: u8,
}

impl Entry {
    pub const EMPTY: Self = Self {
        is_queue_base: false,
        valid: false,
        value: 0,
    };

    /// A live byte that does not start a run.
    pub const fn live(value: u8) -> Self {
        Self {
            is_queue_base: false,
            valid: true,
            value,
        }
    }

    /// A live byte that starts a run.
    pub const fn base(value: u8) -> Self {
        Self {
            is_queue_base: true,
            valid: true,
            value,
        }
    }

    pub const fn decode(raw: u32) -> Self {
        Self {
            is_queue_base: ENTRY_QUEUE_BASE.extract(raw, ENTRY_BIT_WIDTH) != 0,
            valid: ENTRY_VALID.extract(raw, ENTRY_BIT_WIDTH) != 0,
            value: ENTRY_VALUE.extract(raw, ENTRY_BIT_WIDTH) as u8,
        }
    }

    pub const fn encode(self) -> u32 {
        let raw = ENTRY_QUEUE_BASE.insert(0, ENTRY_BIT_WIDTH, self.is_queue_base as u32);
        let raw = ENTRY_VALID.insert(raw, ENTRY_BIT_WIDTH, self.valid as u32);
        ENTRY_VALUE.insert(raw, ENTRY_BIT_WIDTH, self.value as u32)
    }
}

/// Scan direction for free-slot searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Increasing slot index, `start` included.
    Up,
    /// Decreasing slot index down to 0, `start` included.
    Down,
}

/// Read-only view of the entry segment.
#[derive(Debug, Clone, Copy)]
pub struct EntryView<'a> {
    slots: PackedSlice<'a, ENTRY_BIT_WIDTH>,
}

impl<'a> EntryView<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            slots: PackedSlice::from_bytes(bytes),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// # Panics
    ///
    /// Panics if `slot` is out of range.
    #[inline]
    pub fn read_entry(&self, slot: usize) -> Entry {
        match self.slots.get(slot) {
            Some(raw) => Entry::decode(raw),
            None => panic!("slot {} out of range for {} entries", slot, self.len()),
        }
    }

    #[inline]
    pub fn get(&self, slot: usize) -> Option<Entry> {
        self.slots.get(slot).map(Entry::decode)
    }

    pub fn iter(&self) -> impl Iterator<Item = Entry> + 'a {
        self.slots.iter().map(Entry::decode)
    }

    /// First slot with `valid == false`, scanning from `start` in `direction`.
    pub fn find_free_slot_from(&self, start: usize, direction: Direction) -> Option<usize> {
        let is_free = |slot: &usize| !self.read_entry(*slot).valid;
        match direction {
            Direction::Up => (start..self.len()).find(is_free),
            Direction::Down => {
                let top = start.min(self.len().checked_sub(1)?);
                (0..=top).rev().find(is_free)
            }
        }
    }

    pub fn free_slots(&self) -> usize {
        self.iter().filter(|e| !e.valid).count()
    }
}

/// Mutable view of the entry segment.
#[derive(Debug)]
pub struct EntryStore<'a> {
    slots: PackedSliceMut<'a, ENTRY_BIT_WIDTH>,
}

impl<'a> EntryStore<'a> {
    pub fn new(bytes: &'a mut [u8]) -> Self {
        Self {
            slots: PackedSliceMut::from_bytes(bytes),
        }
    }

    pub fn view(&self) -> EntryView<'_> {
        EntryView {
            slots: self.slots.as_packed_slice(),
        }
    }

    #[inline]
    pub fn read_entry(&self, slot: usize) -> Entry {
        self.view().read_entry(slot)
    }

    /// # Panics
    ///
    /// Panics if `slot` is out of range.
    #[inline]
    pub fn write_entry(&mut self, slot: usize, entry: Entry) {
        if let Err(err) = self.slots.set(slot, entry.encode()) {
            panic!("writing slot {}: {}", slot, err);
        }
    }

    pub fn find_free_slot_from(&self, start: usize, direction: Direction) -> Option<usize> {
        self.view().find_free_slot_from(start, direction)
    }

    pub fn set_queue_base(&mut self, slot: usize, is_queue_base: bool) {
        let entry = self.read_entry(slot);
        self.write_entry(
            slot,
            Entry {
                is_queue_base,
                ..entry
            },
        );
    }

    /// Copies slot `src` over slot `dst` and returns the moved entry.
    ///
    /// # Panics
    ///
    /// Panics if either slot is out of range.
    #[inline]
    pub fn copy_entry(&mut self, src: usize, dst: usize) -> Entry {
        if let Err(err) = self.slots.copy_record(src, dst) {
            panic!("copying slot {} to {}: {}", src, dst, err);
        }
        self.read_entry(dst)
    }

    /// Moves every slot in `(from, to]` one position right, `to` being free.
    /// Calls `moved(old, new)` for each relocated run base, highest first.
    pub fn shift_right(&mut self, from: usize, to: usize, mut moved: impl FnMut(usize, usize)) {
        for dst in (from + 1..=to).rev() {
            if self.copy_entry(dst - 1, dst).is_queue_base {
                moved(dst - 1, dst);
            }
        }
    }

    /// Moves every slot in `[from + 1, to)` one position left, `from` being
    /// free. Calls `moved(old, new)` for each relocated run base, lowest first.
    pub fn shift_left(&mut self, from: usize, to: usize, mut moved: impl FnMut(usize, usize)) {
        for dst in from..to.saturating_sub(1) {
            if self.copy_entry(dst + 1, dst).is_queue_base {
                moved(dst + 1, dst);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_encoding() {
        assert_eq!(Entry::EMPTY.encode(), 0);
        assert_eq!(Entry::live(0xA5).encode(), 0b01_1010_0101);
        assert_eq!(Entry::base(0xFF).encode(), 0x3FF);
        assert_eq!(Entry::decode(0b10_0000_0001), Entry {
            is_queue_base: true,
            valid: false,
            value: 1,
        });
        assert_eq!(Entry::decode(Entry::live(7).encode()), Entry::live(7));
    }

    #[test]
    fn slots_are_dense() {
        let mut bytes = [0u8; 5];
        let mut store = EntryStore::new(&mut bytes);
        assert_eq!(store.view().len(), 4);
        store.write_entry(1, Entry::base(0xFF));
        store.write_entry(2, Entry::live(0x00));
        assert_eq!(store.read_entry(0), Entry::EMPTY);
        assert_eq!(store.read_entry(1), Entry::base(0xFF));
        assert_eq!(store.read_entry(2), Entry::live(0x00));
        assert_eq!(store.read_entry(3), Entry::EMPTY);
        // slot 1 is bits 10..20, slot 2 is bits 20..30
        assert_eq!(bytes, [0x00, 0x3F, 0xF4, 0x00, 0x00]);
    }

    #[test]
    fn free_slot_search() {
        let mut bytes = [0u8; 10];
        let mut store = EntryStore::new(&mut bytes);
        for slot in [0, 1, 2, 5, 6, 7] {
            store.write_entry(slot, Entry::live(slot as u8));
        }
        assert_eq!(store.find_free_slot_from(0, Direction::Up), Some(3));
        assert_eq!(store.find_free_slot_from(4, Direction::Up), Some(4));
        assert_eq!(store.find_free_slot_from(5, Direction::Up), None);
        assert_eq!(store.find_free_slot_from(7, Direction::Down), Some(4));
        assert_eq!(store.find_free_slot_from(2, Direction::Down), None);
        assert_eq!(store.find_free_slot_from(99, Direction::Down), Some(4));
        assert_eq!(store.view().free_slots(), 2);
    }

    #[test]
    fn copy_entry_keeps_source() {
        let mut bytes = [0u8; 5];
        let mut store = EntryStore::new(&mut bytes);
        store.write_entry(0, Entry::base(0x81));
        store.write_entry(3, Entry::live(0x7E));
        assert_eq!(store.copy_entry(0, 2), Entry::base(0x81));
        assert_eq!(store.read_entry(0), Entry::base(0x81));
        assert_eq!(store.read_entry(1), Entry::EMPTY);
        assert_eq!(store.read_entry(3), Entry::live(0x7E));
    }

    #[test]
    #[should_panic(expected = "copying slot 4")]
    fn copy_entry_out_of_range_panics() {
        let mut bytes = [0u8; 5];
        EntryStore::new(&mut bytes).copy_entry(4, 0);
    }

    #[test]
    fn shifts_report_moved_bases() {
        let mut bytes = [0u8; 10];
        let mut store = EntryStore::new(&mut bytes);
        store.write_entry(1, Entry::base(10));
        store.write_entry(2, Entry::live(11));
        store.write_entry(3, Entry::base(20));

        let mut moves = [(0, 0); 2];
        let mut n = 0;
        store.shift_right(1, 4, |old, new| {
            moves[n] = (old, new);
            n += 1;
        });
        assert_eq!(&moves[..n], &[(3, 4), (1, 2)]);
        assert_eq!(store.read_entry(2), Entry::base(10));
        assert_eq!(store.read_entry(3), Entry::live(11));
        assert_eq!(store.read_entry(4), Entry::base(20));

        store.write_entry(1, Entry::EMPTY);
        n = 0;
        store.shift_left(1, 5, |old, new| {
            moves[n] = (old, new);
            n += 1;
        });
        assert_eq!(&moves[..n], &[(2, 1), (4, 3)]);
        assert_eq!(store.read_entry(1), Entry::base(10));
        assert_eq!(store.read_entry(2), Entry::live(11));
        assert_eq!(store.read_entry(3), Entry::base(20));
    }
}
