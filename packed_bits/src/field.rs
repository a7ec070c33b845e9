//! Named sub-fields of a fixed-width record.
//!
//! A record is itself a packed field (for example a 24-bit queue header or a
//! 10-bit slot). A [`BitField`] describes one member of that record by its
//! MSB-first offset from the record's first bit.
//!
//! ```rust
//! use packed_bits::{BitField, BitIndex};
//!
//! const FLAG: BitField = BitField::new(0, 1);
//! const COUNT: BitField = BitField::new(1, 7);
//!
//! let mut buf = [0u8; 2];
//! let record = BitIndex::of_byte(1);
//! FLAG.write(&mut buf, record, 1);
//! COUNT.write(&mut buf, record, 42);
//! assert_eq!(buf[1], 0x80 | 42);
//! assert_eq!(COUNT.extract(buf[1] as u32, 8), 42);
//! ```

use crate::BitIndex;
use crate::bit_ops::{self, mask};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BitField {
    offset: u8,
    width: u8,
}

impl BitField {
    pub const fn new(offset: u8, width: u8) -> Self {
        assert!(
            width >= 1 && width as usize <= bit_ops::MAX_FIELD_WIDTH,
            "field width out of range"
        );
        Self { offset, width }
    }

    #[inline]
    pub const fn offset(self) -> usize {
        self.offset as usize
    }

    #[inline]
    pub const fn width(self) -> usize {
        self.width as usize
    }

    /// Largest value the field can hold.
    #[inline]
    pub const fn max_value(self) -> u32 {
        mask(self.width as usize)
    }

    /// First bit past the field, relative to the record.
    #[inline]
    pub const fn end(self) -> usize {
        self.offset as usize + self.width as usize
    }

    /// Reads the field of the record starting at `record`.
    #[inline]
    pub fn read(self, slice: &[u8], record: BitIndex) -> u32 {
        bit_ops::get_bits(slice, record.get() + self.offset(), self.width())
    }

    /// Writes the field of the record starting at `record`.
    #[inline]
    pub fn write(self, slice: &mut [u8], record: BitIndex, value: u32) {
        bit_ops::set_bits(slice, record.get() + self.offset(), self.width(), value);
    }

    /// Extracts the field from a whole record already loaded into the low
    /// `record_width` bits of `record`.
    #[inline]
    pub const fn extract(self, record: u32, record_width: usize) -> u32 {
        (record >> (record_width - self.end())) & self.max_value()
    }

    /// Replaces the field inside a loaded record.
    #[inline]
    pub const fn insert(self, record: u32, record_width: usize, value: u32) -> u32 {
        let shift = record_width - self.end();
        let field = self.max_value() << shift;
        (record & !field) | ((value << shift) & field)
    }
}
