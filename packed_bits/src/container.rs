//! Fixed-length views of `N`-bit records over borrowed bytes.
//!
//! Records are packed back to back with no padding, record 0 starting at the
//! first bit of the slice. The view never grows: its length is fixed when it
//! is created, which makes it usable over a static arena without allocation.
//!
//! # Examples
//!
//! ```rust
//! use packed_bits::{PackedSlice, PackedSliceMut};
//!
//! let mut bytes = [0u8; 8];
//! let mut view = PackedSliceMut::<12>::new(&mut bytes).expect("valid width");
//! assert_eq!(view.len(), 5);
//! view.set(0, 0xABC).unwrap();
//! view.set(1, 0x123).unwrap();
//!
//! let read = PackedSlice::<12>::new(&bytes).expect("valid width");
//! assert_eq!(read.get(0), Some(0xABC));
//! assert_eq!(read.get(1), Some(0x123));
//! assert_eq!(read.get(5), None);
//! ```

use crate::bit_ops::{self, MAX_FIELD_WIDTH, mask};
use crate::{BitIndex, ElemIndex, PackedBitsError};

type Result<T> = core::result::Result<T, PackedBitsError>;

/// Validates the record width N.
#[inline(always)]
fn validate_n<const N: usize>() -> Result<()> {
    if (1..=MAX_FIELD_WIDTH).contains(&N) {
        Ok(())
    } else {
        Err(PackedBitsError::InvalidBitWidth(N))
    }
}

#[inline(always)]
fn validate_len<const N: usize>(bytes: usize, len: usize) -> Result<()> {
    let available = bytes * 8 / N;
    if len <= available {
        Ok(())
    } else {
        Err(PackedBitsError::IndexOutOfBounds(len, available))
    }
}

#[inline(always)]
const fn record_bit<const N: usize>(index: usize) -> usize {
    ElemIndex(index).to_bit::<N>(BitIndex(0)).get()
}

/// Read-only view of `N`-bit records.
#[derive(Debug, Clone, Copy)]
pub struct PackedSlice<'a, const N: usize> {
    bytes: &'a [u8],
    len: usize,
}

impl<'a, const N: usize> PackedSlice<'a, N> {
    const WIDTH_OK: () = assert!(
        N >= 1 && N <= MAX_FIELD_WIDTH,
        "record width must be 1..=25 bits"
    );

    /// Infallible form of [`Self::new`]; the width is checked at compile time.
    pub fn from_bytes(bytes: &'a [u8]) -> Self {
        let () = Self::WIDTH_OK;
        Self {
            len: bytes.len() * 8 / N,
            bytes,
        }
    }

    /// Views as many whole records as `bytes` holds.
    pub fn new(bytes: &'a [u8]) -> Result<Self> {
        validate_n::<N>()?;
        Ok(Self {
            len: bytes.len() * 8 / N,
            bytes,
        })
    }

    /// Views exactly `len` records; trailing bits are ignored.
    pub fn with_len(bytes: &'a [u8], len: usize) -> Result<Self> {
        validate_n::<N>()?;
        validate_len::<N>(bytes.len(), len)?;
        Ok(Self { bytes, len })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<u32> {
        if index >= self.len {
            return None;
        }
        Some(bit_ops::get_bits(self.bytes, record_bit::<N>(index), N))
    }

    pub fn iter(&self) -> Iter<'a, N> {
        Iter {
            view: *self,
            index: 0,
        }
    }
}

/// Mutable view of `N`-bit records.
#[derive(Debug)]
pub struct PackedSliceMut<'a, const N: usize> {
    bytes: &'a mut [u8],
    len: usize,
}

impl<'a, const N: usize> PackedSliceMut<'a, N> {
    /// Infallible form of [`Self::new`]; the width is checked at compile time.
    pub fn from_bytes(bytes: &'a mut [u8]) -> Self {
        let () = PackedSlice::<'a, N>::WIDTH_OK;
        Self {
            len: bytes.len() * 8 / N,
            bytes,
        }
    }

    pub fn new(bytes: &'a mut [u8]) -> Result<Self> {
        validate_n::<N>()?;
        Ok(Self {
            len: bytes.len() * 8 / N,
            bytes,
        })
    }

    pub fn with_len(bytes: &'a mut [u8], len: usize) -> Result<Self> {
        validate_n::<N>()?;
        validate_len::<N>(bytes.len(), len)?;
        Ok(Self { bytes, len })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<u32> {
        self.as_packed_slice().get(index)
    }

    /// Stores a value that must fit in N bits.
    pub fn set(&mut self, index: usize, value: u32) -> Result<()> {
        if index >= self.len {
            return Err(PackedBitsError::IndexOutOfBounds(index, self.len));
        }
        if value > mask(N) {
            return Err(PackedBitsError::ValueOverflow(value, N));
        }
        bit_ops::set_bits(self.bytes, record_bit::<N>(index), N, value);
        Ok(())
    }

    /// Copies record `src` over record `dst`.
    pub fn copy_record(&mut self, src: usize, dst: usize) -> Result<()> {
        let value = self
            .get(src)
            .ok_or(PackedBitsError::IndexOutOfBounds(src, self.len))?;
        self.set(dst, value)
    }

    pub fn as_packed_slice(&self) -> PackedSlice<'_, N> {
        PackedSlice {
            bytes: self.bytes,
            len: self.len,
        }
    }
}

pub struct Iter<'a, const N: usize> {
    view: PackedSlice<'a, N>,
    index: usize,
}

impl<'a, const N: usize> Iterator for Iter<'a, N> {
    type Item = u32;
    fn next(&mut self) -> Option<Self::Item> {
        let val = self.view.get(self.index)?;
        self.index += 1;
        Some(val)
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.view.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl<'a, const N: usize> ExactSizeIterator for Iter<'a, N> {}

impl<'a, const N: usize> IntoIterator for PackedSlice<'a, N> {
    type Item = u32;
    type IntoIter = Iter<'a, N>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
