/// Position of a record within a dense run of fixed-width records.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElemIndex(pub usize);

impl ElemIndex {
    /// Bit position of this record when records are `N` bits wide and the run
    /// starts at `origin`.
    #[inline]
    pub const fn to_bit<const N: usize>(self, origin: BitIndex) -> BitIndex {
        BitIndex(origin.0 + self.0 * N)
    }
}

/// Absolute bit position inside a byte buffer, counted MSB-first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BitIndex(pub usize);

impl BitIndex {
    /// Start of byte `byte`.
    #[inline]
    pub const fn of_byte(byte: usize) -> Self {
        BitIndex(byte * 8)
    }

    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }

    #[inline]
    pub const fn offset(self, bits: usize) -> Self {
        BitIndex(self.0 + bits)
    }
}
