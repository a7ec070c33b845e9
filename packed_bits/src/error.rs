#[cfg(feature = "std")]
use thiserror::Error;

#[cfg_attr(feature = "std", derive(Error))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackedBitsError {
    #[cfg_attr(
        feature = "std",
        error("Bit width must be in the range 1..=25, got {0}")
    )]
    InvalidBitWidth(usize),

    #[cfg_attr(feature = "std", error("Value {0} does not fit in {1} bits"))]
    ValueOverflow(u32, usize),

    #[cfg_attr(feature = "std", error("Index {0} is out of bounds for length {1}"))]
    IndexOutOfBounds(usize, usize),

    #[cfg_attr(
        feature = "std",
        error("Field of {bit_width} bits at bit {bit_offset} exceeds buffer of {len_bits} bits")
    )]
    FieldOutOfBounds {
        bit_offset: usize,
        bit_width: usize,
        len_bits: usize,
    },
}

#[cfg(not(feature = "std"))]
impl core::fmt::Display for PackedBitsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PackedBitsError::InvalidBitWidth(n) => {
                write!(f, "Bit width must be in the range 1..=25, got {}", n)
            }
            PackedBitsError::ValueOverflow(v, n) => {
                write!(f, "Value {} does not fit in {} bits", v, n)
            }
            PackedBitsError::IndexOutOfBounds(i, l) => {
                write!(f, "Index {} is out of bounds for length {}", i, l)
            }
            PackedBitsError::FieldOutOfBounds {
                bit_offset,
                bit_width,
                len_bits,
            } => write!(
                f,
                "Field of {} bits at bit {} exceeds buffer of {} bits",
                bit_width, bit_offset, len_bits
            ),
        }
    }
}
