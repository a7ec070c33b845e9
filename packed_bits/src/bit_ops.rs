//! MSB-first field access over byte slices.
//!
//! A field is read by loading the (up to) 4-byte block that covers it,
//! normalising that block from big-endian to a host `u32`, then shifting and
//! masking. Writes do the reverse and store the block back, touching only the
//! bytes the field actually spans.
//!
//! [`get_bits`] and [`set_bits`] are the unchecked primitives: they panic like
//! slice indexing when the field runs past the buffer. [`read_field`] and
//! [`write_field`] validate their arguments and return [`PackedBitsError`].

use crate::PackedBitsError;

/// Widest field that fits in one 32-bit block at any bit alignment.
pub const MAX_FIELD_WIDTH: usize = 25;

const BLOCK_BYTES: usize = 4;
const BLOCK_BITS: usize = BLOCK_BYTES * 8;

/// Low `width` bits set.
#[inline]
pub const fn mask(width: usize) -> u32 {
    if width >= 32 {
        u32::MAX
    } else {
        (1u32 << width) - 1
    }
}

#[inline]
fn load_block(slice: &[u8], byte: usize, span: usize) -> u32 {
    let mut raw = [0u8; BLOCK_BYTES];
    raw[..span].copy_from_slice(&slice[byte..byte + span]);
    // host-order read, then normalise: the buffer is always big-endian
    u32::from_be(bytemuck::pod_read_unaligned::<u32>(&raw))
}

#[inline]
fn store_block(slice: &mut [u8], byte: usize, span: usize, block: u32) {
    let stored = block.to_be();
    slice[byte..byte + span].copy_from_slice(&bytemuck::bytes_of(&stored)[..span]);
}

/// Reads `bit_width` bits starting at `bit_offset`.
///
/// # Panics
///
/// Panics if the field extends past the end of `slice`.
#[inline]
pub fn get_bits(slice: &[u8], bit_offset: usize, bit_width: usize) -> u32 {
    debug_assert!((1..=MAX_FIELD_WIDTH).contains(&bit_width));
    let byte = bit_offset / 8;
    let lead = bit_offset % 8;
    let span = (lead + bit_width).div_ceil(8);
    let block = load_block(slice, byte, span);
    let shift = BLOCK_BITS - lead - bit_width;
    (block >> shift) & mask(bit_width)
}

/// Writes the low `bit_width` bits of `value` starting at `bit_offset`.
///
/// Bits of `value` above `bit_width` are discarded. Neighbouring bits in the
/// touched bytes are preserved.
///
/// # Panics
///
/// Panics if the field extends past the end of `slice`.
#[inline]
pub fn set_bits(slice: &mut [u8], bit_offset: usize, bit_width: usize, value: u32) {
    debug_assert!((1..=MAX_FIELD_WIDTH).contains(&bit_width));
    let byte = bit_offset / 8;
    let lead = bit_offset % 8;
    let span = (lead + bit_width).div_ceil(8);
    let shift = BLOCK_BITS - lead - bit_width;
    let field_mask = mask(bit_width) << shift;

    let block = load_block(slice, byte, span);
    let block = (block & !field_mask) | ((value << shift) & field_mask);
    store_block(slice, byte, span, block);
}

fn check_field(len_bytes: usize, bit_offset: usize, bit_width: usize) -> Result<(), PackedBitsError> {
    if !(1..=MAX_FIELD_WIDTH).contains(&bit_width) {
        return Err(PackedBitsError::InvalidBitWidth(bit_width));
    }
    let len_bits = len_bytes * 8;
    match bit_offset.checked_add(bit_width) {
        Some(end) if end <= len_bits => Ok(()),
        _ => Err(PackedBitsError::FieldOutOfBounds {
            bit_offset,
            bit_width,
            len_bits,
        }),
    }
}

/// Checked form of [`get_bits`].
pub fn read_field(slice: &[u8], bit_offset: usize, bit_width: usize) -> Result<u32, PackedBitsError> {
    check_field(slice.len(), bit_offset, bit_width)?;
    Ok(get_bits(slice, bit_offset, bit_width))
}

/// Checked form of [`set_bits`]; rejects values wider than the field.
pub fn write_field(
    slice: &mut [u8],
    bit_offset: usize,
    bit_width: usize,
    value: u32,
) -> Result<(), PackedBitsError> {
    check_field(slice.len(), bit_offset, bit_width)?;
    if value > mask(bit_width) {
        return Err(PackedBitsError::ValueOverflow(value, bit_width));
    }
    set_bits(slice, bit_offset, bit_width, value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_bits() {
        let mut buf = [0u8; 8];
        set_bits(&mut buf, 3, 5, 0b10101);
        assert_eq!(get_bits(&buf, 3, 5), 0b10101);
        assert_eq!(buf[0], 0b0001_0101);
    }

    #[test]
    fn msb_first_layout() {
        let mut buf = [0u8; 2];
        set_bits(&mut buf, 0, 1, 1);
        assert_eq!(buf, [0x80, 0x00]);
        set_bits(&mut buf, 15, 1, 1);
        assert_eq!(buf, [0x80, 0x01]);
        assert_eq!(get_bits(&buf, 0, 16), 0x8001);
    }

    #[test]
    fn straddles_byte_boundary() {
        let mut buf = [0u8; 3];
        // 10 bits at offset 6: two bits in byte 0, eight in byte 1
        set_bits(&mut buf, 6, 10, 0x3FF);
        assert_eq!(buf, [0x03, 0xFF, 0x00]);
        assert_eq!(get_bits(&buf, 6, 10), 0x3FF);
    }

    #[test]
    fn preserves_neighbours() {
        let mut buf = [0xFFu8; 4];
        set_bits(&mut buf, 7, 11, 0);
        assert_eq!(buf, [0xFE, 0x00, 0x3F, 0xFF]);
        assert_eq!(get_bits(&buf, 0, 7), 0x7F);
        assert_eq!(get_bits(&buf, 18, 14), 0x3FFF);
    }

    #[test]
    fn widest_field_at_worst_alignment() {
        let mut buf = [0u8; 4];
        set_bits(&mut buf, 7, MAX_FIELD_WIDTH, mask(MAX_FIELD_WIDTH));
        assert_eq!(buf, [0x01, 0xFF, 0xFF, 0xFF]);
        assert_eq!(get_bits(&buf, 7, MAX_FIELD_WIDTH), mask(MAX_FIELD_WIDTH));
    }

    #[test]
    fn field_at_end_of_buffer() {
        // block would overrun: only the touched bytes are loaded
        let mut buf = [0u8; 2];
        set_bits(&mut buf, 6, 10, 0x2AA);
        assert_eq!(get_bits(&buf, 6, 10), 0x2AA);
        assert_eq!(buf, [0b0000_0010, 0b1010_1010]);
    }

    #[test]
    fn excess_value_bits_are_dropped() {
        let mut buf = [0u8; 2];
        set_bits(&mut buf, 4, 4, 0xFF);
        assert_eq!(buf, [0x0F, 0x00]);
    }

    #[test]
    fn checked_access_rejects_bad_arguments() {
        let mut buf = [0u8; 2];
        assert_eq!(
            read_field(&buf, 0, 0),
            Err(PackedBitsError::InvalidBitWidth(0))
        );
        assert_eq!(
            read_field(&buf, 0, 26),
            Err(PackedBitsError::InvalidBitWidth(26))
        );
        assert_eq!(
            read_field(&buf, 7, 10),
            Err(PackedBitsError::FieldOutOfBounds {
                bit_offset: 7,
                bit_width: 10,
                len_bits: 16
            })
        );
        assert_eq!(
            write_field(&mut buf, 0, 3, 8),
            Err(PackedBitsError::ValueOverflow(8, 3))
        );
        assert_eq!(buf, [0, 0]);
        assert_eq!(write_field(&mut buf, 6, 10, 0x155), Ok(()));
        assert_eq!(read_field(&buf, 6, 10), Ok(0x155));
    }
}
