//! # packed_bits
//!
//! A `no_std` compatible codec for bit fields packed MSB-first into byte buffers.
//!
//! Fields are addressed by an absolute bit offset and a width. Bit 0 is the most
//! significant bit of byte 0, so a buffer reads left to right like a bit string,
//! regardless of the host's byte order.
//!
//! ```rust
//! use packed_bits::bit_ops::{read_field, write_field};
//!
//! let mut buf = [0u8; 4];
//! // An 11-bit field straddling bytes 0..=1
//! write_field(&mut buf, 1, 11, 0x5A5).unwrap();
//! assert_eq!(read_field(&buf, 1, 11).unwrap(), 0x5A5);
//! assert_eq!(buf[0], 0b0101_1010);
//! ```
//!
//! ## Record arrays
//!
//! ```rust
//! use packed_bits::PackedSliceMut;
//!
//! // 10-bit records, densely packed: 5 bytes hold 4 of them
//! let mut bytes = [0u8; 5];
//! let mut records = PackedSliceMut::<10>::new(&mut bytes).unwrap();
//! assert_eq!(records.len(), 4);
//! records.set(3, 0x3FF).unwrap();
//! assert_eq!(records.get(3), Some(0x3FF));
//! assert_eq!(bytes[4], 0xFF);
//! ```
//!

#![cfg_attr(not(feature = "std"), no_std)]

pub mod error;
pub use error::PackedBitsError;

pub mod bit_ops;
pub mod container;
pub mod field;
pub mod index;

pub use container::{PackedSlice, PackedSliceMut};
pub use field::BitField;
pub use index::{BitIndex, ElemIndex};
