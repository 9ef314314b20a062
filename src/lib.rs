//! # bufr-bits
//!
//! The bit-level core of a BUFR data-section decoder.
//!
//! - [cursor::BitCursor] pulls unaligned integer and character fields out of a
//!   data section, reporting the all-ones missing-value sentinel.
//! - [descriptor::Descriptor] converts element identifiers between their packed,
//!   two-octet and text forms and classifies them.
//! - [reference] decodes sign-magnitude reference overrides and renders scaled values.
//! - [bitmap::BitmapCollection] links data elements to the quality, statistics
//!   and substitution elements that annotate them.
//! - [offsets::SubsetBitOffsets] records where each subset starts and caches it.
//!
//! Table loading, descriptor expansion and message framing live elsewhere; they
//! hand this crate resolved `(bit_length, escale, reference)` triples.
//!
//! ## Example
//!
//! ```
//! use bufr_bits::cursor::BitCursor;
//! use bufr_bits::field::Field;
//! use bufr_bits::reference::ScaledValue;
//!
//! // 16-bit temperature of 27315 (escale 2) followed by a missing 7-bit field.
//! let data = [0x6A, 0xB3, 0xFE];
//! let mut cursor = BitCursor::new(&data);
//!
//! let Field::Present(raw) = cursor.read_u32(16).unwrap() else { panic!() };
//! assert_eq!(ScaledValue::decode(raw, 0, 2).format(false), "273.15");
//! assert_eq!(cursor.read_u32(7).unwrap(), Field::Missing);
//! assert_eq!(cursor.position(), 23);
//! ```

pub mod bitmap;
pub mod bits;
pub mod cursor;
pub mod descriptor;
pub mod errors;
pub mod field;
pub mod offsets;
pub mod reference;
#[cfg(feature = "serde")]
pub mod serde;
