//! A cursor over the bit stream of a data section.

use std::marker::PhantomData;

use crate::{
    bits::{Bitwise, Extractor, Windowed, check_range},
    errors::ReadError,
    field::{CharField, Field},
};

/// Extractor used by [BitCursor] unless another one is named.
#[cfg(not(feature = "bitwise-reference"))]
pub type DefaultExtractor = Windowed;

/// Extractor used by [BitCursor] unless another one is named.
#[cfg(feature = "bitwise-reference")]
pub type DefaultExtractor = Bitwise;

/// A cursor over a data section: the bytes plus the bit offset of the next field.
///
/// Every successful read advances the offset by exactly the field length. A
/// failed read leaves the offset untouched. One cursor belongs to one decode
/// pass; independent messages get independent cursors.
pub struct BitCursor<'a, E: Extractor = DefaultExtractor> {
    data: &'a [u8],
    bit_pos: usize,
    extractor: PhantomData<E>,
}

impl<'a> BitCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::at(data, 0)
    }

    /// Starts a cursor at `bit_pos`, e.g. at a cached subset offset.
    pub fn at(data: &'a [u8], bit_pos: usize) -> Self {
        Self::with_extractor_at(data, bit_pos)
    }
}

impl<'a> BitCursor<'a, Bitwise> {
    /// A cursor using the bit-by-bit reference extractor.
    pub fn bitwise(data: &'a [u8]) -> Self {
        Self::with_extractor_at(data, 0)
    }
}

impl<'a> BitCursor<'a, Windowed> {
    /// A cursor using the byte-window extractor.
    pub fn windowed(data: &'a [u8]) -> Self {
        Self::with_extractor_at(data, 0)
    }
}

impl<'a, E: Extractor> BitCursor<'a, E> {
    pub fn with_extractor_at(data: &'a [u8], bit_pos: usize) -> Self {
        Self {
            data,
            bit_pos,
            extractor: PhantomData,
        }
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Bit offset of the next field.
    pub fn position(&self) -> usize {
        self.bit_pos
    }

    pub fn set_position(&mut self, bit_pos: usize) {
        self.bit_pos = bit_pos;
    }

    /// Moves forward `n` bits. Skipping past the end makes every later read fail.
    pub fn skip(&mut self, n: usize) {
        self.bit_pos = self.bit_pos.saturating_add(n);
    }

    /// Bits left between the cursor and the end of the data.
    pub fn remaining_bits(&self) -> usize {
        (self.data.len() * 8).saturating_sub(self.bit_pos)
    }

    /// Reads an unsigned integer field of `bit_length` bits (1..=32).
    ///
    /// The field is [Field::Missing] when all of its bits are 1.
    pub fn read_u32(&mut self, bit_length: usize) -> Result<Field<u32>, ReadError> {
        let (value, has_data) = E::read_u32(self.data, self.bit_pos, bit_length)?;
        self.bit_pos += bit_length;

        Ok(if has_data {
            Field::Present(value)
        } else {
            Field::Missing
        })
    }

    /// Reads a character field of `bit_length` bits, a non-zero multiple of 8.
    pub fn read_chars(&mut self, bit_length: usize) -> Result<CharField, ReadError> {
        if bit_length == 0 || bit_length % 8 != 0 {
            return Err(ReadError::InvalidBitLength(bit_length));
        }

        // A corrupt width must not size the buffer before the range is known good.
        check_range(self.data, self.bit_pos, bit_length)?;

        let mut bytes = vec![0u8; bit_length / 8];
        let has_data = E::read_chars(self.data, self.bit_pos, &mut bytes)?;
        self.bit_pos += bit_length;

        Ok(CharField::new(bytes, has_data))
    }

    /// Reads an integer field without advancing the cursor.
    pub fn peek_u32(&self, bit_length: usize) -> Result<Field<u32>, ReadError> {
        let mut ahead = Self::with_extractor_at(self.data, self.bit_pos);
        ahead.read_u32(bit_length)
    }
}
