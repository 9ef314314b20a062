//! Low-level bit read utilities for data-section byte slices.
//!
//! Bits are addressed in MSB-first order: bit 0 is the high bit of the first byte.
//!
//! Field extraction comes in two interchangeable implementations behind the
//! [Extractor] trait: [Bitwise] walks the field one bit at a time and is the
//! reference, [Windowed] works on whole bytes and is what a cursor uses by default.
//! Both return identical values and has-data flags for every input.

use crate::errors::ReadError;

/// Masks a single bit of a byte, indexed by bit position (0 = MSB).
pub const BIT_AT: [u8; 8] = [0x80, 0x40, 0x20, 0x10, 0x08, 0x04, 0x02, 0x01];

/// Masks the bits of a byte from position `i` to the LSB.
pub const BIT_TAIL: [u8; 8] = [0xFF, 0x7F, 0x3F, 0x1F, 0x0F, 0x07, 0x03, 0x01];

/// Masks the first `i + 1` most significant bits of a byte.
pub const BIT_HEAD: [u8; 8] = [0x80, 0xC0, 0xE0, 0xF0, 0xF8, 0xFC, 0xFE, 0xFF];

/// Largest integer field, in bits.
pub const MAX_INT_BITS: usize = 32;

/// Reads a single bit at `bit_pos` (0 = MSB of first byte). Returns 0 or 1.
pub fn read_bit_at(data: &[u8], bit_pos: usize) -> Result<u8, ReadError> {
    let byte = *data.get(bit_pos / 8).ok_or(ReadError::OutOfBounds)?;
    Ok(u8::from(byte & BIT_AT[bit_pos % 8] != 0))
}

/// Fails unless `len` bits starting at `bit_pos` lie inside `data`.
pub fn check_range(data: &[u8], bit_pos: usize, len: usize) -> Result<(), ReadError> {
    if bit_pos
        .checked_add(len)
        .map_or(true, |end| end > data.len() * 8)
    {
        return Err(ReadError::OutOfBounds);
    }

    Ok(())
}

/// Value of an integer field of `bit_length` bits with every bit set.
pub fn all_ones(bit_length: usize) -> u32 {
    if bit_length >= MAX_INT_BITS {
        u32::MAX
    } else {
        (1u32 << bit_length) - 1
    }
}

/// Big-endian value of two octets.
pub fn two_octets_to_u32(source: [u8; 2]) -> u32 {
    u32::from(source[0]) << 8 | u32::from(source[1])
}

/// Big-endian value of three octets, as used by section lengths.
pub fn three_octets_to_u32(source: [u8; 3]) -> u32 {
    u32::from(source[0]) << 16 | u32::from(source[1]) << 8 | u32::from(source[2])
}

/// A field extraction algorithm.
///
/// Implementations only read; advancing a position is the caller's job (see
/// [crate::cursor::BitCursor]). The returned flag is `true` when the field holds
/// data, i.e. when at least one of its bits is 0.
pub trait Extractor {
    /// Reads an unsigned integer of `bit_length` bits (1..=32) at `bit_pos`.
    fn read_u32(data: &[u8], bit_pos: usize, bit_length: usize)
    -> Result<(u32, bool), ReadError>;

    /// Fills `out` with `out.len()` characters of 8 bits each, starting at `bit_pos`.
    fn read_chars(data: &[u8], bit_pos: usize, out: &mut [u8]) -> Result<bool, ReadError>;
}

/// Bit-by-bit extraction. Slow and obviously correct.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bitwise;

/// Byte-window extraction.
///
/// Integers of 8 bits or more are cut out of a 40-bit window over five
/// consecutive bytes, enough for any 32-bit field at any sub-byte offset.
/// Shorter integers fall back to [Bitwise]. Characters are assembled from two
/// adjacent source bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Windowed;

fn check_int_length(bit_length: usize) -> Result<(), ReadError> {
    if bit_length == 0 || bit_length > MAX_INT_BITS {
        return Err(ReadError::InvalidBitLength(bit_length));
    }

    Ok(())
}

impl Extractor for Bitwise {
    fn read_u32(
        data: &[u8],
        bit_pos: usize,
        bit_length: usize,
    ) -> Result<(u32, bool), ReadError> {
        check_int_length(bit_length)?;
        check_range(data, bit_pos, bit_length)?;

        let mut value = 0u32;
        let mut has_data = false;

        for pos in bit_pos..bit_pos + bit_length {
            let bit = read_bit_at(data, pos)?;
            if bit == 0 {
                has_data = true;
            }
            value = (value << 1) | u32::from(bit);
        }

        Ok((value, has_data))
    }

    fn read_chars(data: &[u8], bit_pos: usize, out: &mut [u8]) -> Result<bool, ReadError> {
        check_range(data, bit_pos, out.len() * 8)?;

        let mut has_data = false;
        let mut pos = bit_pos;

        for byte in out.iter_mut() {
            *byte = 0;
            for _ in 0..8 {
                let bit = read_bit_at(data, pos)?;
                if bit == 0 {
                    has_data = true;
                }
                *byte = (*byte << 1) | bit;
                pos += 1;
            }
        }

        Ok(has_data)
    }
}

impl Extractor for Windowed {
    fn read_u32(
        data: &[u8],
        bit_pos: usize,
        bit_length: usize,
    ) -> Result<(u32, bool), ReadError> {
        check_int_length(bit_length)?;

        // Byte windows are unsafe for short fields at arbitrary offsets.
        if bit_length < 8 {
            return Bitwise::read_u32(data, bit_pos, bit_length);
        }

        check_range(data, bit_pos, bit_length)?;

        let first = bit_pos / 8;
        let rem = bit_pos % 8;

        // Window bytes past the end of the data lie outside the field.
        let octet = |k: usize| u64::from(data.get(first + k).copied().unwrap_or(0));
        let window = u64::from(data[first] & BIT_TAIL[rem]) << 32
            | octet(1) << 24
            | octet(2) << 16
            | octet(3) << 8
            | octet(4);

        let value = (window >> (40 - rem - bit_length)) as u32;
        let has_data = u64::from(value) + 1 != 1u64 << bit_length;

        Ok((value, has_data))
    }

    fn read_chars(data: &[u8], bit_pos: usize, out: &mut [u8]) -> Result<bool, ReadError> {
        check_range(data, bit_pos, out.len() * 8)?;

        let rem = bit_pos % 8;
        let mut has_data = false;

        for (j, byte) in out.iter_mut().enumerate() {
            let c = bit_pos / 8 + j;
            *byte = data[c] & BIT_TAIL[rem];
            if rem != 0 {
                *byte <<= rem;
                *byte |= (data[c + 1] & BIT_HEAD[rem - 1]) >> (8 - rem);
            }
            if *byte != 0xFF {
                has_data = true;
            }
        }

        Ok(has_data)
    }
}
