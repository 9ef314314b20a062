//! Error types for field extraction, reference decoding, bitmaps and the offset cache.

use thiserror::Error;

/// Errors produced when extracting a field from a data section (see [crate::cursor::BitCursor]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    /// Character fields need a multiple of 8 bits; integer fields need 1..=32 bits.
    #[error("invalid bit length {0}")]
    InvalidBitLength(usize),
    /// Requested bit range is beyond the end of the data.
    #[error("bit range is beyond the end of the data")]
    OutOfBounds,
}

/// Errors produced when building a [crate::descriptor::Descriptor] from data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// Packed `FXXYYY` id with `f > 3` or `x > 63`.
    #[error("packed descriptor id {0} out of range")]
    InvalidPackedId(u32),
    /// Text that is not six digits naming a valid F and X.
    #[error("invalid descriptor text {0:?}")]
    InvalidText(String),
    /// Parts outside `f <= 3`, `x <= 63`, `y <= 999`.
    #[error("descriptor part out of range: f={f} x={x} y={y}")]
    OutOfRange { f: u8, x: u8, y: u16 },
}

/// Errors produced by [crate::reference::signed_reference].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    /// Reference width is 0 or greater than 32 bits.
    #[error("invalid reference width {0}")]
    InvalidWidth(u8),
}

/// Errors produced when building or querying a [crate::bitmap::BitmapCollection].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BitmapError {
    /// The entry (or one of its side arrays) already holds `limit` items.
    #[error("bitmap capacity of {limit} exceeded")]
    CapacityExceeded { limit: usize },
    /// No entry maps the requested target index.
    #[error("no bitmap entry for index {0}")]
    NotFound(u32),
}

/// Errors produced when persisting or reloading [crate::offsets::SubsetBitOffsets].
#[derive(Debug, Error)]
pub enum OffsetsError {
    /// The stream rejected a write or ended before all values were read.
    #[error("subset offset cache I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
