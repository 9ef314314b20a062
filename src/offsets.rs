//! Starting bit offsets of the subsets of a data section, and their cache format.
//!
//! # Cache layout
//!
//! ```text
//! +-----------+-----------+-----------+-----+
//! | count (4) | offset[0] | offset[1] | ... |
//! +-----------+-----------+-----------+-----+
//! ```
//!
//! Every field is a `u32` in the platform's native byte order, with no header,
//! version or checksum. A cache is only meant to be read back on a machine
//! with the same native layout.

use std::io::{Read, Write};

use byteorder::{NativeEndian, ReadBytesExt, WriteBytesExt};
use log::debug;

use crate::errors::OffsetsError;

/// Bit offset of each subset, in subset order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubsetBitOffsets {
    offsets: Vec<u32>,
}

impl SubsetBitOffsets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records where the next subset starts.
    pub fn push(&mut self, bit_offset: u32) {
        self.offsets.push(bit_offset);
    }

    pub fn get(&self, subset: usize) -> Option<u32> {
        self.offsets.get(subset).copied()
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.offsets.iter().copied()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.offsets
    }

    /// Writes the count, then every offset.
    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<(), OffsetsError> {
        let count = u32::try_from(self.offsets.len()).map_err(|_| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "too many subsets for the offset cache",
            )
        })?;

        w.write_u32::<NativeEndian>(count)?;
        for &offset in &self.offsets {
            w.write_u32::<NativeEndian>(offset)?;
        }

        debug!("wrote {count} subset offsets");
        Ok(())
    }

    /// Reads a count, then exactly that many offsets. A short stream is an error.
    pub fn read_from<R: Read>(r: &mut R) -> Result<Self, OffsetsError> {
        let count = r.read_u32::<NativeEndian>()?;

        let mut offsets = Vec::new();
        for _ in 0..count {
            offsets.push(r.read_u32::<NativeEndian>()?);
        }

        debug!("read {count} subset offsets");
        Ok(Self { offsets })
    }
}

impl From<Vec<u32>> for SubsetBitOffsets {
    fn from(offsets: Vec<u32>) -> Self {
        Self { offsets }
    }
}

impl FromIterator<u32> for SubsetBitOffsets {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self {
            offsets: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor};

    use super::*;

    #[test]
    fn test_round_trip() {
        let offsets = SubsetBitOffsets::from(vec![0, 128, 4096]);

        let mut buf = Vec::new();
        offsets.write_to(&mut buf).unwrap();
        assert_eq!(buf.len(), 4 * 4);

        let back = SubsetBitOffsets::read_from(&mut Cursor::new(&buf)).unwrap();
        assert_eq!(back, offsets);
        assert_eq!(back.as_slice(), &[0, 128, 4096]);
    }

    #[test]
    fn test_native_layout() {
        let offsets: SubsetBitOffsets = [7u32].into_iter().collect();
        let mut buf = Vec::new();
        offsets.write_to(&mut buf).unwrap();

        let mut expected = 1u32.to_ne_bytes().to_vec();
        expected.extend_from_slice(&7u32.to_ne_bytes());
        assert_eq!(buf, expected);
    }

    #[test]
    fn test_empty_round_trip() {
        let mut buf = Vec::new();
        SubsetBitOffsets::new().write_to(&mut buf).unwrap();
        let back = SubsetBitOffsets::read_from(&mut Cursor::new(&buf)).unwrap();
        assert!(back.is_empty());
    }

    #[test]
    fn test_truncated_stream() {
        let offsets = SubsetBitOffsets::from(vec![0, 128, 4096]);
        let mut buf = Vec::new();
        offsets.write_to(&mut buf).unwrap();
        buf.truncate(buf.len() - 2);

        let err = SubsetBitOffsets::read_from(&mut Cursor::new(&buf)).unwrap_err();
        let OffsetsError::Io(e) = err;
        assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof);

        assert!(SubsetBitOffsets::read_from(&mut Cursor::new(&[0u8, 1])).is_err());
    }

    #[test]
    fn test_rejecting_writer() {
        let offsets = SubsetBitOffsets::from(vec![1, 2]);
        let mut small = [0u8; 6];
        let mut w = Cursor::new(&mut small[..]);
        assert!(offsets.write_to(&mut w).is_err());
    }

    #[test]
    fn test_accessors() {
        let mut offsets = SubsetBitOffsets::new();
        offsets.push(0);
        offsets.push(300);
        assert_eq!(offsets.len(), 2);
        assert_eq!(offsets.get(1), Some(300));
        assert_eq!(offsets.get(2), None);
        assert_eq!(offsets.iter().collect::<Vec<_>>(), vec![0, 300]);
    }
}
