//! Descriptor identities (F, X, Y) and their classification.
//!
//! A descriptor travels in three forms: a packed decimal id `FXXYYY`
//! (`f * 100000 + x * 1000 + y`), two octets on the wire (`FFXXXXXX YYYYYYYY`)
//! and the canonical six-digit text.

use std::{fmt, str::FromStr};

use crate::errors::DescriptorError;

/// Largest valid F.
pub const MAX_F: u8 = 3;
/// Largest valid X.
pub const MAX_X: u8 = 63;
/// Largest valid Y.
pub const MAX_Y: u16 = 999;

/// An element identifier. Parts are always in range; build one with
/// [Descriptor::new], [Descriptor::try_new] or one of the decoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "String", try_from = "String")
)]
pub struct Descriptor {
    f: u8,
    x: u8,
    y: u16,
}

impl Descriptor {
    /// Builds a descriptor from its parts.
    ///
    /// # Panics
    ///
    /// Panics if any part is out of range. Use [Descriptor::try_new] for parts
    /// that come from data.
    pub fn new(f: u8, x: u8, y: u16) -> Self {
        assert!(
            f <= MAX_F && x <= MAX_X && y <= MAX_Y,
            "descriptor part out of range: f={f} x={x} y={y}"
        );
        Self { f, x, y }
    }

    pub fn try_new(f: u8, x: u8, y: u16) -> Result<Self, DescriptorError> {
        if f > MAX_F || x > MAX_X || y > MAX_Y {
            return Err(DescriptorError::OutOfRange { f, x, y });
        }

        Ok(Self { f, x, y })
    }

    /// Splits a packed `FXXYYY` id. Fails unless it encodes `f <= 3` and `x <= 63`.
    pub fn from_packed_id(id: u32) -> Result<Self, DescriptorError> {
        let f = id / 100_000;
        let x = (id % 100_000) / 1000;
        let y = id % 1000;
        if f > u32::from(MAX_F) || x > u32::from(MAX_X) {
            return Err(DescriptorError::InvalidPackedId(id));
        }

        Ok(Self {
            f: f as u8,
            x: x as u8,
            y: y as u16,
        })
    }

    pub fn f(&self) -> u8 {
        self.f
    }

    pub fn x(&self) -> u8 {
        self.x
    }

    pub fn y(&self) -> u16 {
        self.y
    }

    /// Decodes the two-octet wire form: F in the top 2 bits, X in the low 6 bits
    /// of the first octet, Y in the second.
    pub fn from_two_octets(octets: [u8; 2]) -> Self {
        Self {
            f: (octets[0] >> 6) & 0x03,
            x: octets[0] & 0x3F,
            y: u16::from(octets[1]),
        }
    }

    pub fn packed_id(&self) -> u32 {
        u32::from(self.f) * 100_000 + u32::from(self.x) * 1000 + u32::from(self.y)
    }

    /// Two-octet wire form. `None` when Y does not fit an octet.
    pub fn to_two_octets(&self) -> Option<[u8; 2]> {
        let y = u8::try_from(self.y).ok()?;
        Some([(self.f << 6) | self.x, y])
    }

    /// Delayed replication factor: `0 31 001`, `0 31 002`, `0 31 011` or `0 31 012`.
    pub fn is_delayed_replication(&self) -> bool {
        self.f == 0 && self.x == 31 && matches!(self.y, 1 | 2 | 11 | 12)
    }

    /// Short delayed replication factor: `0 31 000`.
    pub fn is_short_delayed_replication(&self) -> bool {
        self.f == 0 && self.x == 31 && self.y == 0
    }

    /// Element descriptor reserved for local use (X in 48..=63).
    pub fn is_local(&self) -> bool {
        self.f == 0 && (48..=63).contains(&self.x)
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:02}{:03}", self.f, self.x, self.y)
    }
}

impl FromStr for Descriptor {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DescriptorError::InvalidText(s.to_string());
        if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let f: u8 = s[0..1].parse().map_err(|_| invalid())?;
        let x: u8 = s[1..3].parse().map_err(|_| invalid())?;
        let y: u16 = s[3..6].parse().map_err(|_| invalid())?;
        if f > MAX_F || x > MAX_X {
            return Err(invalid());
        }

        Ok(Self { f, x, y })
    }
}

impl From<Descriptor> for String {
    fn from(value: Descriptor) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Descriptor {
    type Error = DescriptorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
