//! Table B reference values and scaled-value rendering.

use crate::errors::ReferenceError;

/// Total width of a padded value, not counting the separating space.
pub const PADDED_WIDTH: usize = 17;

/// Decodes a reference value override of `bits` bits (1..=32).
///
/// The most significant of the `bits` bits is a sign flag and the rest is the
/// magnitude. This is sign-magnitude, not two's complement: `0x81` on 8 bits
/// is -1 and `0x80` is 0. `raw` is taken as given: bits above `bits` stay in
/// the magnitude, and the arithmetic wraps like the 32-bit C decoders do.
pub fn signed_reference(bits: u8, raw: u32) -> Result<i32, ReferenceError> {
    if bits == 0 || bits > 32 {
        return Err(ReferenceError::InvalidWidth(bits));
    }

    let sign_mask: u32 = if bits > 1 { 1 << (bits - 1) } else { 1 };

    if raw & sign_mask != 0 {
        Ok((raw.wrapping_sub(sign_mask) as i32).wrapping_neg())
    } else {
        Ok(raw as i32)
    }
}

/// Renders `value` with `escale` fractional digits (none when `escale` is negative).
///
/// With `padded`, the number is right-justified to [PADDED_WIDTH] characters and
/// followed by one space, the layout fixed-column reports are built from.
pub fn format_scaled(escale: i32, value: f64, padded: bool) -> String {
    if !value.is_finite() {
        return format_non_finite(value, padded);
    }

    let precision = usize::try_from(escale).unwrap_or(0);
    if padded {
        format!("{value:>width$.precision$} ", width = PADDED_WIDTH)
    } else {
        format!("{value:.precision$}")
    }
}

/// Spells NaN and infinities the way C's `printf` does.
fn format_non_finite(value: f64, padded: bool) -> String {
    let text = match (value.is_nan(), value.is_sign_negative()) {
        (true, false) => "nan",
        (true, true) => "-nan",
        (false, false) => "inf",
        (false, true) => "-inf",
    };

    if padded {
        format!("{text:>width$} ", width = PADDED_WIDTH)
    } else {
        text.to_string()
    }
}

/// A decoded magnitude together with the decimal scale it was encoded with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledValue {
    pub value: f64,
    pub escale: i32,
}

impl ScaledValue {
    pub fn new(value: f64, escale: i32) -> Self {
        Self { value, escale }
    }

    /// Applies a table B entry to a raw field: `(raw + reference) / 10^escale`.
    pub fn decode(raw: u32, reference: i32, escale: i32) -> Self {
        let unscaled = f64::from(raw) + f64::from(reference);
        let value = if escale >= 0 {
            unscaled / 10f64.powi(escale)
        } else {
            unscaled * 10f64.powi(-escale)
        };
        Self { value, escale }
    }

    pub fn format(&self, padded: bool) -> String {
        format_scaled(self.escale, self.value, padded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_reference() {
        assert_eq!(signed_reference(8, 0x80), Ok(0));
        assert_eq!(signed_reference(8, 0x81), Ok(-1));
        assert_eq!(signed_reference(8, 0x05), Ok(5));
        assert_eq!(signed_reference(8, 0xFF), Ok(-127));
    }

    #[test]
    fn test_signed_reference_edges() {
        assert_eq!(signed_reference(1, 1), Ok(0));
        assert_eq!(signed_reference(1, 0), Ok(0));
        assert_eq!(signed_reference(32, 0x8000_0001), Ok(-1));
        assert_eq!(signed_reference(32, 0x7FFF_FFFF), Ok(i32::MAX));
        assert_eq!(signed_reference(32, u32::MAX), Ok(-i32::MAX));
    }

    #[test]
    fn test_signed_reference_uses_raw_as_given() {
        // High bits beyond the width stay in the magnitude.
        assert_eq!(signed_reference(4, 0x1F), Ok(-23));
        assert_eq!(signed_reference(8, 0x100), Ok(256));
        assert_eq!(signed_reference(1, 0xFFFF_FFFF), Ok(2));
        assert_eq!(signed_reference(2, 0xFFFF_FFFF), Ok(3));
    }

    #[test]
    fn test_signed_reference_invalid_width() {
        assert_eq!(signed_reference(0, 1), Err(ReferenceError::InvalidWidth(0)));
        assert_eq!(signed_reference(33, 1), Err(ReferenceError::InvalidWidth(33)));
    }

    #[test]
    fn test_format_scaled_padded() {
        let s = format_scaled(2, 12.34567, true);
        assert_eq!(s, format!("{}12.35 ", " ".repeat(12)));
        assert_eq!(s.len(), PADDED_WIDTH + 1);
    }

    #[test]
    fn test_format_scaled_negative_escale() {
        assert_eq!(format_scaled(-1, 42.0, false), "42");
        assert_eq!(format_scaled(-3, 42000.0, true), format!("{}42000 ", " ".repeat(12)));
    }

    #[test]
    fn test_format_scaled_unpadded() {
        assert_eq!(format_scaled(0, 7.0, false), "7");
        assert_eq!(format_scaled(3, -0.5, false), "-0.500");
    }

    #[test]
    fn test_format_scaled_non_finite() {
        assert_eq!(format_scaled(2, f64::NAN, false), "nan");
        assert_eq!(format_scaled(2, -f64::NAN, false), "-nan");
        assert_eq!(format_scaled(-1, f64::NEG_INFINITY, false), "-inf");

        let s = format_scaled(2, f64::INFINITY, true);
        assert_eq!(s, format!("{}inf ", " ".repeat(14)));
        assert_eq!(s.len(), PADDED_WIDTH + 1);
    }

    #[test]
    fn test_scaled_value_decode() {
        // Temperature, escale 2, reference 0: 27315 -> 273.15
        let v = ScaledValue::decode(27315, 0, 2);
        assert_eq!(v.format(false), "273.15");

        // Negative reference: height, escale -1, reference -40
        let v = ScaledValue::decode(100, -40, -1);
        assert_eq!(v.value, 600.0);
        assert_eq!(v.format(true), format!("{}600 ", " ".repeat(14)));
    }
}
