//! Values produced when extracting a field from a data section.

/// Outcome of a successful extraction.
///
/// A field whose bits are all 1 carries the missing-value sentinel and holds no
/// observation. An invalid request (bad length, out of range) is the `Err` arm
/// of the extraction call, not a variant here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
    /// The field holds a real value.
    Present(T),
    /// The field is the all-ones sentinel.
    Missing,
}

impl<T> Field<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, Field::Present(_))
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Field::Missing)
    }

    /// Converts into an [Option], dropping the distinction between the two kinds of absence.
    pub fn present(self) -> Option<T> {
        match self {
            Field::Present(value) => Some(value),
            Field::Missing => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Field<U> {
        match self {
            Field::Present(value) => Field::Present(f(value)),
            Field::Missing => Field::Missing,
        }
    }
}

/// A character field: raw 8-bit characters cut out of the bit stream.
///
/// Missing data can be judged two ways, and callers pick the one they need:
/// - per field ([CharField::has_data]): the field holds data if any of its bits is 0;
/// - per byte ([CharField::byte_missing]): a character is missing if it is `0xFF`.
///
/// The two differ for partially-missing fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharField {
    bytes: Vec<u8>,
    has_data: bool,
}

impl CharField {
    pub(crate) fn new(bytes: Vec<u8>, has_data: bool) -> Self {
        Self { bytes, has_data }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// True if at least one bit of the whole field is 0.
    pub fn has_data(&self) -> bool {
        self.has_data
    }

    /// True if the character at `index` is the `0xFF` sentinel. Out-of-range indices are not missing.
    pub fn byte_missing(&self, index: usize) -> bool {
        self.bytes.get(index) == Some(&0xFF)
    }

    /// Per-byte view: `None` for every `0xFF` character.
    pub fn missing_bytes(&self) -> Vec<Option<u8>> {
        self.bytes
            .iter()
            .map(|&b| if b == 0xFF { None } else { Some(b) })
            .collect()
    }

    /// Field-level view as a tri-state [Field].
    pub fn into_field(self) -> Field<Vec<u8>> {
        if self.has_data {
            Field::Present(self.bytes)
        } else {
            Field::Missing
        }
    }

    /// Characters as text, one `char` per byte (Latin-1), untouched.
    pub fn to_text(&self) -> String {
        self.bytes.iter().map(|&b| char::from(b)).collect()
    }

    /// Like [CharField::to_text] with trailing blanks removed.
    pub fn trimmed(&self) -> String {
        let mut text = self.to_text();
        let len = text.trim_end_matches(' ').len();
        text.truncate(len);
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_accessors() {
        let present = Field::Present(7u32);
        assert!(present.is_present());
        assert_eq!(present.clone().map(|v| v * 2), Field::Present(14));
        assert_eq!(present.present(), Some(7));

        let missing: Field<u32> = Field::Missing;
        assert!(missing.is_missing());
        assert_eq!(missing.present(), None);
    }

    #[test]
    fn test_partially_missing_chars() {
        let field = CharField::new(vec![b'A', 0xFF], true);
        assert!(field.has_data());
        assert!(!field.byte_missing(0));
        assert!(field.byte_missing(1));
        assert!(!field.byte_missing(2));
        assert_eq!(field.missing_bytes(), vec![Some(b'A'), None]);
        assert_eq!(field.into_field(), Field::Present(vec![b'A', 0xFF]));
    }

    #[test]
    fn test_fully_missing_chars() {
        let field = CharField::new(vec![0xFF; 3], false);
        assert!(!field.has_data());
        assert_eq!(field.missing_bytes(), vec![None, None, None]);
        assert_eq!(field.into_field(), Field::Missing);
    }

    #[test]
    fn test_trimmed() {
        let field = CharField::new(b"EGLL  ".to_vec(), true);
        assert_eq!(field.to_text(), "EGLL  ");
        assert_eq!(field.trimmed(), "EGLL");
        assert_eq!(CharField::new(b"   ".to_vec(), true).trimmed(), "");
    }
}
