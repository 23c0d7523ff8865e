//! Byte-order-mark detection.
//!
//! Only UTF-8 input is accepted. A leading UTF-8 BOM (`EF BB BF`) is skipped;
//! UTF-16 marks and malformed UTF-8 marks are rejected. Detection is
//! incremental so a mark split across reads is still recognised, and the
//! bytes of a partial mark are withheld until the scanner has decided.
use thiserror::Error;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// A byte-order mark that does not introduce UTF-8 text.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingError {
    /// `FE FF`
    #[error("expected UTF-8, found UTF-16 (big endian) byte-order mark")]
    Utf16BigEndian,
    /// `FF FE`
    #[error("expected UTF-8, found UTF-16 (little endian) byte-order mark")]
    Utf16LittleEndian,
    /// A truncated or corrupted UTF-8 byte-order mark.
    #[error("malformed byte-order mark")]
    MalformedBom,
}

/// Incremental byte-order-mark scanner.
///
/// Feed it the leading chunks of a stream until it returns `Some(skip)`; the
/// first `skip` bytes of the chunk that resolved the scan belong to the mark.
#[derive(Debug, Default, Clone)]
pub(crate) struct BomScanner {
    seen: [u8; 3],
    len: usize,
}

impl BomScanner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// `true` while a partial mark has been consumed but not yet resolved.
    pub(crate) fn is_pending(&self) -> bool {
        self.len > 0
    }

    /// Scan the next chunk.
    ///
    /// Returns `Ok(None)` when every byte of `chunk` was part of a mark
    /// prefix and more input is needed, or `Ok(Some(skip))` once resolved.
    pub(crate) fn scan(&mut self, chunk: &[u8]) -> Result<Option<usize>, EncodingError> {
        for (i, &b) in chunk.iter().enumerate() {
            if self.len == 0 && !matches!(b, 0xEF | 0xFE | 0xFF) {
                return Ok(Some(0));
            }
            self.seen[self.len] = b;
            self.len += 1;
            match &self.seen[..self.len] {
                [0xFE, 0xFF] => return Err(EncodingError::Utf16BigEndian),
                [0xFF, 0xFE] => return Err(EncodingError::Utf16LittleEndian),
                [0xFE | 0xFF, _] => return Err(EncodingError::MalformedBom),
                seen if seen == UTF8_BOM => {
                    self.len = 0;
                    return Ok(Some(i + 1));
                }
                seen if UTF8_BOM.starts_with(seen) || seen.len() == 1 => {}
                _ => return Err(EncodingError::MalformedBom),
            }
        }
        Ok(None)
    }

    /// Resolve the scan at end of input.
    pub(crate) fn finish(&self) -> Result<(), EncodingError> {
        if self.is_pending() {
            Err(EncodingError::MalformedBom)
        } else {
            Ok(())
        }
    }
}

/// Number of leading bytes of a fully resident input that form a UTF-8 BOM.
///
/// # Errors
///
/// Returns an [`EncodingError`] when the input starts with a UTF-16 mark or a
/// malformed UTF-8 mark.
///
/// ```
/// use jsoncursor::{EncodingError, skip_bom};
///
/// assert_eq!(skip_bom(b"\xEF\xBB\xBFtrue"), Ok(3));
/// assert_eq!(skip_bom(b"true"), Ok(0));
/// assert_eq!(skip_bom(b"\xEF\xBB1"), Err(EncodingError::MalformedBom));
/// ```
pub fn skip_bom(input: &[u8]) -> Result<usize, EncodingError> {
    let mut scanner = BomScanner::new();
    match scanner.scan(input)? {
        Some(skip) => Ok(skip),
        None => scanner.finish().map(|()| 0),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(b"", Ok(0))]
    #[case(b"[]", Ok(0))]
    #[case(b"\xEF\xBB\xBF", Ok(3))]
    #[case(b"\xEF\xBB\xBF42", Ok(3))]
    #[case(b"\xFE\xFF\x00[", Err(EncodingError::Utf16BigEndian))]
    #[case(b"\xFF\xFE[\x00", Err(EncodingError::Utf16LittleEndian))]
    #[case(b"\xEF\xBB", Err(EncodingError::MalformedBom))]
    #[case(b"\xEF\xBB1", Err(EncodingError::MalformedBom))]
    #[case(b"\xEF1", Err(EncodingError::MalformedBom))]
    #[case(b"\xFE1", Err(EncodingError::MalformedBom))]
    fn resident_input(#[case] input: &[u8], #[case] expected: Result<usize, EncodingError>) {
        assert_eq!(skip_bom(input), expected);
    }

    #[test]
    fn mark_split_two_plus_one() {
        let mut scanner = BomScanner::new();
        assert_eq!(scanner.scan(b"\xEF\xBB"), Ok(None));
        assert!(scanner.is_pending());
        assert_eq!(scanner.scan(b"\xBFtrue"), Ok(Some(1)));
        assert!(!scanner.is_pending());
    }

    #[test]
    fn mark_split_one_byte_at_a_time() {
        let mut scanner = BomScanner::new();
        assert_eq!(scanner.scan(b"\xEF"), Ok(None));
        assert_eq!(scanner.scan(b"\xBB"), Ok(None));
        assert_eq!(scanner.scan(b"\xBF"), Ok(Some(1)));
    }

    #[test]
    fn pending_prefix_at_end_of_input_is_malformed() {
        let mut scanner = BomScanner::new();
        assert_eq!(scanner.scan(b"\xEF"), Ok(None));
        assert_eq!(scanner.finish(), Err(EncodingError::MalformedBom));
    }

    #[test]
    fn corrupt_continuation_in_later_chunk() {
        let mut scanner = BomScanner::new();
        assert_eq!(scanner.scan(b"\xEF\xBB"), Ok(None));
        assert_eq!(scanner.scan(b"{"), Err(EncodingError::MalformedBom));
    }
}
