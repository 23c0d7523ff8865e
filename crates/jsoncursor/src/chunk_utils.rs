//! Helpers for cutting a payload into chunks, for feeding a
//! [`ChunkedSource`](crate::ChunkedSource) in tests, benchmarks and fuzzing.
use alloc::vec::Vec;

/// Split `payload` into approximately equal-sized chunks without
/// breaking UTF-8 code points.
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn produce_chunks(payload: &str, parts: usize) -> Vec<&str> {
    assert!(parts > 0);
    let len = payload.len();
    let chunk_size = len.div_ceil(parts);
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < len {
        let mut end = core::cmp::min(start + chunk_size, len);
        while end < len && !payload.is_char_boundary(end) {
            end += 1;
        }
        chunks.push(&payload[start..end]);
        start = end;
    }
    chunks
}

/// Split `payload` into chunks of `size` bytes; the last may be shorter.
///
/// Boundaries fall wherever the count lands, including inside multi-byte
/// characters and byte-order marks.
///
/// ```rust
/// use jsoncursor::chunk_utils::produce_byte_chunks;
///
/// assert_eq!(produce_byte_chunks(b"abcde", 2), [&b"ab"[..], b"cd", b"e"]);
/// ```
///
/// # Panics
///
/// Panics if `size` is zero.
#[must_use]
pub fn produce_byte_chunks(payload: &[u8], size: usize) -> Vec<&[u8]> {
    payload.chunks(size).collect()
}

/// Split `payload` at each of `offsets`, taken modulo the payload length and
/// sorted. Duplicate offsets yield no empty chunks.
///
/// ```rust
/// use jsoncursor::chunk_utils::split_at_offsets;
///
/// assert_eq!(split_at_offsets(b"[1,2]", &[3, 1, 3]), [&b"["[..], b"1,", b"2]"]);
/// ```
#[must_use]
pub fn split_at_offsets<'a>(payload: &'a [u8], offsets: &[usize]) -> Vec<&'a [u8]> {
    if payload.is_empty() {
        return Vec::new();
    }
    let mut cuts: Vec<usize> = offsets.iter().map(|o| o % payload.len()).collect();
    cuts.sort_unstable();
    cuts.dedup();

    let mut chunks = Vec::with_capacity(cuts.len() + 1);
    let mut start = 0;
    for cut in cuts {
        if cut > start {
            chunks.push(&payload[start..cut]);
            start = cut;
        }
    }
    chunks.push(&payload[start..]);
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn str_chunks_respect_char_boundaries() {
        let chunks = produce_chunks("aé€b", 4);
        assert_eq!(chunks.concat(), "aé€b");
        assert!(chunks.len() <= 4);
    }

    #[test]
    fn offsets_cover_payload() {
        let payload = b"{\"a\":[1,2]}";
        let chunks = split_at_offsets(payload, &[0, 100, 5, 5]);
        assert_eq!(chunks.concat(), payload);
        assert!(chunks.iter().all(|c| !c.is_empty()));
    }

    #[test]
    fn empty_payload_has_no_chunks() {
        assert!(split_at_offsets(b"", &[1, 2]).is_empty());
        assert!(produce_chunks("", 3).is_empty());
    }
}
