use alloc::vec::Vec;

/// Bytes fed to the parser that it has not consumed yet.
///
/// Consumed bytes are compacted away lazily on the next push, so a feed
/// never moves more than the unread tail.
#[derive(Debug, Default)]
pub(crate) struct InputBuffer {
    data: Vec<u8>,
    pos: usize,
}

impl InputBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, bytes: &[u8]) {
        if self.pos > 0 {
            self.data.drain(..self.pos);
            self.pos = 0;
        }
        self.data.extend_from_slice(bytes);
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    #[inline]
    pub(crate) fn next(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Unconsumed bytes.
    pub(crate) fn rest(&self) -> &[u8] {
        &self.data[self.pos..]
    }

    /// `true` if the unread bytes start with a UTF-8 sequence that has been
    /// cut short, so its character is only known once more bytes arrive.
    pub(crate) fn starts_with_partial_char(&self) -> bool {
        let rest = self.rest();
        let width = match rest.first() {
            Some(0xC2..=0xDF) => 2,
            Some(0xE0..=0xEF) => 3,
            Some(0xF0..=0xF4) => 4,
            _ => return false,
        };
        rest.len() < width && rest[1..].iter().all(|&b| is_continuation(b))
    }

    pub(crate) fn clear(&mut self) {
        self.data.clear();
        self.pos = 0;
    }

    /// Move the longest run of bytes matching `pred` into `dst`.
    ///
    /// Returns the number of characters copied, counting only UTF-8 lead
    /// bytes, so the caller can advance its column.
    pub(crate) fn copy_while<F>(&mut self, dst: &mut Vec<u8>, pred: F) -> usize
    where
        F: Fn(u8) -> bool,
    {
        let rest = self.rest();
        let len = rest.iter().position(|&b| !pred(b)).unwrap_or(rest.len());
        let run = &rest[..len];
        let chars = run.iter().filter(|&&b| !is_continuation(b)).count();
        dst.extend_from_slice(run);
        self.pos += len;
        chars
    }
}

#[inline]
pub(crate) fn is_continuation(b: u8) -> bool {
    b & 0xC0 == 0x80
}
