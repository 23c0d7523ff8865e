//! Byte sources the cursor reads from.
//!
//! A [`Source`] hands out bytes in chunks of whatever size it likes, up to
//! the length of the buffer it is given. Zero-length reads are allowed; the
//! cursor treats one as end of stream.
use std::io::{self, Read};

/// The raw input capability consumed by the cursor.
pub trait Source {
    /// Copy up to `buf.len()` bytes into `buf` and return how many were
    /// written.
    fn read(&mut self, buf: &mut [u8]) -> usize;

    /// `true` once the source is exhausted. Never reverts to `false`.
    fn is_eof(&self) -> bool;

    /// `true` if the source failed.
    fn is_error(&self) -> bool;
}

impl<S: Source + ?Sized> Source for &mut S {
    fn read(&mut self, buf: &mut [u8]) -> usize {
        (**self).read(buf)
    }

    fn is_eof(&self) -> bool {
        (**self).is_eof()
    }

    fn is_error(&self) -> bool {
        (**self).is_error()
    }
}

/// Adapts any [`std::io::Read`] into a [`Source`].
///
/// `Interrupted` reads are retried. Any other I/O error ends the stream and
/// is kept for inspection through [`ReaderSource::error`].
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    eof: bool,
    error: Option<io::Error>,
}

impl<R: Read> ReaderSource<R> {
    /// Wrap a reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            eof: false,
            error: None,
        }
    }

    /// The I/O error that ended the stream, if any.
    #[must_use]
    pub fn error(&self) -> Option<&io::Error> {
        self.error.as_ref()
    }

    /// Unwrap the inner reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> Source for ReaderSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> usize {
        if self.eof || buf.is_empty() {
            return 0;
        }
        loop {
            match self.reader.read(buf) {
                Ok(0) => {
                    self.eof = true;
                    return 0;
                }
                Ok(n) => return n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => {
                    tracing::error!(error = %err, "source read failed");
                    self.error = Some(err);
                    self.eof = true;
                    return 0;
                }
            }
        }
    }

    fn is_eof(&self) -> bool {
        self.eof
    }

    fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// A fully resident, contiguous input.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    /// View `data` as a source.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Skip `n` bytes without reading them.
    pub(crate) fn consume(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.data.len());
    }

    /// Bytes not yet read.
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }
}

impl Source for SliceSource<'_> {
    fn read(&mut self, buf: &mut [u8]) -> usize {
        let rest = self.remaining();
        let n = rest.len().min(buf.len());
        buf[..n].copy_from_slice(&rest[..n]);
        self.pos += n;
        n
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.data.len()
    }

    fn is_error(&self) -> bool {
        false
    }
}

/// Replays a sequence of chunks, one chunk (or part of one) per read.
///
/// A single read never crosses a chunk boundary, so the chunking the cursor
/// observes is exactly the chunking supplied. Empty chunks are skipped.
///
/// ```
/// use jsoncursor::{ChunkedSource, Source};
///
/// let mut source = ChunkedSource::new(["tr", "ue"]);
/// let mut buf = [0u8; 16];
/// assert_eq!(source.read(&mut buf), 2);
/// assert_eq!(&buf[..2], b"tr");
/// assert_eq!(source.read(&mut buf), 2);
/// assert_eq!(source.read(&mut buf), 0);
/// assert!(source.is_eof());
/// ```
#[derive(Debug)]
pub struct ChunkedSource<I: Iterator> {
    chunks: I,
    current: Option<I::Item>,
    offset: usize,
    eof: bool,
}

impl<J> ChunkedSource<J>
where
    J: Iterator,
    J::Item: AsRef<[u8]>,
{
    /// Build a source from anything that yields byte chunks.
    pub fn new<I: IntoIterator<IntoIter = J>>(chunks: I) -> Self {
        Self {
            chunks: chunks.into_iter(),
            current: None,
            offset: 0,
            eof: false,
        }
    }
}

impl<I> Source for ChunkedSource<I>
where
    I: Iterator,
    I::Item: AsRef<[u8]>,
{
    fn read(&mut self, buf: &mut [u8]) -> usize {
        if buf.is_empty() {
            return 0;
        }
        loop {
            if let Some(chunk) = &self.current {
                let rest = &chunk.as_ref()[self.offset..];
                if !rest.is_empty() {
                    let n = rest.len().min(buf.len());
                    buf[..n].copy_from_slice(&rest[..n]);
                    self.offset += n;
                    return n;
                }
            }
            if self.eof {
                return 0;
            }
            self.offset = 0;
            self.current = self.chunks.next();
            if self.current.is_none() {
                self.eof = true;
            }
        }
    }

    fn is_eof(&self) -> bool {
        self.eof
    }

    fn is_error(&self) -> bool {
        false
    }
}
