//! The pull cursor.
//!
//! A [`Cursor`] owns a [`Source`] and an [`IncrementalParser`]. Each call to
//! [`EventCursor::next`] runs the parser until exactly one event has been
//! produced, refilling from the source whenever the parser runs dry. The
//! cursor is always positioned on an event: construction performs the first
//! advance.
//!
//! # Examples
//!
//! ```rust
//! use jsoncursor::{ChunkedSource, Cursor, Event, EventCursor};
//!
//! let source = ChunkedSource::new(["[tr", "ue, nu", "ll]"]);
//! let mut cursor = Cursor::from_chunked_source(source).unwrap();
//! let mut events = Vec::new();
//! while !cursor.done() {
//!     events.push(cursor.current().clone());
//!     cursor.next().unwrap();
//! }
//! assert_eq!(
//!     events,
//!     [Event::BeginArray, Event::Bool(true), Event::Null, Event::EndArray]
//! );
//! cursor.check_done().unwrap();
//! ```
use alloc::vec::Vec;
use std::io::Read;

use crate::{
    bom::{BomScanner, skip_bom},
    error::{CursorError, ErrorCode},
    event::{Event, Location},
    filter::FilterView,
    options::{CursorOptions, DefaultErrorHandler, ErrorHandler},
    parser::{IncrementalParser, JsonParser},
    source::{ReaderSource, SliceSource, Source},
    visitor::{EventCache, Forwarder, Visitor},
};

/// The read interface shared by [`Cursor`] and [`FilterView`].
pub trait EventCursor {
    /// `true` once no further events will be produced, either because the
    /// input is finished or because an error occurred.
    fn done(&self) -> bool;

    /// The event the cursor is positioned on.
    ///
    /// [`Event::EndOfInput`] if no event has been produced.
    fn current(&self) -> &Event;

    /// Location at which the current event was produced.
    fn location(&self) -> Location;

    /// The error that stopped the cursor, if any.
    fn error(&self) -> Option<&CursorError>;

    /// Advance to the next event. A no-op once [`done`](Self::done).
    ///
    /// # Errors
    ///
    /// Returns the failure, which is also kept in [`error`](Self::error).
    fn next(&mut self) -> Result<(), CursorError>;

    /// A view that only stops on events accepted by `predicate`.
    ///
    /// The view is positioned on the first accepted event.
    ///
    /// # Errors
    ///
    /// Fails if advancing past rejected events fails.
    fn filter<F>(&mut self, predicate: F) -> Result<FilterView<'_, Self, F>, CursorError>
    where
        Self: Sized,
        F: FnMut(&Event, Location) -> bool,
    {
        FilterView::new(self, predicate)
    }

    /// Iterate over the remaining events, starting with the current one.
    ///
    /// A failure is yielded once, after which the iterator ends.
    fn events(&mut self) -> Events<'_, Self>
    where
        Self: Sized,
    {
        Events {
            cursor: self,
            reported: false,
        }
    }
}

/// Iterator returned by [`EventCursor::events`].
#[derive(Debug)]
pub struct Events<'c, C> {
    cursor: &'c mut C,
    reported: bool,
}

impl<C: EventCursor> Iterator for Events<'_, C> {
    type Item = Result<Event, CursorError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor.done() {
            if self.reported {
                return None;
            }
            self.reported = true;
            return self.cursor.error().cloned().map(Err);
        }
        let event = self.cursor.current().clone();
        // A failure is recorded on the cursor and surfaces on the next call.
        let _ = self.cursor.next();
        Some(Ok(event))
    }
}

/// Source, parser and the refill buffer between them.
#[derive(Debug)]
struct Driver<S, P> {
    source: S,
    parser: P,
    buffer: Vec<u8>,
    buffer_length: usize,
    end_of_source: bool,
    is_first_chunk: bool,
    bom: BomScanner,
}

impl<S: Source, P: IncrementalParser> Driver<S, P> {
    fn new(source: S, parser: P, buffer_length: usize) -> Self {
        Self {
            source,
            parser,
            buffer: Vec::new(),
            buffer_length: buffer_length.max(1),
            end_of_source: false,
            is_first_chunk: true,
            bom: BomScanner::new(),
        }
    }

    /// Pull one chunk from the source into the parser.
    ///
    /// An exhausted source or a zero-length read ends the stream. While the
    /// first chunk is pending, bytes that may belong to a byte-order mark are
    /// withheld.
    fn refill_buffer(&mut self) -> Result<(), ErrorCode> {
        if self.source.is_error() {
            return Err(ErrorCode::Source);
        }
        if self.source.is_eof() {
            return self.mark_end_of_source();
        }
        self.buffer.clear();
        self.buffer.resize(self.buffer_length, 0);
        let count = self.source.read(&mut self.buffer);
        self.buffer.truncate(count);
        tracing::trace!(count, requested = self.buffer_length, "refill");
        if self.source.is_error() {
            return Err(ErrorCode::Source);
        }

        if count == 0 {
            return self.mark_end_of_source();
        }

        let mut start = 0;
        if self.is_first_chunk {
            match self.bom.scan(&self.buffer)? {
                Some(skip) => {
                    if skip > 0 {
                        tracing::debug!("skipped byte-order mark");
                    }
                    self.is_first_chunk = false;
                    start = skip;
                }
                None => return Ok(()),
            }
        }
        self.parser.feed(&self.buffer[start..]);
        Ok(())
    }

    fn mark_end_of_source(&mut self) -> Result<(), ErrorCode> {
        tracing::debug!("end of source");
        self.end_of_source = true;
        if self.is_first_chunk {
            self.is_first_chunk = false;
            self.bom.finish()?;
        }
        self.parser.finish_input();
        Ok(())
    }

    /// Run the parser until `visitor` stops it or it finishes.
    fn read_next(&mut self, visitor: &mut dyn Visitor) -> Result<(), ErrorCode> {
        self.parser.restart();
        while !self.parser.has_stopped() {
            if self.parser.needs_more_input() && !self.end_of_source {
                self.refill_buffer()?;
            }
            self.parser.parse_some(visitor)?;
        }
        Ok(())
    }

    /// Drain the source, verifying that only trailing trivia remains.
    fn check_done(&mut self) -> Result<(), ErrorCode> {
        if self.source.is_error() {
            return Err(ErrorCode::Source);
        }
        loop {
            self.parser.verify_complete()?;
            if self.end_of_source {
                return Ok(());
            }
            self.refill_buffer()?;
        }
    }
}

impl<'a, P: IncrementalParser> Driver<SliceSource<'a>, P> {
    /// Hand the whole view to the parser at once.
    fn load_view(&mut self) -> Result<(), ErrorCode> {
        let data = self.source.remaining();
        let skip = skip_bom(data)?;
        if skip > 0 {
            tracing::debug!("skipped byte-order mark");
        }
        self.parser.feed(&data[skip..]);
        self.source.consume(data.len());
        self.is_first_chunk = false;
        self.end_of_source = true;
        self.parser.finish_input();
        Ok(())
    }
}

/// A pull-based cursor over the events of a JSON stream.
///
/// See the [crate documentation](crate) for an example.
#[derive(Debug)]
pub struct Cursor<S, P = JsonParser> {
    driver: Driver<S, P>,
    cache: EventCache,
    error: Option<CursorError>,
}

impl<S: Source> Cursor<S> {
    /// Stream mode over `source` with default options.
    ///
    /// # Errors
    ///
    /// Fails if the first event cannot be produced.
    pub fn from_chunked_source(source: S) -> Result<Self, CursorError> {
        Self::from_chunked_source_with(source, CursorOptions::default(), DefaultErrorHandler)
    }

    /// Stream mode over `source`.
    ///
    /// # Errors
    ///
    /// Fails if the first event cannot be produced.
    pub fn from_chunked_source_with(
        source: S,
        options: CursorOptions,
        handler: impl ErrorHandler + 'static,
    ) -> Result<Self, CursorError> {
        Self::open_chunked_source_with(source, options, handler).into_result()
    }

    /// Stream mode over `source`; never fails.
    ///
    /// A construction failure is kept in [`Cursor::error`] and leaves the
    /// cursor [`done`](EventCursor::done).
    pub fn open_chunked_source(source: S, options: CursorOptions) -> Self {
        Self::open_chunked_source_with(source, options, DefaultErrorHandler)
    }

    /// Stream mode over `source` with an error policy; never fails.
    pub fn open_chunked_source_with(
        source: S,
        options: CursorOptions,
        handler: impl ErrorHandler + 'static,
    ) -> Self {
        let parser = JsonParser::with_handler(options.parser, handler);
        Self::open_with_parser(source, parser, options.buffer_length)
    }
}

impl<R: Read> Cursor<ReaderSource<R>> {
    /// Stream mode over any [`std::io::Read`].
    ///
    /// # Errors
    ///
    /// Fails if the first event cannot be produced.
    pub fn from_reader(reader: R) -> Result<Self, CursorError> {
        Self::from_chunked_source(ReaderSource::new(reader))
    }
}

impl<'a> Cursor<SliceSource<'a>> {
    /// View mode over fully resident input, with default options.
    ///
    /// # Errors
    ///
    /// Fails on a bad byte-order mark or if the first event cannot be
    /// produced.
    pub fn from_contiguous_view(data: &'a [u8]) -> Result<Self, CursorError> {
        Self::from_contiguous_view_with(data, CursorOptions::default(), DefaultErrorHandler)
    }

    /// View mode over fully resident input.
    ///
    /// # Errors
    ///
    /// Fails on a bad byte-order mark or if the first event cannot be
    /// produced.
    pub fn from_contiguous_view_with(
        data: &'a [u8],
        options: CursorOptions,
        handler: impl ErrorHandler + 'static,
    ) -> Result<Self, CursorError> {
        Self::open_contiguous_view_with(data, options, handler).into_result()
    }

    /// View mode; never fails.
    ///
    /// A construction failure is kept in [`Cursor::error`] and leaves the
    /// cursor [`done`](EventCursor::done).
    ///
    /// ```rust
    /// use jsoncursor::{Cursor, CursorOptions, EncodingError, ErrorCode, EventCursor};
    ///
    /// let cursor = Cursor::open_contiguous_view(b"\xEF\xBB{}", CursorOptions::default());
    /// assert!(cursor.done());
    /// assert_eq!(
    ///     cursor.error().map(|e| &e.code),
    ///     Some(&ErrorCode::Encoding(EncodingError::MalformedBom))
    /// );
    /// ```
    pub fn open_contiguous_view(data: &'a [u8], options: CursorOptions) -> Self {
        Self::open_contiguous_view_with(data, options, DefaultErrorHandler)
    }

    /// View mode with an error policy; never fails.
    pub fn open_contiguous_view_with(
        data: &'a [u8],
        options: CursorOptions,
        handler: impl ErrorHandler + 'static,
    ) -> Self {
        let parser = JsonParser::with_handler(options.parser, handler);
        let mut cursor = Self::idle(SliceSource::new(data), parser, options.buffer_length);
        let result = cursor
            .driver
            .load_view()
            .and_then(|()| cursor.driver.read_next(&mut cursor.cache));
        if let Err(code) = result {
            cursor.fail(code);
        }
        cursor
    }
}

impl<S: Source, P: IncrementalParser> Cursor<S, P> {
    fn idle(source: S, parser: P, buffer_length: usize) -> Self {
        Self {
            driver: Driver::new(source, parser, buffer_length),
            cache: EventCache::default(),
            error: None,
        }
    }

    /// Stream mode with a caller-supplied parser.
    ///
    /// # Errors
    ///
    /// Fails if the first event cannot be produced.
    pub fn with_parser(source: S, parser: P, buffer_length: usize) -> Result<Self, CursorError> {
        Self::open_with_parser(source, parser, buffer_length).into_result()
    }

    /// Stream mode with a caller-supplied parser; never fails.
    pub fn open_with_parser(source: S, parser: P, buffer_length: usize) -> Self {
        let mut cursor = Self::idle(source, parser, buffer_length);
        let result = cursor.driver.read_next(&mut cursor.cache);
        if let Err(code) = result {
            cursor.fail(code);
        }
        cursor
    }

    fn into_result(self) -> Result<Self, CursorError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self),
        }
    }

    /// Record a failure at the parser's position.
    fn fail(&mut self, code: ErrorCode) -> CursorError {
        let err = CursorError::new(code, self.driver.parser.location());
        tracing::debug!(%err, "cursor stopped");
        self.error = Some(err.clone());
        err
    }

    /// Forward the current event, and for a begin event the rest of its
    /// subtree, to `visitor`.
    ///
    /// Afterwards the cursor is positioned on the last event forwarded. A
    /// visitor returning `false` ends forwarding early.
    ///
    /// ```rust
    /// use jsoncursor::{Cursor, Event, EventCursor};
    ///
    /// let mut cursor = Cursor::from_contiguous_view(br#"[[1, 2], 3]"#).unwrap();
    /// cursor.next().unwrap();
    /// let mut inner: Vec<Event> = Vec::new();
    /// cursor.read_to(&mut inner).unwrap();
    /// assert_eq!(inner.len(), 4);
    /// assert_eq!(cursor.current(), &Event::EndArray);
    /// cursor.next().unwrap();
    /// assert_eq!(cursor.current().to_string(), "number 3");
    /// ```
    ///
    /// # Errors
    ///
    /// Fails if the visitor or the parser fails.
    pub fn read_to(&mut self, visitor: &mut dyn Visitor) -> Result<(), CursorError> {
        if self.done() {
            return Ok(());
        }
        let mut forwarder = Forwarder::new(visitor, 0);
        let mut result = forwarder
            .forward(self.cache.event().clone(), self.cache.location())
            .map_err(ErrorCode::from);
        if let Ok(true) = result {
            result = self.driver.read_next(&mut forwarder).map(|()| false);
        }
        tracing::trace!(open = forwarder.depth(), "redirect finished");
        if let Some((event, location)) = forwarder.into_last() {
            self.cache.set(event, location);
        }
        result.map(|_| ()).map_err(|code| self.fail(code))
    }

    /// Confirm that the input ended cleanly after the value.
    ///
    /// Reads the rest of the source, accepting only whitespace (and comments,
    /// if the error policy allows them).
    ///
    /// # Errors
    ///
    /// [`ErrorCode::Incomplete`] if input ended inside a value,
    /// [`SyntaxError::ExtraCharacter`](crate::SyntaxError::ExtraCharacter)
    /// for trailing content, or the error that already stopped the cursor.
    pub fn check_done(&mut self) -> Result<(), CursorError> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        let result = self.driver.check_done();
        result.map_err(|code| self.fail(code))
    }

    /// Bytes requested from the source per refill.
    #[must_use]
    pub fn buffer_length(&self) -> usize {
        self.driver.buffer_length
    }

    /// Change the refill size. Takes effect on the next refill; values below
    /// 1 are treated as 1.
    pub fn set_buffer_length(&mut self, length: usize) {
        self.driver.buffer_length = length.max(1);
    }

    /// `true` once the source has reported end of stream.
    #[must_use]
    pub fn is_end_of_source(&self) -> bool {
        self.driver.end_of_source
    }

    /// The failure that stopped the cursor, if any.
    #[must_use]
    pub fn error(&self) -> Option<&CursorError> {
        self.error.as_ref()
    }

    /// The underlying source.
    pub fn source(&self) -> &S {
        &self.driver.source
    }

    /// The underlying parser.
    pub fn parser(&self) -> &P {
        &self.driver.parser
    }

    /// The parser's current line.
    #[must_use]
    pub fn line(&self) -> usize {
        self.driver.parser.line()
    }

    /// The parser's current column, in characters.
    #[must_use]
    pub fn column(&self) -> usize {
        self.driver.parser.column()
    }
}

impl<S: Source, P: IncrementalParser> EventCursor for Cursor<S, P> {
    fn done(&self) -> bool {
        self.error.is_some() || self.driver.parser.is_finished()
    }

    fn current(&self) -> &Event {
        self.cache.event()
    }

    fn location(&self) -> Location {
        self.cache.location()
    }

    fn error(&self) -> Option<&CursorError> {
        self.error.as_ref()
    }

    fn next(&mut self) -> Result<(), CursorError> {
        if self.done() {
            return Ok(());
        }
        let result = self.driver.read_next(&mut self.cache);
        result.map_err(|code| self.fail(code))
    }
}
