//! A pull-based streaming cursor over JSON text.
//!
//! Bytes arrive from a [`Source`] in chunks of any size; an incremental
//! [`JsonParser`] turns them into [`Event`]s, and a [`Cursor`] hands those out
//! one at a time, on demand. A chunk boundary may fall anywhere, including
//! inside a literal, a number, an escape sequence or a multi-byte character;
//! the events are the same as for the contiguous input.
//!
//! ```rust
//! use jsoncursor::{ChunkedSource, Cursor, Event, EventCursor};
//!
//! let chunks = ["{\"tool\": \"sea", "rch\", \"args\": [1, 2", "]}"];
//! let mut cursor = Cursor::from_chunked_source(ChunkedSource::new(chunks)).unwrap();
//! let events: Vec<Event> = cursor.events().collect::<Result<_, _>>().unwrap();
//! assert_eq!(events[2], Event::String("search".into()));
//! assert_eq!(events.len(), 9);
//! cursor.check_done().unwrap();
//! ```
extern crate alloc;

mod bom;
mod cursor;
mod error;
mod event;
mod filter;
mod options;
mod parser;
mod source;
mod visitor;

pub mod chunk_utils;

#[cfg(test)]
mod tests;

pub use bom::{EncodingError, skip_bom};
pub use cursor::{Cursor, EventCursor, Events};
pub use error::{CursorError, ErrorCode, Severity, SyntaxError, VisitError};
pub use event::{Event, EventKind, Location, Number};
pub use filter::FilterView;
pub use options::{
    CursorOptions, DEFAULT_BUFFER_LENGTH, DefaultErrorHandler, ErrorHandler, ParserOptions,
    StrictErrorHandler,
};
pub use parser::{IncrementalParser, JsonParser};
pub use source::{ChunkedSource, ReaderSource, SliceSource, Source};
pub use visitor::Visitor;
