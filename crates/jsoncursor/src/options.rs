//! Cursor and parser configuration, plus the recoverable-error policy.
use alloc::boxed::Box;
use core::fmt;

use crate::{error::SyntaxError, event::Location};

/// Default number of bytes requested from the source per refill.
pub const DEFAULT_BUFFER_LENGTH: usize = 16384;

/// Configuration options for [`JsonParser`](crate::JsonParser).
///
/// # Examples
///
/// ```rust
/// use jsoncursor::ParserOptions;
///
/// let options = ParserOptions {
///     allow_multiple_values: true,
///     ..Default::default()
/// };
/// assert_eq!(options.max_nesting_depth, 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Deepest permitted nesting of objects and arrays.
    ///
    /// # Default
    ///
    /// `1024`
    pub max_nesting_depth: usize,

    /// Report every number as [`Number::Text`](crate::Number::Text), exactly
    /// as written.
    ///
    /// # Default
    ///
    /// `false`
    pub lossless_number: bool,

    /// Whether to parse multiple JSON values in a single input stream.
    ///
    /// When `true`, the parser does not stop after the first root value but
    /// continues with any further whitespace-delimited values. This supports
    /// JSON Lines (JSONL) and newline-delimited JSON (ND-JSON).
    ///
    /// ```json
    /// {"a": 1}
    /// {"a": 2}
    /// ```
    ///
    /// # Default
    ///
    /// `false`
    pub allow_multiple_values: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_nesting_depth: 1024,
            lossless_number: false,
            allow_multiple_values: false,
        }
    }
}

/// Configuration options for [`Cursor`](crate::Cursor).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorOptions {
    /// Bytes requested from the source per refill. Values below 1 are
    /// treated as 1.
    ///
    /// # Default
    ///
    /// [`DEFAULT_BUFFER_LENGTH`]
    pub buffer_length: usize,

    /// Options handed to the parser.
    pub parser: ParserOptions,
}

impl Default for CursorOptions {
    fn default() -> Self {
        Self {
            buffer_length: DEFAULT_BUFFER_LENGTH,
            parser: ParserOptions::default(),
        }
    }
}

/// Policy consulted when the parser meets a recoverable syntax error.
///
/// Only errors whose [`severity`](SyntaxError::severity) is
/// [`Severity::Recoverable`](crate::Severity::Recoverable) reach the handler.
/// Returning `true` skips the error, `false` makes it fatal.
///
/// Closures work as handlers:
///
/// ```rust
/// use jsoncursor::{Cursor, CursorOptions, Location, SyntaxError};
///
/// let lenient = |err: &SyntaxError, _: Location| matches!(err, SyntaxError::TrailingComma);
/// let cursor = Cursor::from_contiguous_view_with(b"[1,]", CursorOptions::default(), lenient);
/// assert!(cursor.is_ok());
/// ```
pub trait ErrorHandler {
    /// Decide whether parsing may continue past `error`.
    fn on_error(&mut self, error: &SyntaxError, location: Location) -> bool;
}

impl<F> ErrorHandler for F
where
    F: FnMut(&SyntaxError, Location) -> bool,
{
    fn on_error(&mut self, error: &SyntaxError, location: Location) -> bool {
        self(error, location)
    }
}

/// Accepts comments, rejects everything else.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultErrorHandler;

impl ErrorHandler for DefaultErrorHandler {
    fn on_error(&mut self, error: &SyntaxError, _location: Location) -> bool {
        matches!(error, SyntaxError::IllegalComment)
    }
}

/// Rejects every recoverable error.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictErrorHandler;

impl ErrorHandler for StrictErrorHandler {
    fn on_error(&mut self, _error: &SyntaxError, _location: Location) -> bool {
        false
    }
}

/// Owned, type-erased error policy.
pub(crate) struct BoxedHandler(pub(crate) Box<dyn ErrorHandler>);

impl BoxedHandler {
    pub(crate) fn new(handler: impl ErrorHandler + 'static) -> Self {
        Self(Box::new(handler))
    }
}

impl Default for BoxedHandler {
    fn default() -> Self {
        Self::new(DefaultErrorHandler)
    }
}

impl fmt::Debug for BoxedHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ErrorHandler")
    }
}
