//! Events delivered by the cursor.
//!
//! An [`Event`] is one discrete unit of parsed structure: a scalar, an object
//! member name, or a begin/end marker of an object or array. Every event is
//! reported together with the [`Location`] the parser had reached when it
//! produced it.
//!
//! # Examples
//!
//! ```
//! use jsoncursor::{Cursor, Event, EventCursor, EventKind, Number};
//!
//! let mut cursor = Cursor::from_contiguous_view(br#"{"n": 1}"#).unwrap();
//! assert_eq!(cursor.current().kind(), EventKind::BeginObject);
//! cursor.next().unwrap();
//! assert_eq!(cursor.current(), &Event::Key("n".into()));
//! cursor.next().unwrap();
//! assert_eq!(cursor.current(), &Event::Number(Number::Uint(1)));
//! ```
use core::fmt;

/// A position in the input, 1-based.
///
/// Locations order lexicographically by line, then column. `column` counts
/// characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    /// Line number, starting at 1.
    pub line: usize,
    /// Column number, starting at 1.
    pub column: usize,
}

impl Location {
    /// Create a location.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Numeric payload of an [`Event::Number`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Number {
    /// A negative integer that fits in `i64`.
    Int(i64),
    /// A non-negative integer that fits in `u64`.
    Uint(u64),
    /// A number with a fraction or exponent.
    Float(f64),
    /// The literal text of the number, kept when lossless numbers are
    /// requested or when an integer does not fit in 64 bits.
    Text(String),
}

impl Number {
    /// Best-effort conversion to `f64`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Uint(n) => Some(*n as f64),
            Self::Float(n) => Some(*n),
            Self::Text(s) => s.parse().ok(),
        }
    }

    /// Returns the value as `i64` when it is an integer in range.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Uint(n) => i64::try_from(*n).ok(),
            Self::Float(_) => None,
            Self::Text(s) => s.parse().ok(),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Uint(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Discriminant of an [`Event`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    /// A string scalar.
    String,
    /// A numeric scalar.
    Number,
    /// `true` or `false`.
    Bool,
    /// `null`.
    Null,
    /// A byte-string scalar.
    Binary,
    /// An object member name.
    Key,
    /// `{`
    BeginObject,
    /// `}`
    EndObject,
    /// `[`
    BeginArray,
    /// `]`
    EndArray,
    /// No event has been produced.
    EndOfInput,
}

/// One structural parse event.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    /// A complete string value.
    String(String),
    /// A number.
    Number(Number),
    /// A boolean.
    Bool(bool),
    /// `null`.
    Null,
    /// A byte string. The JSON parser never produces these, other parsers and
    /// visitors may.
    Binary(Vec<u8>),
    /// A complete object member name.
    Key(String),
    /// Start of an object.
    BeginObject,
    /// End of an object.
    EndObject,
    /// Start of an array.
    BeginArray,
    /// End of an array.
    EndArray,
    /// Placeholder held by a cursor that has not produced any event.
    #[default]
    EndOfInput,
}

impl Event {
    /// The event's kind.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::String(_) => EventKind::String,
            Self::Number(_) => EventKind::Number,
            Self::Bool(_) => EventKind::Bool,
            Self::Null => EventKind::Null,
            Self::Binary(_) => EventKind::Binary,
            Self::Key(_) => EventKind::Key,
            Self::BeginObject => EventKind::BeginObject,
            Self::EndObject => EventKind::EndObject,
            Self::BeginArray => EventKind::BeginArray,
            Self::EndArray => EventKind::EndArray,
            Self::EndOfInput => EventKind::EndOfInput,
        }
    }

    /// `true` for leaf values (strings, numbers, booleans, null, binary).
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::String(_) | Self::Number(_) | Self::Bool(_) | Self::Null | Self::Binary(_)
        )
    }

    /// `true` for `BeginObject` and `BeginArray`.
    #[must_use]
    pub fn is_begin(&self) -> bool {
        matches!(self, Self::BeginObject | Self::BeginArray)
    }

    /// `true` for `EndObject` and `EndArray`.
    #[must_use]
    pub fn is_end(&self) -> bool {
        matches!(self, Self::EndObject | Self::EndArray)
    }

    /// String payload of `String` and `Key` events.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::Key(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "string {s:?}"),
            Self::Number(n) => write!(f, "number {n}"),
            Self::Bool(b) => write!(f, "bool {b}"),
            Self::Null => f.write_str("null"),
            Self::Binary(bytes) => write!(f, "binary {:?}", bstr::BStr::new(bytes)),
            Self::Key(k) => write!(f, "key {k:?}"),
            Self::BeginObject => f.write_str("begin_object"),
            Self::EndObject => f.write_str("end_object"),
            Self::BeginArray => f.write_str("begin_array"),
            Self::EndArray => f.write_str("end_array"),
            Self::EndOfInput => f.write_str("end_of_input"),
        }
    }
}
