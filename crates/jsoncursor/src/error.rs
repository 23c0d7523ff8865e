use thiserror::Error;

use crate::{bom::EncodingError, event::Location};

/// An error surfaced by a [`Cursor`](crate::Cursor), carrying the parser
/// location at the point of failure.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{code} at {}:{}", .location.line, .location.column)]
pub struct CursorError {
    /// What went wrong.
    pub code: ErrorCode,
    /// Where the parser was when it went wrong.
    pub location: Location,
}

impl CursorError {
    /// Pair an error code with a location.
    #[must_use]
    pub fn new(code: ErrorCode, location: Location) -> Self {
        Self { code, location }
    }

    /// Line of the failure, 1-based.
    #[must_use]
    pub fn line(&self) -> usize {
        self.location.line
    }

    /// Column of the failure, 1-based, counted in characters.
    #[must_use]
    pub fn column(&self) -> usize {
        self.location.column
    }
}

/// Error taxonomy of the cursor.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorCode {
    /// The source reported an I/O failure.
    #[error("source error")]
    Source,
    /// Malformed or unsupported byte-order mark.
    #[error("encoding error: {0}")]
    Encoding(#[from] EncodingError),
    /// Grammar error reported by the incremental parser.
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    /// End of input reached inside a value.
    #[error("unexpected end of input")]
    Incomplete,
    /// A visitor refused an event.
    #[error("visitor error: {0}")]
    Visit(#[from] VisitError),
}

impl ErrorCode {
    /// Returns the syntax error, if this is one.
    #[must_use]
    pub fn as_syntax(&self) -> Option<&SyntaxError> {
        match self {
            Self::Syntax(err) => Some(err),
            _ => None,
        }
    }
}

/// Failure raised by a [`Visitor`](crate::Visitor) while accepting an event.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct VisitError(pub String);

impl VisitError {
    /// Build a visit error from a message.
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Whether a syntax error may be skipped by the configured error policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The parser can resume from the next safe point if the policy agrees.
    Recoverable,
    /// Parsing cannot continue.
    Fatal,
}

/// Grammar errors produced by [`JsonParser`](crate::JsonParser).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// A character that cannot start or continue the current token.
    #[error("invalid character '{}'", .0.escape_debug())]
    InvalidCharacter(char),
    /// Input bytes that are not valid UTF-8.
    #[error("invalid UTF-8 sequence")]
    InvalidUtf8,
    /// An unknown backslash escape.
    #[error("invalid escape sequence '\\{}'", .0.escape_debug())]
    InvalidEscape(char),
    /// A non-hex digit inside a `\u` escape.
    #[error("invalid unicode escape sequence at character: '{}'", .0.escape_debug())]
    InvalidUnicodeEscapeChar(char),
    /// A lone or misordered UTF-16 surrogate in a `\u` escape.
    #[error("illegal surrogate value \\u{0:04X}")]
    IllegalSurrogate(u32),
    /// A number with a superfluous leading zero, like `01`.
    #[error("leading zero in number")]
    LeadingZero,
    /// A member name was expected.
    #[error("expected key")]
    ExpectedKey,
    /// A `:` was expected after a member name.
    #[error("expected ':'")]
    ExpectedColon,
    /// A value was expected.
    #[error("expected value")]
    ExpectedValue,
    /// A `,` or `}` was expected after an object member.
    #[error("expected ',' or '}}'")]
    ExpectedCommaOrBrace,
    /// A `,` or `]` was expected after an array element.
    #[error("expected ',' or ']'")]
    ExpectedCommaOrBracket,
    /// Content after the end of the root value.
    #[error("unexpected trailing character '{}'", .0.escape_debug())]
    ExtraCharacter(char),
    /// Objects and arrays nested deeper than the configured limit.
    #[error("maximum nesting depth {0} exceeded")]
    MaxNestingDepthExceeded(usize),
    /// A `//` or `/* */` comment.
    #[error("illegal comment")]
    IllegalComment,
    /// A `,` directly before `]` or `}`.
    #[error("trailing comma")]
    TrailingComma,
    /// A raw control character inside a string.
    #[error("unescaped control character 0x{0:02X} in string")]
    UnescapedControlCharacter(u8),
}

impl SyntaxError {
    /// Severity class of this error.
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Self::IllegalComment | Self::TrailingComma | Self::UnescapedControlCharacter(_) => {
                Severity::Recoverable
            }
            _ => Severity::Fatal,
        }
    }
}
