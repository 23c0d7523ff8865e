//! The incremental parser capability and its JSON implementation.
//!
//! An [`IncrementalParser`] is fed raw bytes as they arrive and produces
//! events into a [`Visitor`] until the visitor asks it to stop, the input
//! runs dry, or the value is finished. Every token may be split across feeds
//! at any byte.
//!
//! # Examples
//!
//! ```rust
//! use jsoncursor::{Event, IncrementalParser, JsonParser, ParserOptions};
//!
//! let mut parser = JsonParser::new(ParserOptions::default());
//! let mut events: Vec<Event> = Vec::new();
//! parser.feed(br#"{"key": [nu"#);
//! parser.parse_some(&mut events).unwrap();
//! parser.feed(br#"ll, true]}"#);
//! parser.finish_input();
//! while !parser.is_finished() {
//!     parser.restart();
//!     parser.parse_some(&mut events).unwrap();
//! }
//! assert_eq!(events.len(), 7);
//! parser.verify_complete().unwrap();
//! ```
#![allow(clippy::enum_glob_use)]

mod escape_buffer;
mod input;
mod lexer;
mod literal_buffer;
mod number;


use alloc::{string::String, vec::Vec};

use self::{
    escape_buffer::UnicodeEscapeBuffer,
    input::InputBuffer,
    lexer::{LexState, Token},
    literal_buffer::ExpectedLiteralBuffer,
};
use crate::{
    error::{ErrorCode, Severity, SyntaxError},
    event::{Event, Location},
    options::{BoxedHandler, ErrorHandler, ParserOptions},
    visitor::Visitor,
};

/// A push parser that can be suspended between any two bytes of input.
///
/// The cursor drives implementations in rounds: [`restart`] clears the stop
/// flag, then [`parse_some`] is called, feeding more input whenever
/// [`needs_more_input`] says so, until [`has_stopped`].
///
/// [`restart`]: IncrementalParser::restart
/// [`parse_some`]: IncrementalParser::parse_some
/// [`needs_more_input`]: IncrementalParser::needs_more_input
/// [`has_stopped`]: IncrementalParser::has_stopped
pub trait IncrementalParser {
    /// Append bytes to the pending input.
    fn feed(&mut self, bytes: &[u8]);

    /// Declare that no further input will be fed.
    fn finish_input(&mut self);

    /// `true` when the pending input is consumed and more may still come.
    fn needs_more_input(&self) -> bool;

    /// `true` once the parser has reached a terminal state, successfully or
    /// not.
    fn is_finished(&self) -> bool;

    /// `true` when the current round is over: a visitor asked to stop or the
    /// parser is finished.
    fn has_stopped(&self) -> bool;

    /// Begin a new round.
    fn restart(&mut self);

    /// Parse as much pending input as possible, delivering events to
    /// `visitor`.
    ///
    /// # Errors
    ///
    /// Returns the error that put the parser in its terminal error state.
    fn parse_some(&mut self, visitor: &mut dyn Visitor) -> Result<(), ErrorCode>;

    /// Check that the pending input holds nothing but insignificant trailing
    /// content, and, once input has ended, that a complete value was parsed.
    ///
    /// Returns `Ok(())` when pending input is exhausted before end of input;
    /// call again after feeding more.
    ///
    /// # Errors
    ///
    /// [`SyntaxError::ExtraCharacter`] for significant trailing content,
    /// [`ErrorCode::Incomplete`] when input ended inside a value.
    fn verify_complete(&mut self) -> Result<(), ErrorCode>;

    /// Current line, 1-based.
    fn line(&self) -> usize;

    /// Current column, 1-based, in characters.
    fn column(&self) -> usize;

    /// Current position as a [`Location`].
    fn location(&self) -> Location {
        Location::new(self.line(), self.column())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    Start,
    BeforePropertyName,
    AfterPropertyName,
    BeforePropertyValue,
    BeforeArrayValue,
    AfterPropertyValue,
    AfterArrayValue,
    /// The root value is complete; the next round finishes the parser.
    Accept,
    Done,
    Error,
}

/// Stack entry, one per open container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Object,
    Array,
}

/// Incremental RFC 8259 JSON parser.
///
/// Strings and member names are delivered whole. Numbers end at the first
/// delimiter or at end of input, so a number at the very end of a stream is
/// only reported after [`finish_input`](IncrementalParser::finish_input).
#[derive(Debug)]
pub struct JsonParser {
    input: InputBuffer,
    end_of_input: bool,

    line: usize,
    column: usize,

    state: ParseState,
    lex_state: LexState,

    /// Lexer scratch for string bytes and number text.
    scratch: Vec<u8>,
    number: String,
    unicode_escape: UnicodeEscapeBuffer,
    high_surrogate: Option<u16>,
    expected_literal: ExpectedLiteralBuffer,

    frames: Vec<Frame>,
    after_comma: bool,
    values_completed: usize,
    /// Input ended inside a token or an open container.
    truncated: bool,

    /// Cleared when a visitor declines further events.
    more: bool,

    options: ParserOptions,
    handler: BoxedHandler,
}

impl Default for JsonParser {
    fn default() -> Self {
        Self::new(ParserOptions::default())
    }
}

impl JsonParser {
    /// Create a parser using [`DefaultErrorHandler`](crate::DefaultErrorHandler).
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self::with_handler(options, crate::options::DefaultErrorHandler)
    }

    /// Create a parser with a custom policy for recoverable errors.
    pub fn with_handler(options: ParserOptions, handler: impl ErrorHandler + 'static) -> Self {
        Self {
            input: InputBuffer::new(),
            end_of_input: false,
            line: 1,
            column: 1,
            state: ParseState::Start,
            lex_state: LexState::Default,
            scratch: Vec::new(),
            number: String::new(),
            unicode_escape: UnicodeEscapeBuffer::new(),
            high_surrogate: None,
            expected_literal: ExpectedLiteralBuffer::none(),
            frames: Vec::new(),
            after_comma: false,
            values_completed: 0,
            truncated: false,
            more: true,
            options,
            handler: BoxedHandler::new(handler),
        }
    }

    /// The options this parser was built with.
    #[must_use]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Current nesting depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Ask the error policy whether `err` may be skipped.
    fn recover(&mut self, err: SyntaxError) -> Result<(), ErrorCode> {
        debug_assert_eq!(err.severity(), Severity::Recoverable);
        let location = self.location();
        if self.handler.0.on_error(&err, location) {
            tracing::warn!(%err, %location, "recovered from syntax error");
            Ok(())
        } else {
            Err(err.into())
        }
    }

    fn emit(&mut self, visitor: &mut dyn Visitor, event: Event) -> Result<(), ErrorCode> {
        let location = self.location();
        self.more = visitor.visit(event, location)?;
        Ok(())
    }

    /// State to enter once a value has been completed.
    fn after_value(&mut self) -> ParseState {
        match self.frames.last() {
            None => {
                self.values_completed += 1;
                ParseState::Accept
            }
            Some(Frame::Object) => ParseState::AfterPropertyValue,
            Some(Frame::Array) => ParseState::AfterArrayValue,
        }
    }

    fn open(&mut self, frame: Frame) -> Result<(), ErrorCode> {
        if self.frames.len() >= self.options.max_nesting_depth {
            return Err(SyntaxError::MaxNestingDepthExceeded(self.options.max_nesting_depth).into());
        }
        self.frames.push(frame);
        self.after_comma = false;
        self.state = match frame {
            Frame::Object => ParseState::BeforePropertyName,
            Frame::Array => ParseState::BeforeArrayValue,
        };
        Ok(())
    }

    fn close(&mut self, visitor: &mut dyn Visitor) -> Result<(), ErrorCode> {
        if self.after_comma {
            self.recover(SyntaxError::TrailingComma)?;
        }
        self.after_comma = false;
        let frame = self.frames.pop();
        self.state = self.after_value();
        let event = match frame {
            Some(Frame::Object) => Event::EndObject,
            _ => Event::EndArray,
        };
        self.emit(visitor, event)
    }

    /// Handle a token in a position where a value is expected.
    fn value(
        &mut self,
        token: Token,
        visitor: &mut dyn Visitor,
        expected: SyntaxError,
    ) -> Result<(), ErrorCode> {
        self.after_comma = false;
        match token {
            Token::Punct(b'{') => {
                self.open(Frame::Object)?;
                self.emit(visitor, Event::BeginObject)
            }
            Token::Punct(b'[') => {
                self.open(Frame::Array)?;
                self.emit(visitor, Event::BeginArray)
            }
            Token::Scalar(event) => {
                self.state = self.after_value();
                self.emit(visitor, event)
            }
            Token::String(s) => {
                self.state = self.after_value();
                self.emit(visitor, Event::String(s))
            }
            Token::Punct(_) | Token::Eof => Err(expected.into()),
        }
    }

    fn dispatch(&mut self, token: Token, visitor: &mut dyn Visitor) -> Result<(), ErrorCode> {
        use ParseState::*;

        if matches!(token, Token::Eof) {
            tracing::debug!(state = ?self.state, "end of input");
            if self.state != Start {
                self.truncated = true;
            }
            self.state = Done;
            return Ok(());
        }

        match self.state {
            Start | BeforePropertyValue => self.value(token, visitor, SyntaxError::ExpectedValue),

            BeforeArrayValue => match token {
                Token::Punct(b']') => self.close(visitor),
                token => self.value(token, visitor, SyntaxError::ExpectedValue),
            },

            BeforePropertyName => match token {
                Token::String(key) => {
                    self.after_comma = false;
                    self.state = AfterPropertyName;
                    self.emit(visitor, Event::Key(key))
                }
                Token::Punct(b'}') => self.close(visitor),
                _ => Err(SyntaxError::ExpectedKey.into()),
            },

            AfterPropertyName => match token {
                Token::Punct(b':') => {
                    self.state = BeforePropertyValue;
                    Ok(())
                }
                _ => Err(SyntaxError::ExpectedColon.into()),
            },

            AfterPropertyValue => match token {
                Token::Punct(b',') => {
                    self.after_comma = true;
                    self.state = BeforePropertyName;
                    Ok(())
                }
                Token::Punct(b'}') => self.close(visitor),
                _ => Err(SyntaxError::ExpectedCommaOrBrace.into()),
            },

            AfterArrayValue => match token {
                Token::Punct(b',') => {
                    self.after_comma = true;
                    self.state = BeforeArrayValue;
                    Ok(())
                }
                Token::Punct(b']') => self.close(visitor),
                _ => Err(SyntaxError::ExpectedCommaOrBracket.into()),
            },

            Accept | Done | Error => Ok(()),
        }
    }

    fn parse_inner(&mut self, visitor: &mut dyn Visitor) -> Result<(), ErrorCode> {
        while self.more {
            match self.state {
                ParseState::Done | ParseState::Error => return Ok(()),
                ParseState::Accept if self.options.allow_multiple_values => {
                    self.state = ParseState::Start;
                }
                ParseState::Accept => {
                    self.state = ParseState::Done;
                    return Ok(());
                }
                _ => {}
            }
            let Some(token) = self.lex()? else {
                return Ok(());
            };
            self.dispatch(token, visitor)?;
        }
        Ok(())
    }
}

impl IncrementalParser for JsonParser {
    fn feed(&mut self, bytes: &[u8]) {
        self.input.push(bytes);
    }

    fn finish_input(&mut self) {
        self.end_of_input = true;
    }

    fn needs_more_input(&self) -> bool {
        self.input.is_empty()
            && !self.end_of_input
            && !matches!(
                self.state,
                ParseState::Accept | ParseState::Done | ParseState::Error
            )
    }

    fn is_finished(&self) -> bool {
        matches!(self.state, ParseState::Done | ParseState::Error)
    }

    fn has_stopped(&self) -> bool {
        !self.more || self.is_finished()
    }

    fn restart(&mut self) {
        self.more = true;
    }

    fn parse_some(&mut self, visitor: &mut dyn Visitor) -> Result<(), ErrorCode> {
        self.parse_inner(visitor).inspect_err(|err| {
            tracing::debug!(%err, line = self.line, column = self.column, "parse failed");
            self.state = ParseState::Error;
            self.input.clear();
        })
    }

    fn verify_complete(&mut self) -> Result<(), ErrorCode> {
        if self.state == ParseState::Error {
            return Ok(());
        }
        match self.skip_trivia()? {
            lexer::Peeked::Empty => Ok(()),
            lexer::Peeked::EndOfInput if self.values_completed > 0 && !self.truncated => Ok(()),
            lexer::Peeked::EndOfInput => Err(ErrorCode::Incomplete),
            lexer::Peeked::Byte(_) => Err(SyntaxError::ExtraCharacter(self.peek_char()).into()),
        }
    }

    fn line(&self) -> usize {
        self.line
    }

    fn column(&self) -> usize {
        self.column
    }
}
