//! Byte-level lexer for [`JsonParser`].
//!
//! The lexer keeps its position inside the current token in [`LexState`], so
//! it can stop at any byte when the input runs dry and pick up where it left
//! off after the next feed.
use alloc::string::String;
use core::mem;

use super::{
    JsonParser,
    input::is_continuation,
    literal_buffer::{ExpectedLiteralBuffer, Step},
    number::{self, NumberState},
};
use crate::{
    error::{ErrorCode, SyntaxError},
    event::Event,
};

#[derive(Debug)]
pub(super) enum Token {
    /// One of `{` `}` `[` `]` `:` `,`
    Punct(u8),
    String(String),
    /// Numbers, booleans and null.
    Scalar(Event),
    Eof,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum LexState {
    Default,
    Slash,
    LineComment,
    BlockComment,
    BlockCommentStar,
    Literal,
    Number(NumberState),
    String,
    StringEscape,
    StringEscapeUnicode,
}

impl LexState {
    /// Between tokens, possibly inside a comment.
    fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::Default
                | Self::Slash
                | Self::LineComment
                | Self::BlockComment
                | Self::BlockCommentStar
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Represents a peeked byte from the input buffer.
pub(super) enum Peeked {
    /// The buffer is empty, more input may follow.
    Empty,
    /// Some byte.
    Byte(u8),
    /// End of input, the input stream is closed.
    EndOfInput,
}

use Peeked::*;

impl JsonParser {
    /// A multi-byte character cut by the end of a read counts as no input
    /// until the rest of it arrives or the input ends.
    #[inline]
    fn peek(&self) -> Peeked {
        match self.input.peek() {
            Some(0xC0..) if !self.end_of_input && self.input.starts_with_partial_char() => Empty,
            Some(b) => Byte(b),
            None if self.end_of_input => EndOfInput,
            None => Empty,
        }
    }

    #[inline]
    fn advance(&mut self) {
        if let Some(b) = self.input.next() {
            if b == b'\n' {
                self.line += 1;
                self.column = 1;
            } else if !is_continuation(b) {
                self.column += 1;
            }
        }
    }

    /// The character at the front of the pending input, for diagnostics.
    pub(super) fn peek_char(&self) -> char {
        let (ch, _) = bstr::decode_utf8(self.input.rest());
        ch.unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    fn invalid_char(&self) -> ErrorCode {
        SyntaxError::InvalidCharacter(self.peek_char()).into()
    }

    /// Skip whitespace and comments.
    ///
    /// Returns the first significant peeked byte without consuming it.
    pub(super) fn skip_trivia(&mut self) -> Result<Peeked, ErrorCode> {
        use LexState::*;

        loop {
            let peeked = self.peek();
            match (self.lex_state, peeked) {
                (_, Empty) => return Ok(Empty),

                (Default, Byte(b' ' | b'\t' | b'\n' | b'\r')) => self.advance(),
                (Default, Byte(b'/')) => {
                    self.advance();
                    self.lex_state = Slash;
                }

                (Slash, Byte(b'/')) => {
                    self.recover(SyntaxError::IllegalComment)?;
                    self.advance();
                    self.lex_state = LineComment;
                }
                (Slash, Byte(b'*')) => {
                    self.recover(SyntaxError::IllegalComment)?;
                    self.advance();
                    self.lex_state = BlockComment;
                }
                (Slash, _) => return Err(SyntaxError::InvalidCharacter('/').into()),

                (LineComment, Byte(b'\n')) => {
                    self.advance();
                    self.lex_state = Default;
                }
                (LineComment, EndOfInput) => self.lex_state = Default,

                (BlockComment, Byte(b'*')) | (BlockCommentStar, Byte(b'*')) => {
                    self.advance();
                    self.lex_state = BlockCommentStar;
                }
                (BlockCommentStar, Byte(b'/')) => {
                    self.advance();
                    self.lex_state = Default;
                }
                (BlockCommentStar, Byte(_)) => {
                    self.advance();
                    self.lex_state = BlockComment;
                }
                (LineComment | BlockComment, Byte(_)) => self.advance(),
                (BlockComment | BlockCommentStar, EndOfInput) => {
                    self.lex_state = Default;
                    self.truncated = true;
                    return Ok(EndOfInput);
                }

                (_, peeked) => return Ok(peeked),
            }
        }
    }

    /// Produce the next token.
    ///
    /// `Ok(None)` means the pending input ran out inside or before a token.
    pub(super) fn lex(&mut self) -> Result<Option<Token>, ErrorCode> {
        loop {
            let step = if self.lex_state.is_trivia() {
                match self.skip_trivia()? {
                    Empty => return Ok(None),
                    EndOfInput => return Ok(Some(Token::Eof)),
                    Byte(b) => self.start_token(b)?,
                }
            } else {
                match self.peek() {
                    Empty => return Ok(None),
                    EndOfInput => Some(self.end_inside_token()),
                    Byte(b) => match self.lex_state {
                        LexState::Literal => self.lex_literal(b)?,
                        LexState::Number(state) => self.lex_number(state, b)?,
                        LexState::String => self.lex_string(b)?,
                        LexState::StringEscape => self.lex_escape(b)?,
                        LexState::StringEscapeUnicode => self.lex_unicode_escape(b)?,
                        _ => None,
                    },
                }
            };
            if let Some(token) = step {
                return Ok(Some(token));
            }
        }
    }

    fn start_token(&mut self, b: u8) -> Result<Option<Token>, ErrorCode> {
        let state = match b {
            b'{' | b'}' | b'[' | b']' | b':' | b',' => {
                self.advance();
                return Ok(Some(Token::Punct(b)));
            }
            b'"' => {
                self.scratch.clear();
                self.high_surrogate = None;
                LexState::String
            }
            b't' | b'f' | b'n' => {
                self.expected_literal = ExpectedLiteralBuffer::new(b);
                LexState::Literal
            }
            b'-' | b'0'..=b'9' => {
                self.number.clear();
                self.number.push(char::from(b));
                LexState::Number(match b {
                    b'-' => NumberState::Sign,
                    b'0' => NumberState::Zero,
                    _ => NumberState::Integer,
                })
            }
            _ => return Err(self.invalid_char()),
        };
        self.advance();
        self.lex_state = state;
        Ok(None)
    }

    /// End of input arrived before the current token was complete.
    fn end_inside_token(&mut self) -> Token {
        let state = mem::replace(&mut self.lex_state, LexState::Default);
        match state {
            LexState::Number(ns) if ns.is_terminal() => self.finish_number(ns),
            _ => {
                self.truncated = true;
                Token::Eof
            }
        }
    }

    fn lex_literal(&mut self, b: u8) -> Result<Option<Token>, ErrorCode> {
        match self.expected_literal.step(b) {
            Step::NeedMore => {
                self.advance();
                Ok(None)
            }
            Step::Done(event) => {
                self.advance();
                self.lex_state = LexState::Default;
                Ok(Some(Token::Scalar(event)))
            }
            Step::Reject => Err(self.invalid_char()),
        }
    }

    fn lex_number(&mut self, state: NumberState, b: u8) -> Result<Option<Token>, ErrorCode> {
        use NumberState::*;

        let next = match (state, b) {
            (Sign, b'0') => Zero,
            (Sign, b'1'..=b'9') => Integer,
            (Zero, b'0'..=b'9') => return Err(SyntaxError::LeadingZero.into()),
            (Zero | Integer, b'.') => Point,
            (Zero | Integer | Fraction, b'e' | b'E') => Exponent,
            (Integer, b'0'..=b'9') => Integer,
            (Point | Fraction, b'0'..=b'9') => Fraction,
            (Exponent, b'+' | b'-') => ExponentSign,
            (Exponent | ExponentSign | ExponentDigits, b'0'..=b'9') => ExponentDigits,
            (state, _) if state.is_terminal() => {
                self.lex_state = LexState::Default;
                return Ok(Some(self.finish_number(state)));
            }
            _ => return Err(self.invalid_char()),
        };
        self.number.push(char::from(b));
        self.advance();
        if matches!(next, Integer | Fraction | ExponentDigits) {
            while let Some(d @ b'0'..=b'9') = self.input.peek() {
                self.number.push(char::from(d));
                self.input.next();
                self.column += 1;
            }
        }
        self.lex_state = LexState::Number(next);
        Ok(None)
    }

    fn finish_number(&mut self, state: NumberState) -> Token {
        let text = mem::take(&mut self.number);
        let number = number::to_number(text, state.is_float(), self.options.lossless_number);
        Token::Scalar(Event::Number(number))
    }

    fn lex_string(&mut self, b: u8) -> Result<Option<Token>, ErrorCode> {
        if let Some(high) = self.high_surrogate.filter(|_| b != b'\\') {
            return Err(SyntaxError::IllegalSurrogate(u32::from(high)).into());
        }
        match b {
            b'"' => {
                self.advance();
                self.lex_state = LexState::Default;
                let bytes = mem::take(&mut self.scratch);
                let value = String::from_utf8(bytes).map_err(|_| SyntaxError::InvalidUtf8)?;
                Ok(Some(Token::String(value)))
            }
            b'\\' => {
                self.advance();
                self.lex_state = LexState::StringEscape;
                Ok(None)
            }
            0x00..=0x1F => {
                self.recover(SyntaxError::UnescapedControlCharacter(b))?;
                self.scratch.push(b);
                self.advance();
                Ok(None)
            }
            _ => {
                // Fast path: the run cannot contain a newline, so only the
                // column moves.
                let copied = self
                    .input
                    .copy_while(&mut self.scratch, |c| c != b'"' && c != b'\\' && c >= 0x20);
                self.column += copied;
                Ok(None)
            }
        }
    }

    fn lex_escape(&mut self, b: u8) -> Result<Option<Token>, ErrorCode> {
        if let Some(high) = self.high_surrogate.filter(|_| b != b'u') {
            return Err(SyntaxError::IllegalSurrogate(u32::from(high)).into());
        }
        let unescaped = match b {
            b'"' | b'\\' | b'/' => b,
            b'b' => 0x08,
            b'f' => 0x0C,
            b'n' => b'\n',
            b'r' => b'\r',
            b't' => b'\t',
            b'u' => {
                self.advance();
                self.unicode_escape.reset();
                self.lex_state = LexState::StringEscapeUnicode;
                return Ok(None);
            }
            _ => return Err(SyntaxError::InvalidEscape(self.peek_char()).into()),
        };
        self.advance();
        self.scratch.push(unescaped);
        self.lex_state = LexState::String;
        Ok(None)
    }

    fn lex_unicode_escape(&mut self, b: u8) -> Result<Option<Token>, ErrorCode> {
        let Ok(unit) = self.unicode_escape.feed(b) else {
            return Err(SyntaxError::InvalidUnicodeEscapeChar(self.peek_char()).into());
        };
        self.advance();
        if let Some(unit) = unit {
            self.push_code_unit(unit)?;
            self.lex_state = LexState::String;
        }
        Ok(None)
    }

    /// Append one decoded UTF-16 code unit, pairing surrogates.
    fn push_code_unit(&mut self, unit: u16) -> Result<(), ErrorCode> {
        let code = match (self.high_surrogate.take(), unit) {
            (None, 0xD800..=0xDBFF) => {
                self.high_surrogate = Some(unit);
                return Ok(());
            }
            (None, 0xDC00..=0xDFFF) => {
                return Err(SyntaxError::IllegalSurrogate(u32::from(unit)).into());
            }
            (None, _) => u32::from(unit),
            (Some(high), 0xDC00..=0xDFFF) => {
                0x10000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(unit) - 0xDC00)
            }
            (Some(high), _) => return Err(SyntaxError::IllegalSurrogate(u32::from(high)).into()),
        };
        let ch = char::from_u32(code).ok_or(SyntaxError::IllegalSurrogate(code))?;
        let mut buf = [0u8; 4];
        self.scratch.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
        Ok(())
    }
}
