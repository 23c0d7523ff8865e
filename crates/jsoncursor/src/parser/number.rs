use alloc::string::String;

use crate::event::Number;

/// Lexer position inside a number token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NumberState {
    /// After `-`.
    Sign,
    /// A lone leading `0` (optionally after `-`).
    Zero,
    /// Integer digits.
    Integer,
    /// After `.`.
    Point,
    /// Fraction digits.
    Fraction,
    /// After `e` / `E`.
    Exponent,
    /// After the exponent sign.
    ExponentSign,
    /// Exponent digits.
    ExponentDigits,
}

impl NumberState {
    /// Whether the token could end here.
    pub(crate) fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Zero | Self::Integer | Self::Fraction | Self::ExponentDigits
        )
    }

    pub(crate) fn is_float(self) -> bool {
        matches!(self, Self::Fraction | Self::ExponentDigits)
    }
}

/// Convert the text of a complete number token.
///
/// Integers that overflow 64 bits and non-finite floats keep their text.
pub(crate) fn to_number(text: String, is_float: bool, lossless: bool) -> Number {
    if lossless {
        return Number::Text(text);
    }
    if is_float {
        return match text.parse::<f64>() {
            Ok(f) if f.is_finite() => Number::Float(f),
            _ => Number::Text(text),
        };
    }
    if text.starts_with('-') {
        match text.parse::<i64>() {
            Ok(n) => Number::Int(n),
            Err(_) => Number::Text(text),
        }
    } else {
        match text.parse::<u64>() {
            Ok(n) => Number::Uint(n),
            Err(_) => Number::Text(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("0", false, Number::Uint(0))]
    #[case("-7", false, Number::Int(-7))]
    #[case("18446744073709551615", false, Number::Uint(u64::MAX))]
    #[case("18446744073709551616", false, Number::Text("18446744073709551616".into()))]
    #[case("-9223372036854775809", false, Number::Text("-9223372036854775809".into()))]
    #[case("1.5", true, Number::Float(1.5))]
    #[case("2e3", true, Number::Float(2000.0))]
    #[case("1e400", true, Number::Text("1e400".into()))]
    fn converts(#[case] text: &str, #[case] is_float: bool, #[case] expected: Number) {
        assert_eq!(to_number(text.into(), is_float, false), expected);
    }

    #[test]
    fn lossless_keeps_text() {
        assert_eq!(
            to_number("1.50".into(), true, true),
            Number::Text("1.50".into())
        );
    }

    #[test]
    fn terminal_states() {
        assert!(NumberState::Zero.is_terminal());
        assert!(!NumberState::Point.is_terminal());
        assert!(!NumberState::ExponentSign.is_terminal());
        assert!(NumberState::ExponentDigits.is_float());
    }
}
