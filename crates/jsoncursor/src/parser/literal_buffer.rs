use crate::event::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExpectedLiteralValue {
    Null,
    True,
    False,
}

/// What happened after feeding one more byte into the literal matcher?
pub(crate) enum Step {
    /// Byte matched, but the literal is not finished yet.
    NeedMore,
    /// Byte matched *and* it was the last byte of the literal.
    Done(Event),
    /// Byte did **not** match the expected byte.
    Reject,
}

/// `None`  ➜  we are **not** in the middle of a literal
/// `Some`  ➜  `(remaining_bytes, literal_kind)` while matching
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct ExpectedLiteralBuffer(Option<(&'static [u8], ExpectedLiteralValue)>);

impl ExpectedLiteralBuffer {
    /// No literal is in flight
    pub(crate) fn none() -> Self {
        ExpectedLiteralBuffer(None)
    }

    /// Start matching after the *first* byte (`n`, `t`, or `f`)
    pub(crate) fn new(first: u8) -> Self {
        match first {
            b'n' => ExpectedLiteralBuffer(Some((b"ull", ExpectedLiteralValue::Null))),
            b't' => ExpectedLiteralBuffer(Some((b"rue", ExpectedLiteralValue::True))),
            b'f' => ExpectedLiteralBuffer(Some((b"alse", ExpectedLiteralValue::False))),
            _ => ExpectedLiteralBuffer::none(),
        }
    }

    /// Give the matcher the next input byte and learn what to do next.
    pub(crate) fn step(&mut self, b: u8) -> Step {
        let Some((bytes, kind)) = self.0.take() else {
            return Step::Reject;
        };

        match bytes.split_first() {
            Some((expected, rest)) if *expected == b => {
                if rest.is_empty() {
                    Step::Done(match kind {
                        ExpectedLiteralValue::Null => Event::Null,
                        ExpectedLiteralValue::True => Event::Bool(true),
                        ExpectedLiteralValue::False => Event::Bool(false),
                    })
                } else {
                    self.0 = Some((rest, kind));
                    Step::NeedMore
                }
            }
            _ => {
                // Mismatch: restore the state we took at the top
                self.0 = Some((bytes, kind));
                Step::Reject
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(first: u8, rest: &[u8]) -> Option<Event> {
        let mut lit = ExpectedLiteralBuffer::new(first);
        for &b in rest {
            match lit.step(b) {
                Step::NeedMore => {}
                Step::Done(ev) => return Some(ev),
                Step::Reject => return None,
            }
        }
        None
    }

    #[test]
    fn matches_literals() {
        assert_eq!(run(b't', b"rue"), Some(Event::Bool(true)));
        assert_eq!(run(b'f', b"alse"), Some(Event::Bool(false)));
        assert_eq!(run(b'n', b"ull"), Some(Event::Null));
    }

    #[test]
    fn rejects_mismatch_and_keeps_state() {
        let mut lit = ExpectedLiteralBuffer::new(b't');
        assert!(matches!(lit.step(b'r'), Step::NeedMore));
        assert!(matches!(lit.step(b'x'), Step::Reject));
        assert!(matches!(lit.step(b'u'), Step::NeedMore));
        assert!(matches!(ExpectedLiteralBuffer::none().step(b'a'), Step::Reject));
    }
}
