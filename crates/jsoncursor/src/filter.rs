//! Filtered views over a cursor.
//!
//! A [`FilterView`] skips events its predicate rejects. Views nest, so a
//! filter can be applied to another filter.
use crate::{
    cursor::EventCursor,
    error::CursorError,
    event::{Event, Location},
};

/// A cursor that only stops on events accepted by a predicate.
///
/// Created by [`EventCursor::filter`]. The view borrows the underlying
/// cursor, so advancing the view advances the cursor.
///
/// ```rust
/// use jsoncursor::{Cursor, Event, EventCursor};
///
/// let mut cursor = Cursor::from_contiguous_view(br#"{"a": 1, "b": [true]}"#).unwrap();
/// let keys: Vec<Event> = cursor
///     .filter(|event: &Event, _| matches!(event, Event::Key(_)))
///     .unwrap()
///     .events()
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(keys, [Event::Key("a".into()), Event::Key("b".into())]);
/// ```
#[derive(Debug)]
pub struct FilterView<'c, C, F> {
    cursor: &'c mut C,
    predicate: F,
}

impl<'c, C, F> FilterView<'c, C, F>
where
    C: EventCursor,
    F: FnMut(&Event, Location) -> bool,
{
    pub(crate) fn new(cursor: &'c mut C, predicate: F) -> Result<Self, CursorError> {
        let mut view = Self { cursor, predicate };
        view.skip_rejected()?;
        Ok(view)
    }

    fn skip_rejected(&mut self) -> Result<(), CursorError> {
        while !self.cursor.done() && !(self.predicate)(self.cursor.current(), self.cursor.location())
        {
            self.cursor.next()?;
        }
        Ok(())
    }

    /// Release the underlying cursor.
    pub fn into_inner(self) -> &'c mut C {
        self.cursor
    }
}

impl<C, F> EventCursor for FilterView<'_, C, F>
where
    C: EventCursor,
    F: FnMut(&Event, Location) -> bool,
{
    fn done(&self) -> bool {
        self.cursor.done()
    }

    fn current(&self) -> &Event {
        self.cursor.current()
    }

    fn location(&self) -> Location {
        self.cursor.location()
    }

    fn error(&self) -> Option<&CursorError> {
        self.cursor.error()
    }

    fn next(&mut self) -> Result<(), CursorError> {
        if self.cursor.done() {
            return Ok(());
        }
        self.cursor.next()?;
        self.skip_rejected()
    }
}
