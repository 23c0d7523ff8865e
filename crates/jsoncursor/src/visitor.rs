//! Event sinks.
//!
//! A [`Visitor`] receives events from an [`IncrementalParser`] one at a time
//! and decides whether the parser should keep going. The cursor drives the
//! parser with a single-slot cache so that exactly one event is produced per
//! advance; [`Cursor::read_to`] swaps in a forwarding sink instead.
//!
//! [`IncrementalParser`]: crate::IncrementalParser
//! [`Cursor::read_to`]: crate::Cursor::read_to
use alloc::vec::Vec;

use crate::{
    error::VisitError,
    event::{Event, Location},
};

/// Receives parse events.
pub trait Visitor {
    /// Accept one event.
    ///
    /// Return `Ok(true)` to keep receiving, `Ok(false)` to make the parser
    /// stop after this event.
    ///
    /// # Errors
    ///
    /// A returned error aborts parsing and is reported as
    /// [`ErrorCode::Visit`](crate::ErrorCode::Visit).
    fn visit(&mut self, event: Event, location: Location) -> Result<bool, VisitError>;
}

impl<F> Visitor for F
where
    F: FnMut(Event, Location) -> Result<bool, VisitError>,
{
    fn visit(&mut self, event: Event, location: Location) -> Result<bool, VisitError> {
        self(event, location)
    }
}

/// Collects every event.
impl Visitor for Vec<Event> {
    fn visit(&mut self, event: Event, _location: Location) -> Result<bool, VisitError> {
        self.push(event);
        Ok(true)
    }
}

/// Holds the single most recent event.
///
/// Always asks the parser to stop, which is what bounds each cursor advance
/// to one event.
#[derive(Debug, Default, Clone)]
pub(crate) struct EventCache {
    event: Event,
    location: Location,
}

impl EventCache {
    pub(crate) fn event(&self) -> &Event {
        &self.event
    }

    pub(crate) fn location(&self) -> Location {
        self.location
    }

    pub(crate) fn set(&mut self, event: Event, location: Location) {
        self.event = event;
        self.location = location;
    }
}

impl Visitor for EventCache {
    fn visit(&mut self, event: Event, location: Location) -> Result<bool, VisitError> {
        self.set(event, location);
        Ok(false)
    }
}

/// Passes events through to another visitor until the subtree it started in
/// is closed.
///
/// `depth` counts open begin events seen so far. Once it drops back to zero
/// the forwarder asks the parser to stop.
pub(crate) struct Forwarder<'v> {
    target: &'v mut dyn Visitor,
    depth: usize,
    last: Option<(Event, Location)>,
}

impl<'v> Forwarder<'v> {
    pub(crate) fn new(target: &'v mut dyn Visitor, depth: usize) -> Self {
        Self {
            target,
            depth,
            last: None,
        }
    }

    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    /// Send one event to the target, tracking nesting.
    ///
    /// Returns `true` while the subtree is still open and the target wants
    /// more.
    pub(crate) fn forward(&mut self, event: Event, location: Location) -> Result<bool, VisitError> {
        if event.is_begin() {
            self.depth += 1;
        } else if event.is_end() {
            self.depth = self.depth.saturating_sub(1);
        }
        let balanced = self.depth == 0;
        self.last = Some((event.clone(), location));
        let more = self.target.visit(event, location)?;
        Ok(more && !balanced)
    }

    /// The last event handed to the target.
    pub(crate) fn into_last(self) -> Option<(Event, Location)> {
        self.last
    }
}

impl Visitor for Forwarder<'_> {
    fn visit(&mut self, event: Event, location: Location) -> Result<bool, VisitError> {
        self.forward(event, location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_keeps_latest_and_stops() {
        let mut cache = EventCache::default();
        assert_eq!(cache.event(), &Event::EndOfInput);
        assert!(!cache.visit(Event::Null, Location::new(1, 5)).unwrap());
        assert_eq!(cache.event(), &Event::Null);
        assert_eq!(cache.location(), Location::new(1, 5));
    }

    #[test]
    fn forwarder_stops_when_balanced() {
        let mut sink: Vec<Event> = Vec::new();
        let mut fwd = Forwarder::new(&mut sink, 0);
        let loc = Location::default();
        assert!(fwd.forward(Event::BeginArray, loc).unwrap());
        assert!(fwd.forward(Event::BeginObject, loc).unwrap());
        assert!(fwd.forward(Event::EndObject, loc).unwrap());
        assert!(!fwd.forward(Event::EndArray, loc).unwrap());
        assert_eq!(fwd.depth(), 0);
        assert_eq!(fwd.into_last().map(|(e, _)| e), Some(Event::EndArray));
        assert_eq!(sink.len(), 4);
    }

    #[test]
    fn forwarder_stops_after_single_scalar() {
        let mut sink: Vec<Event> = Vec::new();
        let mut fwd = Forwarder::new(&mut sink, 0);
        assert!(!fwd.forward(Event::Bool(true), Location::default()).unwrap());
    }

    #[test]
    fn forwarder_honours_target_refusal() {
        let mut seen = 0;
        let mut target = |_: Event, _: Location| -> Result<bool, VisitError> {
            seen += 1;
            Ok(false)
        };
        let mut fwd = Forwarder::new(&mut target, 0);
        assert!(!fwd.forward(Event::BeginArray, Location::default()).unwrap());
        assert_eq!(fwd.depth(), 1);
        assert_eq!(seen, 1);
    }

    #[test]
    fn closure_errors_propagate() {
        let mut target =
            |_: Event, _: Location| -> Result<bool, VisitError> { Err(VisitError::new("full")) };
        assert_eq!(
            target.visit(Event::Null, Location::default()),
            Err(VisitError::new("full"))
        );
    }
}
