use alloc::vec::Vec;

use super::utils::{collect, key, s, uint};
use crate::{ChunkedSource, Cursor, Event, EventCursor, Location, chunk_utils::produce_chunks};

const DOC: &str = r#"{"id": 7, "tags": ["a", "b"], "meta": {"id": 8}}"#;

#[test]
fn keeps_only_accepted_events() {
    let mut cursor = Cursor::from_contiguous_view(DOC.as_bytes()).unwrap();
    let mut keys = cursor
        .filter(|event: &Event, _| matches!(event, Event::Key(_)))
        .unwrap();
    assert_eq!(keys.current(), &key("id"));
    assert_eq!(
        collect(&mut keys).unwrap(),
        [key("id"), key("tags"), key("meta"), key("id")]
    );
    assert!(keys.done());
}

#[test]
fn filters_compose() {
    let source = ChunkedSource::new(produce_chunks(DOC, 7));
    let mut cursor = Cursor::from_chunked_source(source).unwrap();
    let mut scalars = cursor.filter(|event: &Event, _| event.is_scalar()).unwrap();
    let mut strings = scalars
        .filter(|event: &Event, _| matches!(event, Event::String(_)))
        .unwrap();
    assert_eq!(collect(&mut strings).unwrap(), [s("a"), s("b")]);
}

#[test]
fn no_match_leaves_view_done() {
    let mut cursor = Cursor::from_contiguous_view(DOC.as_bytes()).unwrap();
    let view = cursor.filter(|event: &Event, _| event == &Event::Null).unwrap();
    assert!(view.done());
    assert!(view.error().is_none());
    cursor.check_done().unwrap();
}

#[test]
fn predicate_sees_event_locations() {
    let mut cursor = Cursor::from_contiguous_view(b"[1,\n 2,\n 3]").unwrap();
    let mut lines = Vec::new();
    let mut second_line_on = cursor
        .filter(|event: &Event, location: Location| {
            lines.push(location.line);
            location.line >= 2 && event.is_scalar()
        })
        .unwrap();
    assert_eq!(collect(&mut second_line_on).unwrap(), [uint(2), uint(3)]);
    assert!(lines.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn underlying_cursor_resumes_after_view() {
    let mut cursor = Cursor::from_contiguous_view(DOC.as_bytes()).unwrap();
    let tags = cursor
        .filter(|event: &Event, _| event == &key("tags"))
        .unwrap();
    let cursor = tags.into_inner();
    cursor.next().unwrap();
    assert_eq!(cursor.current(), &Event::BeginArray);
    cursor.next().unwrap();
    assert_eq!(cursor.current(), &s("a"));
}

#[test]
fn errors_surface_through_the_view() {
    let mut cursor = Cursor::from_contiguous_view(b"[1, 2, x]").unwrap();
    let mut numbers = cursor
        .filter(|event: &Event, _| matches!(event, Event::Number(_)))
        .unwrap();
    assert_eq!(numbers.current(), &uint(1));
    numbers.next().unwrap();
    assert!(numbers.next().is_err());
    assert!(numbers.done());
    assert!(numbers.error().is_some());
    assert!(collect(&mut numbers).is_err());
}
