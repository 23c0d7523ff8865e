#![no_main]

use arbitrary::Arbitrary;
use jsoncursor::{
    ChunkedSource, Cursor, CursorOptions, DefaultErrorHandler, ErrorCode, Event, EventCursor,
    StrictErrorHandler, chunk_utils::split_at_offsets,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    data: &'a [u8],
    cuts: Vec<usize>,
    buffer_length: u8,
    strict: bool,
}

/// Events up to the first failure, and the failure (including `check_done`).
fn drain<C: EventCursor>(cursor: &mut C) -> (Vec<Event>, Option<ErrorCode>) {
    let mut events = Vec::new();
    while !cursor.done() {
        events.push(cursor.current().clone());
        if cursor.next().is_err() {
            break;
        }
    }
    (events, cursor.error().map(|err| err.code.clone()))
}

fn finish<S: jsoncursor::Source>(mut cursor: Cursor<S>) -> (Vec<Event>, Option<ErrorCode>) {
    let (events, error) = drain(&mut cursor);
    match error {
        Some(code) => (events, Some(code)),
        None => (events, cursor.check_done().err().map(|err| err.code)),
    }
}

fuzz_target!(|input: Input<'_>| {
    let options = CursorOptions {
        buffer_length: usize::from(input.buffer_length).max(1),
        ..CursorOptions::default()
    };

    let (view, chunked) = if input.strict {
        let view = Cursor::open_contiguous_view_with(input.data, options, StrictErrorHandler);
        let source = ChunkedSource::new(split_at_offsets(input.data, &input.cuts));
        let chunked = Cursor::open_chunked_source_with(source, options, StrictErrorHandler);
        (view, chunked)
    } else {
        let view = Cursor::open_contiguous_view_with(input.data, options, DefaultErrorHandler);
        let source = ChunkedSource::new(split_at_offsets(input.data, &input.cuts));
        let chunked = Cursor::open_chunked_source_with(source, options, DefaultErrorHandler);
        (view, chunked)
    };

    let view = finish(view);
    let chunked = finish(chunked);
    assert_eq!(view, chunked, "chunking changed the outcome");

    if input.strict && serde_json::from_slice::<serde_json::Value>(input.data).is_ok() {
        assert_eq!(view.1, None, "rejected a document serde_json accepts");
    }
});
