use alloc::{string::String, vec::Vec};

use crate::{
    ChunkedSource, Cursor, CursorError, CursorOptions, DefaultErrorHandler, Event, EventCursor,
    Location, Number, SliceSource, Source,
};

/// Drain `cursor`, stopping at the first failure.
pub fn collect<C: EventCursor>(cursor: &mut C) -> Result<Vec<Event>, CursorError> {
    cursor.events().collect()
}

/// Drain `cursor`, keeping the location reported with each event.
pub fn collect_located<C: EventCursor>(
    cursor: &mut C,
) -> Result<Vec<(Event, Location)>, CursorError> {
    let mut out = Vec::new();
    while !cursor.done() {
        out.push((cursor.current().clone(), cursor.location()));
        cursor.next()?;
    }
    match cursor.error() {
        Some(err) => Err(err.clone()),
        None => Ok(out),
    }
}

/// All events of a contiguous payload, followed by `check_done`.
pub fn view_events(payload: &[u8]) -> Result<Vec<Event>, CursorError> {
    let mut cursor = Cursor::from_contiguous_view(payload)?;
    let events = collect(&mut cursor)?;
    cursor.check_done()?;
    Ok(events)
}

/// All events of a chunked payload, followed by `check_done`.
pub fn chunked_events<C: AsRef<[u8]>>(
    chunks: &[C],
    options: CursorOptions,
) -> Result<Vec<Event>, CursorError> {
    let source = ChunkedSource::new(chunks.iter().map(AsRef::<[u8]>::as_ref));
    let mut cursor = Cursor::from_chunked_source_with(source, options, DefaultErrorHandler)?;
    let events = collect(&mut cursor)?;
    cursor.check_done()?;
    Ok(events)
}

pub fn s(value: &str) -> Event {
    Event::String(String::from(value))
}

pub fn key(value: &str) -> Event {
    Event::Key(String::from(value))
}

pub fn uint(value: u64) -> Event {
    Event::Number(Number::Uint(value))
}

/// A slice source that records the size of every read request.
#[derive(Debug)]
pub struct Recording<'a> {
    inner: SliceSource<'a>,
    pub requests: Vec<usize>,
}

impl<'a> Recording<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            inner: SliceSource::new(data),
            requests: Vec::new(),
        }
    }
}

impl Source for Recording<'_> {
    fn read(&mut self, buf: &mut [u8]) -> usize {
        self.requests.push(buf.len());
        self.inner.read(buf)
    }

    fn is_eof(&self) -> bool {
        self.inner.is_eof()
    }

    fn is_error(&self) -> bool {
        self.inner.is_error()
    }
}

/// Rebuild a `serde_json::Value` from a balanced event sequence.
pub fn build_value(events: &[Event]) -> Option<serde_json::Value> {
    use serde_json::{Map, Value};

    enum Open {
        Array(Vec<Value>),
        Object(Map<String, Value>, Option<String>),
    }

    fn place(stack: &mut Vec<Open>, root: &mut Option<Value>, value: Value) -> Option<()> {
        match stack.last_mut() {
            None => *root = Some(value),
            Some(Open::Array(items)) => items.push(value),
            Some(Open::Object(map, pending)) => {
                map.insert(pending.take()?, value);
            }
        }
        Some(())
    }

    let mut stack = Vec::new();
    let mut root = None;
    for event in events {
        let value = match event {
            Event::BeginArray => {
                stack.push(Open::Array(Vec::new()));
                continue;
            }
            Event::BeginObject => {
                stack.push(Open::Object(Map::new(), None));
                continue;
            }
            Event::Key(k) => {
                if let Some(Open::Object(_, pending)) = stack.last_mut() {
                    *pending = Some(k.clone());
                }
                continue;
            }
            Event::EndArray | Event::EndObject => match stack.pop()? {
                Open::Array(items) => Value::Array(items),
                Open::Object(map, _) => Value::Object(map),
            },
            Event::Null => Value::Null,
            Event::Bool(b) => Value::Bool(*b),
            Event::String(text) => Value::String(text.clone()),
            Event::Number(Number::Uint(n)) => Value::from(*n),
            Event::Number(Number::Int(n)) => Value::from(*n),
            Event::Number(Number::Float(f)) => Value::from(*f),
            Event::Number(Number::Text(_)) | Event::Binary(_) | Event::EndOfInput => {
                return None;
            }
        };
        place(&mut stack, &mut root, value)?;
    }
    root
}
