#![allow(missing_docs)]
#![allow(clippy::needless_raw_string_hashes)]

pub const DOCUMENT: &str = r#"{"tool":"search","args":{"query":"caf\u00e9","limit":10},"tags":["a",true,null],"score":-1.5}"#;

// A tool-call payload as it might arrive from a slow producer. Every cut
// lands inside a token.
#[rustfmt::skip]
pub const STREAM: [&str; 7] = [
    r#"{"tool":"sea"#,             // inside a string
    r#"rch","args":{"qu"#,         // inside a key
    r#"ery":"caf\u00"#,            // inside a unicode escape
    r#"e9","limit":1"#,            // inside a number
    r#"0},"tags":["a",tr"#,        // inside a literal
    r#"ue,null],"score":-1."#,     // inside a fraction
    r#"5}"#,
];

#[test]
fn stream_joins_to_document() {
    assert_eq!(STREAM.join(""), DOCUMENT);

    let value: serde_json::Value = serde_json::from_str(DOCUMENT).unwrap();
    assert_eq!(value["args"]["query"], "café");
}
