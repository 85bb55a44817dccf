#![expect(missing_docs)]

use core::fmt::Write;

use smalljson::{ChunkFeed, Origin, Reassembler, TokenKind};

fn render(chunks: &[&[u8]], scratch_capacity: usize) -> String {
    let mut scratch = vec![0u8; scratch_capacity];
    let mut tokens = Reassembler::new(ChunkFeed::new(chunks), &mut scratch);
    let mut out = String::new();
    loop {
        let token = tokens.next_token();
        if token.kind == TokenKind::OutOfData {
            return out;
        }
        let text = String::from_utf8_lossy(tokens.bytes(&token));
        let origin = match token.origin {
            Origin::Window => "window",
            Origin::Scratch => "scratch",
        };
        let truncated = if token.truncated { ", truncated" } else { "" };
        let partial = if token.partial { ", partial" } else { "" };
        writeln!(out, "{}: {text:?} ({origin}{truncated}{partial})", token.kind).unwrap();
        if token.kind == TokenKind::ParseError {
            return out;
        }
    }
}

#[test]
fn snapshot_split_document() {
    let chunks: [&[u8]; 5] = [
        br#"{"name":"Cop"#,
        br#"enhagen","tags":[tr"#,
        br#"ue,null,-1"#,
        br#"2],"e":"a\u00"#,
        br#"e6"}"#,
    ];
    insta::assert_snapshot!(render(&chunks, 8), @r#"
    start of object: "{" (window)
    string: "name" (window)
    string: "Copenha" (scratch, truncated)
    string: "tags" (window)
    start of array: "[" (window)
    true: "true" (scratch)
    null: "null" (window)
    number: "-12" (scratch)
    end of array: "]" (window)
    string: "e" (window)
    string: "a\\u00e6" (scratch)
    end of object: "}" (window)
    "#);
}

#[test]
fn snapshot_permissive_grammar() {
    let chunks: [&[u8]; 2] = [br#"{"a" tru, "b": [fals}, "c" nil]"#, b" 17"];
    insta::assert_snapshot!(render(&chunks, 16), @r#"
    start of object: "{" (window)
    string: "a" (window)
    true: "tru" (window)
    string: "b" (window)
    start of array: "[" (window)
    false: "fals" (window)
    end of object: "}" (window)
    string: "c" (window)
    null: "nil" (window)
    end of array: "]" (window)
    number: "17" (scratch, partial)
    "#);
}

#[test]
fn snapshot_stops_at_control_byte() {
    let chunks: [&[u8]; 2] = [b"[\"ok\", \"bad\x01", b"\"]"];
    insta::assert_snapshot!(render(&chunks, 16), @r#"
    start of array: "[" (window)
    string: "ok" (window)
    parse error: "\u{1}" (window)
    "#);
}
