#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use serde_json::Value;
use smalljson::{
    ChunkFeed, Document, LookupOptions, Reassembler, TokenKind, TokenStream, WindowTokens,
    split_at,
};

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    doc: &'a [u8],
    splits: Vec<u16>,
    scratch: u8,
    path: &'a str,
}

fn drain<T: TokenStream>(stream: &mut T) -> Vec<(TokenKind, Vec<u8>)> {
    let mut out = Vec::new();
    loop {
        let token = stream.next_token();
        if token.kind == TokenKind::OutOfData {
            return out;
        }
        out.push((token.kind, stream.token_bytes(&token).to_vec()));
        if token.kind == TokenKind::ParseError {
            return out;
        }
    }
}

fuzz_target!(|input: Input<'_>| {
    let points: Vec<usize> = input
        .splits
        .iter()
        .scan(0usize, |at, &s| {
            *at += usize::from(s);
            Some(*at)
        })
        .collect();
    let chunks = split_at(input.doc, &points);

    // With room for the whole document, chunking must not change a thing.
    let whole = drain(&mut WindowTokens::new(input.doc));
    let mut scratch = vec![0u8; input.doc.len() + 1];
    let chunked = drain(&mut Reassembler::new(ChunkFeed::new(&chunks[..]), &mut scratch));
    assert_eq!(whole, chunked);

    // Lookups with a tiny scratch buffer may find less, but never panic.
    let options = LookupOptions {
        scratch_capacity: usize::from(input.scratch),
        ..LookupOptions::default()
    };
    let mut doc = Document::with_options(&chunks[..], options);
    let _ = doc.try_lookup(input.path);
    let size = doc.lookup_array_size(input.path);

    // A valid ASCII array at the root is counted exactly.
    if input.path.is_empty() && input.doc.is_ascii() && usize::from(input.scratch) > input.doc.len() {
        if let Ok(Value::Array(items)) = serde_json::from_slice::<Value>(input.doc) {
            assert_eq!(size, items.len());
        }
    }
});
