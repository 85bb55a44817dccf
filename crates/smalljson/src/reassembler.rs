//! Pull-driven tokenization with cross-window reassembly.
//!
//! The [`Reassembler`] asks its [`InputProvider`] for a new window whenever
//! the tokenizer runs dry. A token found whole inside one window is returned
//! as is, pointing into that window. A token split across windows is copied
//! fragment by fragment into the caller's scratch buffer and returned
//! pointing there. If the scratch buffer fills up the token is flagged
//! `truncated` and the rest of its bytes are read and dropped so the stream
//! stays aligned.

use crate::{
    decode::unescape_in_place,
    error::DecodeError,
    navigator::TokenStream,
    token::{Origin, Token, TokenKind},
    tokenizer::Tokenizer,
};

/// Supplies input windows one after another.
pub trait InputProvider {
    /// Make the next window current. Returns `false` once the input is
    /// exhausted, in which case the current window is left unchanged.
    fn fetch_more(&mut self) -> bool;

    /// The current window. Empty before the first successful
    /// [`fetch_more`](Self::fetch_more).
    fn window(&self) -> &[u8];
}

impl<P: InputProvider + ?Sized> InputProvider for &mut P {
    fn fetch_more(&mut self) -> bool {
        (**self).fetch_more()
    }

    fn window(&self) -> &[u8] {
        (**self).window()
    }
}

/// A tokenizer fed by an [`InputProvider`], with a borrowed scratch buffer
/// for values that cross window boundaries.
///
/// The scratch buffer is overwritten by every reassembled token; a token that
/// points into it is only valid until the next call.
#[derive(Debug)]
pub struct Reassembler<'s, P> {
    tokenizer: Tokenizer,
    provider: P,
    scratch: &'s mut [u8],
}

impl<'s, P: InputProvider> Reassembler<'s, P> {
    /// Start tokenizing at the provider's current position.
    pub fn new(provider: P, scratch: &'s mut [u8]) -> Self {
        Self {
            tokenizer: Tokenizer::new(),
            provider,
            scratch,
        }
    }

    /// Give back the provider.
    pub fn into_provider(self) -> P {
        self.provider
    }

    /// The longest value that can be reassembled without truncation.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.scratch.len().saturating_sub(1)
    }

    /// Produce the next complete token, pulling more input as needed.
    ///
    /// If the input runs out in the middle of a value, the bytes gathered so
    /// far are returned with `partial` set. If it runs out between tokens the
    /// result is `OutOfData`.
    pub fn next_token(&mut self) -> Token {
        let capacity = self.capacity();
        let mut filled = 0;
        let mut truncated = false;
        let mut kind = None;

        loop {
            let token = self.tokenizer.next_token(self.provider.window());

            if token.kind == TokenKind::ParseError
                || (kind.is_none() && !token.partial && token.kind != TokenKind::OutOfData)
            {
                return token;
            }

            if token.kind != TokenKind::OutOfData {
                let fragment = self
                    .provider
                    .window()
                    .get(token.start..token.end)
                    .unwrap_or_default();
                let room = capacity - filled;
                let take = if fragment.len() > room {
                    truncated = true;
                    room
                } else {
                    fragment.len()
                };
                self.scratch[filled..filled + take].copy_from_slice(&fragment[..take]);
                filled += take;
                kind = Some(token.kind);

                if !token.partial {
                    return Self::scratch_token(token.kind, filled, false, truncated);
                }
            }

            if !self.provider.fetch_more() {
                return match kind {
                    Some(kind) => Self::scratch_token(kind, filled, true, truncated),
                    None => token,
                };
            }
            self.tokenizer.provide_input();
        }
    }

    /// The value bytes of `token`.
    #[must_use]
    pub fn bytes(&self, token: &Token) -> &[u8] {
        let buffer = match token.origin {
            Origin::Window => self.provider.window(),
            Origin::Scratch => &*self.scratch,
        };
        buffer.get(token.start..token.end).unwrap_or_default()
    }

    /// Unescape `token` inside the scratch buffer without allocating.
    ///
    /// A token that still points into the input window is first copied into
    /// the scratch buffer.
    ///
    /// # Errors
    ///
    /// The value does not fit the scratch buffer, or it holds a broken
    /// escape sequence.
    pub fn decode_in_place(&mut self, token: &Token) -> Result<&[u8], DecodeError> {
        let len = token.len();
        if token.origin == Origin::Window {
            if len >= self.scratch.len() {
                return Err(DecodeError::OutputTooSmall {
                    required: len + 1,
                    capacity: self.scratch.len(),
                });
            }
            let src = self
                .provider
                .window()
                .get(token.start..token.end)
                .unwrap_or_default();
            self.scratch[..src.len()].copy_from_slice(src);
        } else if token.start != 0 {
            self.scratch.copy_within(token.start..token.end, 0);
        }
        let n = unescape_in_place(self.scratch, len)?;
        Ok(&self.scratch[..n])
    }

    fn scratch_token(kind: TokenKind, filled: usize, partial: bool, truncated: bool) -> Token {
        Token {
            kind,
            start: 0,
            end: filled,
            partial,
            truncated,
            origin: Origin::Scratch,
        }
    }
}

impl<P: InputProvider> TokenStream for Reassembler<'_, P> {
    fn next_token(&mut self) -> Token {
        Reassembler::next_token(self)
    }

    fn token_bytes(&self, token: &Token) -> &[u8] {
        self.bytes(token)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::{ChunkFeed, Navigator, tokenizer::WindowTokens};

    fn collect<P: InputProvider>(reassembler: &mut Reassembler<'_, P>) -> Vec<(TokenKind, Vec<u8>, bool)> {
        let mut out = Vec::new();
        loop {
            let token = reassembler.next_token();
            if token.kind == TokenKind::OutOfData {
                return out;
            }
            out.push((token.kind, reassembler.bytes(&token).to_vec(), token.truncated));
            if token.kind == TokenKind::ParseError {
                return out;
            }
        }
    }

    #[test]
    fn whole_tokens_are_not_copied() {
        let chunks: [&[u8]; 2] = [br#"{"a":"x"}"#, b" [1]"];
        let mut scratch = [0u8; 8];
        let mut reassembler = Reassembler::new(ChunkFeed::new(&chunks[..]), &mut scratch);
        let open = reassembler.next_token();
        assert_eq!(open.origin, Origin::Window);
        let key = reassembler.next_token();
        assert_eq!((key.origin, key.start, key.end), (Origin::Window, 2, 3));
    }

    #[test]
    fn split_string_is_stitched_in_scratch() {
        let chunks: [&[u8]; 3] = [br#"["Cop"#, b"enha", br#"gen"]"#];
        let mut scratch = [0u8; 32];
        let mut reassembler = Reassembler::new(ChunkFeed::new(&chunks[..]), &mut scratch);
        assert_eq!(reassembler.next_token().kind, TokenKind::StartArray);
        let name = reassembler.next_token();
        assert_eq!(name.kind, TokenKind::String);
        assert_eq!(name.origin, Origin::Scratch);
        assert!(!name.partial);
        assert!(!name.truncated);
        assert_eq!(reassembler.bytes(&name), b"Copenhagen");
        assert_eq!(reassembler.next_token().kind, TokenKind::EndArray);
        assert_eq!(reassembler.next_token().kind, TokenKind::OutOfData);
    }

    #[test]
    fn overflow_truncates_but_keeps_alignment() {
        let chunks: [&[u8]; 3] = [br#"["abcd"#, b"efghij", br#"kl", 7]"#];
        let mut scratch = [0u8; 6];
        let mut reassembler = Reassembler::new(ChunkFeed::new(&chunks[..]), &mut scratch);
        assert_eq!(
            collect(&mut reassembler),
            [
                (TokenKind::StartArray, b"[".to_vec(), false),
                (TokenKind::String, b"abcde".to_vec(), true),
                (TokenKind::Number, b"7".to_vec(), false),
                (TokenKind::EndArray, b"]".to_vec(), false),
            ]
        );
    }

    #[test]
    fn bareword_split_before_terminator() {
        let chunks: [&[u8]; 3] = [b"[12", b"34", b"]"];
        let mut scratch = [0u8; 16];
        let mut reassembler = Reassembler::new(ChunkFeed::new(&chunks[..]), &mut scratch);
        assert_eq!(
            collect(&mut reassembler),
            [
                (TokenKind::StartArray, b"[".to_vec(), false),
                (TokenKind::Number, b"1234".to_vec(), false),
                (TokenKind::EndArray, b"]".to_vec(), false),
            ]
        );
    }

    #[test]
    fn end_of_input_inside_value_is_partial() {
        let chunks: [&[u8]; 2] = [br#"["unterm"#, b"inated"];
        let mut scratch = [0u8; 32];
        let mut reassembler = Reassembler::new(ChunkFeed::new(&chunks[..]), &mut scratch);
        reassembler.next_token();
        let value = reassembler.next_token();
        assert_eq!(value.kind, TokenKind::String);
        assert!(value.partial);
        assert_eq!(reassembler.bytes(&value), b"unterminated");
        assert_eq!(reassembler.next_token().kind, TokenKind::OutOfData);
    }

    #[test]
    fn trailing_number_at_end_of_document_is_partial() {
        let chunks: [&[u8]; 1] = [b"42"];
        let mut scratch = [0u8; 8];
        let mut reassembler = Reassembler::new(ChunkFeed::new(&chunks[..]), &mut scratch);
        let value = reassembler.next_token();
        assert_eq!((value.kind, value.partial), (TokenKind::Number, true));
        assert_eq!(reassembler.bytes(&value), b"42");
    }

    #[test]
    fn empty_chunks_are_skipped() {
        let chunks: [&[u8]; 5] = [b"", br#"["a"#, b"", br#"b"]"#, b""];
        let mut scratch = [0u8; 8];
        let mut reassembler = Reassembler::new(ChunkFeed::new(&chunks[..]), &mut scratch);
        assert_eq!(
            collect(&mut reassembler),
            [
                (TokenKind::StartArray, b"[".to_vec(), false),
                (TokenKind::String, b"ab".to_vec(), false),
                (TokenKind::EndArray, b"]".to_vec(), false),
            ]
        );
    }

    #[test]
    fn zero_sized_scratch_truncates_everything_split() {
        let chunks: [&[u8]; 2] = [br#"["ab"#, br#"c"]"#];
        let mut scratch = [0u8; 0];
        let mut reassembler = Reassembler::new(ChunkFeed::new(&chunks[..]), &mut scratch);
        reassembler.next_token();
        let value = reassembler.next_token();
        assert!(value.truncated);
        assert!(value.is_empty());
        assert_eq!(reassembler.next_token().kind, TokenKind::EndArray);
    }

    #[test]
    fn every_split_matches_single_window() {
        let doc = br#"{"name":"Copenhagen","list":[{"x":"1"},{"x":-2},true,null,"\u00e6"]}"#;
        let mut whole = WindowTokens::new(doc);
        let mut expected = Vec::new();
        loop {
            let token = whole.next_token();
            if token.kind == TokenKind::OutOfData {
                break;
            }
            expected.push((token.kind, whole.token_bytes(&token).to_vec(), false));
        }

        for a in 0..=doc.len() {
            for b in a..=doc.len() {
                let chunks = [&doc[..a], &doc[a..b], &doc[b..]];
                let mut scratch = [0u8; 64];
                let mut reassembler = Reassembler::new(ChunkFeed::new(&chunks[..]), &mut scratch);
                assert_eq!(collect(&mut reassembler), expected, "split at {a}/{b}");
            }
        }
    }

    #[test]
    fn decode_in_place_from_window_and_scratch() {
        let chunks: [&[u8]; 2] = [br#"["a\n" "b\u00"#, br#"e6c"]"#];
        let mut scratch = [0u8; 16];
        let mut reassembler = Reassembler::new(ChunkFeed::new(&chunks[..]), &mut scratch);
        reassembler.next_token();
        let first = reassembler.next_token();
        assert_eq!(first.origin, Origin::Window);
        assert_eq!(reassembler.decode_in_place(&first), Ok(&b"a\n"[..]));
        let second = reassembler.next_token();
        assert_eq!(second.origin, Origin::Scratch);
        assert_eq!(
            reassembler.decode_in_place(&second),
            Ok("b\u{e6}c".as_bytes())
        );
    }

    #[test]
    fn decode_in_place_rejects_oversized_window_token() {
        let chunks: [&[u8]; 1] = [br#""abcdefgh""#];
        let mut scratch = [0u8; 4];
        let mut reassembler = Reassembler::new(ChunkFeed::new(&chunks[..]), &mut scratch);
        let token = reassembler.next_token();
        assert_eq!(
            reassembler.decode_in_place(&token),
            Err(DecodeError::OutputTooSmall {
                required: 9,
                capacity: 4
            })
        );
    }

    #[test]
    fn navigator_over_reassembler() {
        let chunks: [&[u8]; 3] = [br#"{"skip":[1,{"deep":"#, br#"[]}],"wan"#, br#"ted":"yes"}"#];
        let mut scratch = [0u8; 16];
        let mut reassembler = Reassembler::new(ChunkFeed::new(&chunks[..]), &mut scratch);
        reassembler.enter_object_and_skip_to_key(b"wanted").unwrap();
        let value = reassembler.expect(TokenKind::String).unwrap();
        assert_eq!(reassembler.bytes(&value), b"yes");
    }
}
