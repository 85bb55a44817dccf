//! Byte-at-a-time scanner over a caller-supplied window.
//!
//! The scanner keeps only the token kind in progress and the intra-token
//! state between calls, so a value can be split across any number of
//! windows. When a window runs out in the middle of a string or bareword the
//! token is returned with `partial` set, and the next call (after a new
//! window has been provided) continues the same token with only the new
//! bytes. Stitching the fragments together is left to the caller, see
//! [`Reassembler`](crate::Reassembler).

use crate::{
    navigator::TokenStream,
    token::{Token, TokenKind},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ScanState {
    #[default]
    Base,
    BareWord,
    String,
    StringEscape,
}

/// Resumable tokenizer state.
///
/// The window itself is borrowed for the duration of each
/// [`next_token`](Self::next_token) call only. The caller must pass the same
/// window until the tokenizer reports it exhausted, then call
/// [`provide_input`](Self::provide_input) before passing the next one.
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    pending: Option<TokenKind>,
    scan: ScanState,
    cursor: usize,
}

impl Tokenizer {
    /// A tokenizer positioned before the first byte of a document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget all state, as if no input had been seen.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Announce that the next call will receive a fresh window. Any token in
    /// progress carries over.
    pub fn provide_input(&mut self) {
        self.cursor = 0;
    }

    /// Offset of the next unread byte in the current window.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Scan the next token out of `window`.
    ///
    /// Returns `OutOfData` when the window ends between tokens, and a token
    /// with `partial` set when it ends inside a string or bareword.
    pub fn next_token(&mut self, window: &[u8]) -> Token {
        let end = window.len();
        if self.cursor >= end {
            return Token::out_of_data(end);
        }

        let mut kind = self.pending.take();
        let mut start = self.cursor;

        while let Some(&c) = window.get(self.cursor) {
            let at = self.cursor;
            self.cursor += 1;

            match self.scan {
                ScanState::Base => match c {
                    b'\t' | b' ' | b'\r' | b'\n' | b':' | b',' => {}
                    b'"' => {
                        kind = Some(TokenKind::String);
                        start = self.cursor;
                        self.scan = ScanState::String;
                    }
                    b'[' => return Token::complete(TokenKind::StartArray, at, self.cursor),
                    b']' => return Token::complete(TokenKind::EndArray, at, self.cursor),
                    b'{' => return Token::complete(TokenKind::StartObject, at, self.cursor),
                    b'}' => return Token::complete(TokenKind::EndObject, at, self.cursor),
                    b'-' | b'0'..=b'9' => kind = Some(self.bareword(TokenKind::Number, &mut start, at)),
                    b't' => kind = Some(self.bareword(TokenKind::True, &mut start, at)),
                    b'f' => kind = Some(self.bareword(TokenKind::False, &mut start, at)),
                    b'n' => kind = Some(self.bareword(TokenKind::Null, &mut start, at)),
                    _ => return self.parse_error(at),
                },
                ScanState::BareWord => match c {
                    b'\t' | b' ' | b'\r' | b'\n' | b',' | b':' => {
                        self.scan = ScanState::Base;
                        return Token::complete(kind.unwrap_or(TokenKind::Number), start, at);
                    }
                    b']' | b'}' => {
                        // The bracket belongs to the next token.
                        self.scan = ScanState::Base;
                        self.cursor = at;
                        return Token::complete(kind.unwrap_or(TokenKind::Number), start, at);
                    }
                    0x00..=0x1F | 0x7F..=0xFF => return self.parse_error(at),
                    _ => {}
                },
                ScanState::String => match c {
                    b'\\' => self.scan = ScanState::StringEscape,
                    b'"' => {
                        self.scan = ScanState::Base;
                        return Token::complete(TokenKind::String, start, at);
                    }
                    0x00..=0x1F | 0x7F..=0xBF => return self.parse_error(at),
                    _ => {}
                },
                ScanState::StringEscape => match c {
                    b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't' | b'u' => {
                        self.scan = ScanState::String;
                    }
                    _ => return self.parse_error(at),
                },
            }
        }

        match kind {
            Some(kind) => {
                self.pending = Some(kind);
                Token {
                    partial: true,
                    ..Token::complete(kind, start, end)
                }
            }
            None => Token::out_of_data(end),
        }
    }

    fn bareword(&mut self, kind: TokenKind, start: &mut usize, at: usize) -> TokenKind {
        *start = at;
        self.scan = ScanState::BareWord;
        kind
    }

    fn parse_error(&mut self, at: usize) -> Token {
        self.scan = ScanState::Base;
        Token::complete(TokenKind::ParseError, at, at + 1)
    }
}

/// A [`TokenStream`] over a single, complete window.
///
/// This is the provider-less variant: there are no chunk boundaries, so a
/// value that runs into the end of the window is returned as `partial` and
/// the stream then reports `OutOfData`.
#[derive(Debug, Clone)]
pub struct WindowTokens<'a> {
    tokenizer: Tokenizer,
    window: &'a [u8],
}

impl<'a> WindowTokens<'a> {
    /// Tokenize `window` from its first byte.
    #[must_use]
    pub fn new(window: &'a [u8]) -> Self {
        Self {
            tokenizer: Tokenizer::new(),
            window,
        }
    }
}

impl TokenStream for WindowTokens<'_> {
    fn next_token(&mut self) -> Token {
        self.tokenizer.next_token(self.window)
    }

    fn token_bytes(&self, token: &Token) -> &[u8] {
        self.window.get(token.start..token.end).unwrap_or_default()
    }
}
