use alloc::vec::Vec;

use crate::{Token, TokenKind, TokenStream};


/// Drain a stream into `(kind, bytes)` pairs, stopping after the first
/// parse error or at the end of input.
pub(crate) fn drain<T: TokenStream>(stream: &mut T) -> Vec<(TokenKind, Vec<u8>)> {
    let mut out = Vec::new();
    loop {
        let token: Token = stream.next_token();
        match token.kind {
            TokenKind::OutOfData => return out,
            TokenKind::ParseError => {
                out.push((token.kind, stream.token_bytes(&token).to_vec()));
                return out;
            }
            kind => out.push((kind, stream.token_bytes(&token).to_vec())),
        }
    }
}

pub(crate) fn test_count() -> u64 {
    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;
    tests
}
