//! Structural helpers built only from `next_token`.
//!
//! Nesting is tracked with a single depth counter. `]` and `}` both close
//! whatever is open, matching the tokenizer's permissive grammar.

use crate::{
    decode::fast_eq,
    error::NavError,
    token::{Token, TokenKind},
};

/// Anything that hands out tokens one at a time.
pub trait TokenStream {
    /// Produce the next token.
    fn next_token(&mut self) -> Token;

    /// The value bytes of `token`, resolved against whichever buffer holds
    /// them. Only valid for the most recently returned token.
    fn token_bytes(&self, token: &Token) -> &[u8];
}

/// Skip and search operations over a [`TokenStream`].
pub trait Navigator: TokenStream {
    /// Read one token and require it to be of `kind`.
    ///
    /// # Errors
    ///
    /// The token read was of a different kind.
    fn expect(&mut self, kind: TokenKind) -> Result<Token, NavError> {
        let token = self.next_token();
        if token.kind == kind {
            Ok(token)
        } else {
            Err(classify(&token, kind))
        }
    }

    /// Skip one complete value, including everything nested inside it.
    ///
    /// # Errors
    ///
    /// See [`skip_nested`](Self::skip_nested).
    fn skip_value(&mut self) -> Result<(), NavError> {
        self.skip_nested(0)
    }

    /// Consume tokens until the nesting depth, starting at `level`, returns
    /// to zero. Use level 1 when the opening bracket was already consumed.
    ///
    /// # Errors
    ///
    /// - [`NavError::Unbalanced`] if an end bracket takes the depth below
    ///   zero.
    /// - [`NavError::OutOfData`] or [`NavError::Malformed`] if the input ends
    ///   or breaks before the depth balances.
    fn skip_nested(&mut self, mut level: usize) -> Result<(), NavError> {
        loop {
            let token = self.next_token();
            match token.kind {
                TokenKind::StartObject | TokenKind::StartArray => level += 1,
                TokenKind::EndObject | TokenKind::EndArray => {
                    level = level.checked_sub(1).ok_or(NavError::Unbalanced)?;
                }
                TokenKind::OutOfData => return Err(NavError::OutOfData),
                TokenKind::ParseError => {
                    return Err(NavError::Malformed {
                        offset: token.start,
                    });
                }
                _ => {}
            }
            if level == 0 {
                return Ok(());
            }
        }
    }

    /// Read one token of `kind` and, if it opens a container, skip the
    /// rest of it.
    ///
    /// # Errors
    ///
    /// The token was of another kind, or the nested skip failed.
    fn expect_and_skip(&mut self, kind: TokenKind) -> Result<(), NavError> {
        let token = self.expect(kind)?;
        if token.kind.is_start() {
            self.skip_nested(1)
        } else {
            Ok(())
        }
    }

    /// Skip the remaining members of the object or array whose opening
    /// bracket has already been read, including its closing bracket.
    ///
    /// # Errors
    ///
    /// See [`skip_nested`](Self::skip_nested).
    fn skip_to_container_end(&mut self) -> Result<(), NavError> {
        self.skip_nested(1)
    }

    /// Inside an object, consume members until the key `key` has been read.
    /// The caller reads the value next.
    ///
    /// Keys are compared byte for byte with no unescaping. A key that was
    /// truncated never matches.
    ///
    /// # Errors
    ///
    /// [`NavError::KeyNotFound`] if the object closes first, or any error
    /// from reading keys and skipping values.
    fn skip_to_key(&mut self, key: &[u8]) -> Result<(), NavError> {
        loop {
            let token = self.expect(TokenKind::String)?;
            if !token.truncated && fast_eq(self.token_bytes(&token), key) {
                return Ok(());
            }
            self.skip_value()?;
        }
    }

    /// Require the next token to open an object, then
    /// [`skip_to_key`](Self::skip_to_key).
    ///
    /// # Errors
    ///
    /// The next token is not `{`, or the key search failed.
    fn enter_object_and_skip_to_key(&mut self, key: &[u8]) -> Result<(), NavError> {
        self.expect(TokenKind::StartObject)?;
        self.skip_to_key(key)
    }
}

impl<T: TokenStream + ?Sized> Navigator for T {}

fn classify(token: &Token, expected: TokenKind) -> NavError {
    match token.kind {
        TokenKind::OutOfData => NavError::OutOfData,
        TokenKind::ParseError => NavError::Malformed {
            offset: token.start,
        },
        found if expected == TokenKind::String && found.is_end() => NavError::KeyNotFound,
        found => NavError::UnexpectedToken { expected, found },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::WindowTokens;

    #[test]
    fn skip_scalar() {
        let mut stream = WindowTokens::new(br#""a" 2]"#);
        assert_eq!(stream.skip_value(), Ok(()));
        let next = stream.next_token();
        assert_eq!(next.kind, TokenKind::Number);
    }

    #[test]
    fn skip_nested_structure() {
        let mut stream = WindowTokens::new(br#"{"a":[1,{"b":[]}],"c":{}} "x""#);
        assert_eq!(stream.skip_value(), Ok(()));
        let next = stream.next_token();
        assert_eq!(stream.token_bytes(&next), b"x");
    }

    #[test]
    fn skip_from_inside_container() {
        let mut stream = WindowTokens::new(br#"[1, [2, 3], 4] null"#);
        stream.expect(TokenKind::StartArray).unwrap();
        assert_eq!(stream.skip_to_container_end(), Ok(()));
        assert_eq!(stream.next_token().kind, TokenKind::Null);
    }

    #[test]
    fn brackets_are_interchangeable() {
        let mut stream = WindowTokens::new(b"[1, {2]} 3");
        assert_eq!(stream.skip_value(), Ok(()));
        assert_eq!(stream.next_token().kind, TokenKind::Number);
    }

    #[test]
    fn end_bracket_at_depth_zero_is_unbalanced() {
        let mut stream = WindowTokens::new(b"]");
        assert_eq!(stream.skip_value(), Err(NavError::Unbalanced));
    }

    #[test]
    fn truncated_document_fails_the_skip() {
        let mut stream = WindowTokens::new(br#"[1, [2, 3"#);
        assert_eq!(stream.skip_value(), Err(NavError::OutOfData));
    }

    #[test]
    fn malformed_input_fails_the_skip() {
        let mut stream = WindowTokens::new(b"[1, @]");
        assert_eq!(stream.skip_value(), Err(NavError::Malformed { offset: 4 }));
    }

    #[test]
    fn expect_and_skip_checks_kind() {
        let mut stream = WindowTokens::new(br#"{"a":[1]} [2] "#);
        assert_eq!(stream.expect_and_skip(TokenKind::StartObject), Ok(()));
        assert_eq!(
            stream.expect_and_skip(TokenKind::StartObject),
            Err(NavError::UnexpectedToken {
                expected: TokenKind::StartObject,
                found: TokenKind::StartArray,
            })
        );
    }

    #[test]
    fn skip_to_key_leaves_value_next() {
        let mut stream = WindowTokens::new(br#"{"a":{"x":1},"b":[1,2],"c":"found"}"#);
        assert_eq!(stream.enter_object_and_skip_to_key(b"c"), Ok(()));
        let value = stream.expect(TokenKind::String).unwrap();
        assert_eq!(stream.token_bytes(&value), b"found");
    }

    #[test]
    fn missing_key_reports_not_found() {
        let mut stream = WindowTokens::new(br#"{"a":1,"b":2}"#);
        assert_eq!(
            stream.enter_object_and_skip_to_key(b"z"),
            Err(NavError::KeyNotFound)
        );
    }

    #[test]
    fn keys_are_not_unescaped() {
        let mut stream = WindowTokens::new(br#"{"\u0061":1,"a":2}"#);
        stream.enter_object_and_skip_to_key(b"a").unwrap();
        let value = stream.next_token();
        assert_eq!(stream.token_bytes(&value), b"2");
    }

    #[test]
    fn non_string_key_position_is_an_error() {
        let mut stream = WindowTokens::new(br#"{1:2}"#);
        assert_eq!(
            stream.enter_object_and_skip_to_key(b"a"),
            Err(NavError::UnexpectedToken {
                expected: TokenKind::String,
                found: TokenKind::Number,
            })
        );
    }
}
