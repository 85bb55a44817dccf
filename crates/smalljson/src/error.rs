#![allow(missing_docs)]

use thiserror::Error;

use crate::token::TokenKind;

/// Failure to decode a token's raw bytes.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("backslash at offset {offset} ends the value")]
    DanglingEscape { offset: usize },
    #[error("unknown escape character {byte:#04x} at offset {offset}")]
    UnknownEscape { byte: u8, offset: usize },
    #[error("unicode escape at offset {offset} has fewer than four digits")]
    TruncatedUnicodeEscape { offset: usize },
    #[error("invalid hex digit {byte:#04x} at offset {offset}")]
    InvalidHexDigit { byte: u8, offset: usize },
    #[error("output buffer holds {capacity} bytes but {required} are required")]
    OutputTooSmall { required: usize, capacity: usize },
    #[error("empty integer")]
    EmptyInteger,
    #[error("invalid digit {byte:#04x} at offset {offset}")]
    InvalidDigit { byte: u8, offset: usize },
}

/// Failure while walking the token stream.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum NavError {
    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: TokenKind, found: TokenKind },
    #[error("object ended before the key was found")]
    KeyNotFound,
    #[error("closing bracket without an opening bracket")]
    Unbalanced,
    #[error("input ended inside a value")]
    OutOfData,
    #[error("malformed input at offset {offset}")]
    Malformed { offset: usize },
}

/// A path string that cannot be walked.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    #[error("path must start with '/'")]
    Relative,
    #[error("path segment of {len} bytes exceeds the limit of {max}")]
    SegmentTooLong { len: usize, max: usize },
    #[error("segment is not an array index")]
    InvalidIndex,
}

/// Why a lookup found no value.
///
/// The domain-facing lookups collapse all of these to "absent"; the `try_`
/// variants return them for diagnostics.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LookupError {
    #[error(transparent)]
    Path(#[from] PathError),
    #[error(transparent)]
    Navigation(#[from] NavError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("cannot descend into {0}")]
    NotContainer(TokenKind),
    #[error("addressed value is {0}, not a scalar")]
    NotScalar(TokenKind),
    #[error("addressed value is {0}, not an array")]
    NotArray(TokenKind),
    #[error("document ended inside the addressed string")]
    IncompleteValue,
}
