//! Path lookups over a chunked document.
//!
//! Every lookup starts a fresh tokenizer at the first byte of the first
//! chunk and walks forward to the addressed value. Nothing is cached
//! between lookups apart from the scratch buffer allocation.

use alloc::{string::String, vec, vec::Vec};

use bstr::BString;

use crate::{
    chunk::{ChunkFeed, ChunkSource},
    decode::{parse_integer, trim_partial_escape, unescape_to_bstring},
    error::{LookupError, NavError},
    navigator::Navigator,
    options::LookupOptions,
    path::PathCursor,
    reassembler::Reassembler,
    token::{Token, TokenKind},
};

/// A scalar value found by a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scalar {
    /// The kind of token the value came from.
    pub kind: TokenKind,
    /// Unescaped bytes for strings; the raw bareword otherwise.
    pub value: BString,
    /// The value crossed a chunk boundary and was longer than the scratch
    /// buffer, so only its beginning is present.
    pub truncated: bool,
}

/// A JSON document read through a [`ChunkSource`], answering path queries.
///
/// ```rust
/// use smalljson::Document;
///
/// let chunks: [&[u8]; 2] = [br#"{"list":[{"x":"1"},{"x":"#, br#""2"},{"x":"3"}]}"#];
/// let mut doc = Document::new(&chunks[..]);
/// assert_eq!(doc.lookup_array_size("/list"), 3);
/// assert_eq!(doc.lookup("/list/1/x").unwrap(), "2");
/// ```
#[derive(Debug)]
pub struct Document<'d, S: ?Sized> {
    source: &'d S,
    scratch: Vec<u8>,
    options: LookupOptions,
}

impl<'d, S: ChunkSource + ?Sized> Document<'d, S> {
    /// A document with default [`LookupOptions`].
    #[must_use]
    pub fn new(source: &'d S) -> Self {
        Self::with_options(source, LookupOptions::default())
    }

    /// A document with explicit options.
    #[must_use]
    pub fn with_options(source: &'d S, options: LookupOptions) -> Self {
        Self {
            source,
            scratch: vec![0; options.scratch_capacity],
            options,
        }
    }

    /// The options in effect.
    #[must_use]
    pub fn options(&self) -> &LookupOptions {
        &self.options
    }

    /// The underlying chunk source.
    #[must_use]
    pub fn source(&self) -> &'d S {
        self.source
    }

    /// Find the scalar at `path`, reporting why if there is none.
    ///
    /// # Errors
    ///
    /// The path is malformed, does not exist in the document, leads to an
    /// object or array, or the document is malformed along the way.
    pub fn try_lookup(&mut self, path: &str) -> Result<Scalar, LookupError> {
        let options = self.options;
        let mut stream = self.stream();
        walk(&mut stream, path, &options)?;

        let token = stream.next_token();
        if !token.kind.is_scalar() {
            return Err(absent_because(&token, LookupError::NotScalar(token.kind)));
        }
        let raw = stream.bytes(&token);
        let value = if token.kind == TokenKind::String {
            if token.partial {
                return Err(LookupError::IncompleteValue);
            }
            if token.truncated {
                unescape_to_bstring(trim_partial_escape(raw))?
            } else {
                unescape_to_bstring(raw)?
            }
        } else {
            BString::from(raw)
        };
        Ok(Scalar {
            kind: token.kind,
            value,
            truncated: token.truncated,
        })
    }

    /// Find the scalar at `path`.
    pub fn lookup_scalar(&mut self, path: &str) -> Option<Scalar> {
        self.try_lookup(path)
            .map_err(|err| {
                trace!(path = path, error = %err, "lookup found nothing");
                err
            })
            .ok()
    }

    /// The decoded value at `path`, or `None` if there is no scalar there.
    ///
    /// Strings are unescaped; numbers, booleans and null are returned as
    /// their raw text.
    pub fn lookup(&mut self, path: &str) -> Option<BString> {
        self.lookup_scalar(path).map(|scalar| scalar.value)
    }

    /// Like [`lookup`](Self::lookup), but only if the value is valid UTF-8.
    pub fn lookup_str(&mut self, path: &str) -> Option<String> {
        self.lookup(path)
            .and_then(|value| String::from_utf8(value.into()).ok())
    }

    /// The value at `path` parsed as an integer. Quoted integers are
    /// accepted.
    pub fn lookup_integer(&mut self, path: &str) -> Option<i64> {
        let scalar = self.lookup_scalar(path)?;
        parse_integer(&scalar.value)
            .map_err(|err| {
                trace!(path = path, error = %err, "value is not an integer");
                err
            })
            .ok()
    }

    /// Count the elements of the array at `path`.
    ///
    /// # Errors
    ///
    /// The path does not lead to an array, or the array is cut short or
    /// malformed.
    pub fn try_lookup_array_size(&mut self, path: &str) -> Result<usize, LookupError> {
        let options = self.options;
        let mut stream = self.stream();
        walk(&mut stream, path, &options)?;

        let token = stream.next_token();
        if token.kind != TokenKind::StartArray {
            return Err(absent_because(&token, LookupError::NotArray(token.kind)));
        }
        let mut len = 0;
        loop {
            match stream.skip_value() {
                Ok(()) => len += 1,
                Err(NavError::Unbalanced) => return Ok(len),
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Count the elements of the array at `path`; 0 if there is no array
    /// there.
    pub fn lookup_array_size(&mut self, path: &str) -> usize {
        self.try_lookup_array_size(path)
            .map_err(|err| {
                trace!(path = path, error = %err, "array size lookup found nothing");
                err
            })
            .unwrap_or(0)
    }

    fn stream(&mut self) -> Reassembler<'_, ChunkFeed<'d, S>> {
        Reassembler::new(ChunkFeed::new(self.source), &mut self.scratch)
    }
}

/// Advance `stream` so that the next token is the value addressed by `path`.
fn walk<N: Navigator>(
    stream: &mut N,
    path: &str,
    options: &LookupOptions,
) -> Result<(), LookupError> {
    for segment in PathCursor::new(path, options.max_segment_len) {
        let segment = segment?;
        let token = stream.next_token();
        match token.kind {
            TokenKind::StartArray => {
                for _ in 0..segment.index()? {
                    stream.skip_value()?;
                }
            }
            TokenKind::StartObject => stream.skip_to_key(segment.as_bytes())?,
            _ => return Err(absent_because(&token, LookupError::NotContainer(token.kind))),
        }
    }
    Ok(())
}

/// Prefer the stream's own failure over a kind mismatch.
fn absent_because(token: &Token, mismatch: LookupError) -> LookupError {
    match token.kind {
        TokenKind::OutOfData => NavError::OutOfData.into(),
        TokenKind::ParseError => NavError::Malformed {
            offset: token.start,
        }
        .into(),
        _ => mismatch,
    }
}
