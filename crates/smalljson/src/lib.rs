//! A small, bounded-memory JSON tokenizer with slash-path lookups.
//!
//! The tokenizer scans one byte window at a time and never builds a tree.
//! Values that straddle window boundaries are stitched together in a
//! fixed-size scratch buffer by the [`Reassembler`], and the [`Navigator`]
//! helpers skip values and find keys on top of any [`TokenStream`]. The
//! [`Document`] type answers queries such as `/list/3/weather/0/icon` by
//! re-walking the document from its first chunk on every call.
//!
//! ```rust
//! use smalljson::Document;
//!
//! let chunks: [&[u8]; 3] = [
//!     br#"{"name":"Copen"#,
//!     br#"hagen","main":{"te"#,
//!     br#"mp":"285.086"}}"#,
//! ];
//! let mut doc = Document::new(&chunks[..]);
//! assert_eq!(doc.lookup("/name").unwrap(), "Copenhagen");
//! assert_eq!(doc.lookup("/main/temp").unwrap(), "285.086");
//! assert!(doc.lookup("/missing").is_none());
//! ```
//!
//! The grammar is deliberately permissive: `:` and `,` are ignored, `]` and
//! `}` are interchangeable, and any bareword starting with `t`, `f` or `n` is
//! taken as `true`, `false` or `null`.

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

macro_rules! trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::trace!($($arg)*);
    };
}

mod chunk;
mod chunk_utils;
mod decode;
mod document;
mod error;
mod navigator;
mod options;
mod path;
mod reassembler;
mod token;
mod tokenizer;

#[cfg(test)]
mod tests;

pub use chunk::{ChunkFeed, ChunkSource, ChunkedBuffer, FixedChunks};
pub use chunk_utils::{produce_chunks, split_at};
pub use decode::{
    fast_eq, parse_integer, unescape, unescape_buffer_len, unescape_in_place,
    unescape_to_bstring,
};
pub use document::{Document, Scalar};
pub use error::{DecodeError, LookupError, NavError, PathError};
pub use navigator::{Navigator, TokenStream};
pub use options::LookupOptions;
pub use path::{PathCursor, Segment};
pub use reassembler::{InputProvider, Reassembler};
pub use token::{Origin, Token, TokenKind};
pub use tokenizer::{Tokenizer, WindowTokens};
