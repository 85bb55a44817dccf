//! Chunked input: where the bytes of a document live.
//!
//! A document is an ordered list of byte chunks. Lookups re-read it from the
//! first chunk each time, so sources must hand out the same bytes on every
//! pass.

use alloc::{boxed::Box, vec::Vec};

use crate::reassembler::InputProvider;

/// An ordered, random-access list of byte chunks.
pub trait ChunkSource {
    /// Number of chunks.
    fn chunk_count(&self) -> usize;

    /// The bytes of chunk `index`, or `None` past the end.
    fn chunk(&self, index: usize) -> Option<&[u8]>;
}

impl<T: AsRef<[u8]>> ChunkSource for [T] {
    fn chunk_count(&self) -> usize {
        self.len()
    }

    fn chunk(&self, index: usize) -> Option<&[u8]> {
        self.get(index).map(AsRef::as_ref)
    }
}

impl<T: AsRef<[u8]>, const N: usize> ChunkSource for [T; N] {
    fn chunk_count(&self) -> usize {
        N
    }

    fn chunk(&self, index: usize) -> Option<&[u8]> {
        self.get(index).map(AsRef::as_ref)
    }
}

impl<T: AsRef<[u8]>> ChunkSource for Vec<T> {
    fn chunk_count(&self) -> usize {
        self.len()
    }

    fn chunk(&self, index: usize) -> Option<&[u8]> {
        self.get(index).map(AsRef::as_ref)
    }
}

impl<S: ChunkSource + ?Sized> ChunkSource for &S {
    fn chunk_count(&self) -> usize {
        (**self).chunk_count()
    }

    fn chunk(&self, index: usize) -> Option<&[u8]> {
        (**self).chunk(index)
    }
}

/// Owned storage for data that arrives piece by piece, such as the body of
/// an HTTP response. Each [`add`](Self::add) copies its input into a new
/// chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkedBuffer {
    chunks: Vec<Box<[u8]>>,
}

impl ChunkedBuffer {
    /// An empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a copy of `bytes` as a new chunk. Empty input still adds a
    /// chunk.
    pub fn add(&mut self, bytes: &[u8]) {
        self.chunks.push(bytes.into());
    }

    /// Total number of bytes across all chunks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.iter().map(|c| c.len()).sum()
    }

    /// Whether the buffer holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.iter().all(|c| c.is_empty())
    }

    /// Number of chunks added since the last [`clear`](Self::clear).
    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Length of chunk `index`.
    #[must_use]
    pub fn chunk_len(&self, index: usize) -> Option<usize> {
        self.chunks.get(index).map(|c| c.len())
    }

    /// The byte at `position`, counting across chunk boundaries.
    #[must_use]
    pub fn byte_at(&self, position: usize) -> Option<u8> {
        let mut remaining = position;
        for chunk in &self.chunks {
            if let Some(&b) = chunk.get(remaining) {
                return Some(b);
            }
            remaining -= chunk.len();
        }
        None
    }

    /// The bytes of chunk `index`.
    #[must_use]
    pub fn chunk(&self, index: usize) -> Option<&[u8]> {
        self.chunks.get(index).map(|c| &**c)
    }

    /// Drop all chunks.
    pub fn clear(&mut self) {
        self.chunks.clear();
    }
}

impl ChunkSource for ChunkedBuffer {
    fn chunk_count(&self) -> usize {
        ChunkedBuffer::chunk_count(self)
    }

    fn chunk(&self, index: usize) -> Option<&[u8]> {
        ChunkedBuffer::chunk(self, index)
    }
}

impl<B: AsRef<[u8]>> Extend<B> for ChunkedBuffer {
    fn extend<I: IntoIterator<Item = B>>(&mut self, iter: I) {
        for bytes in iter {
            self.add(bytes.as_ref());
        }
    }
}

impl<B: AsRef<[u8]>> FromIterator<B> for ChunkedBuffer {
    fn from_iter<I: IntoIterator<Item = B>>(iter: I) -> Self {
        let mut buffer = Self::new();
        buffer.extend(iter);
        buffer
    }
}

/// A contiguous byte slice presented as fixed-size chunks, the last one
/// possibly shorter. Handy for reading a large document through a small
/// window without copying it.
#[derive(Debug, Clone, Copy)]
pub struct FixedChunks<'a> {
    bytes: &'a [u8],
    chunk_size: usize,
}

impl<'a> FixedChunks<'a> {
    /// Split `bytes` into chunks of `chunk_size` bytes. A size of zero is
    /// treated as one.
    #[must_use]
    pub fn new(bytes: &'a [u8], chunk_size: usize) -> Self {
        Self {
            bytes,
            chunk_size: chunk_size.max(1),
        }
    }
}

impl ChunkSource for FixedChunks<'_> {
    fn chunk_count(&self) -> usize {
        self.bytes.len().div_ceil(self.chunk_size)
    }

    fn chunk(&self, index: usize) -> Option<&[u8]> {
        self.bytes.chunks(self.chunk_size).nth(index)
    }
}

/// Walks a [`ChunkSource`] front to back, one chunk per
/// [`fetch_more`](InputProvider::fetch_more).
#[derive(Debug)]
pub struct ChunkFeed<'d, S: ?Sized> {
    source: &'d S,
    next: usize,
    window: &'d [u8],
}

impl<'d, S: ChunkSource + ?Sized> ChunkFeed<'d, S> {
    /// A feed positioned before the first chunk.
    #[must_use]
    pub fn new(source: &'d S) -> Self {
        Self {
            source,
            next: 0,
            window: &[],
        }
    }

    /// Index of the chunk the next fetch will return.
    #[must_use]
    pub fn next_index(&self) -> usize {
        self.next
    }
}

impl<S: ChunkSource + ?Sized> InputProvider for ChunkFeed<'_, S> {
    fn fetch_more(&mut self) -> bool {
        if self.next >= self.source.chunk_count() {
            return false;
        }
        self.window = self.source.chunk(self.next).unwrap_or_default();
        self.next += 1;
        true
    }

    fn window(&self) -> &[u8] {
        self.window
    }
}
