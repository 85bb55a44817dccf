//! Slash-delimited lookup paths such as `/list/3/weather/0/icon`.

use core::iter::FusedIterator;

use crate::error::PathError;

/// One step of a path: an object key, or an array index when the value it
/// is applied to turns out to be an array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'p>(&'p str);

impl<'p> Segment<'p> {
    /// The segment text.
    #[must_use]
    pub fn as_str(&self) -> &'p str {
        self.0
    }

    /// The segment text as bytes, for key comparison.
    #[must_use]
    pub fn as_bytes(&self) -> &'p [u8] {
        self.0.as_bytes()
    }

    /// The segment as a 0-based array index.
    ///
    /// # Errors
    ///
    /// [`PathError::InvalidIndex`] unless the segment is a non-empty run of
    /// ASCII digits that fits in `usize`.
    pub fn index(&self) -> Result<usize, PathError> {
        if self.0.is_empty() {
            return Err(PathError::InvalidIndex);
        }
        self.0.bytes().try_fold(0usize, |acc, c| {
            if !c.is_ascii_digit() {
                return Err(PathError::InvalidIndex);
            }
            acc.checked_mul(10)
                .and_then(|acc| acc.checked_add(usize::from(c - b'0')))
                .ok_or(PathError::InvalidIndex)
        })
    }
}

/// Iterator over the segments of a path.
///
/// A path is either empty, addressing the document root, or a sequence of
/// `/`-prefixed segments. Segments may be empty: `/` addresses the key `""`
/// of the root object and `/a/` the key `""` inside `a`. Iteration stops
/// after the first error.
///
/// ```rust
/// use smalljson::PathCursor;
///
/// let segments: Vec<_> = PathCursor::new("/list/3/name", 64)
///     .map(|segment| segment.unwrap().as_str())
///     .collect();
/// assert_eq!(segments, ["list", "3", "name"]);
/// ```
#[derive(Debug, Clone)]
pub struct PathCursor<'p> {
    rest: &'p str,
    max_segment_len: usize,
    failed: bool,
}

impl<'p> PathCursor<'p> {
    /// Iterate over `path`, rejecting segments longer than
    /// `max_segment_len` bytes.
    #[must_use]
    pub fn new(path: &'p str, max_segment_len: usize) -> Self {
        Self {
            rest: path,
            max_segment_len,
            failed: false,
        }
    }

    /// Whether every segment has been produced.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.failed || self.rest.is_empty()
    }
}

impl<'p> Iterator for PathCursor<'p> {
    type Item = Result<Segment<'p>, PathError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_at_end() {
            return None;
        }
        let Some(after_slash) = self.rest.strip_prefix('/') else {
            self.failed = true;
            return Some(Err(PathError::Relative));
        };
        let (segment, rest) = match after_slash.find('/') {
            Some(at) => after_slash.split_at(at),
            None => (after_slash, ""),
        };
        if segment.len() > self.max_segment_len {
            self.failed = true;
            return Some(Err(PathError::SegmentTooLong {
                len: segment.len(),
                max: self.max_segment_len,
            }));
        }
        self.rest = rest;
        Some(Ok(Segment(segment)))
    }
}

impl FusedIterator for PathCursor<'_> {}
