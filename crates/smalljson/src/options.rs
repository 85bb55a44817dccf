/// Configuration for [`Document`](crate::Document) lookups.
///
/// # Examples
///
/// ```rust
/// use smalljson::{Document, LookupOptions};
///
/// let chunks: [&[u8]; 1] = [br#"{"name":"Copenhagen"}"#];
/// let options = LookupOptions {
///     scratch_capacity: 256,
///     ..Default::default()
/// };
/// let mut doc = Document::with_options(&chunks[..], options);
/// assert_eq!(doc.lookup("/name").unwrap(), "Copenhagen");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct LookupOptions {
    /// Size of the buffer used to stitch together a value that spans chunk
    /// boundaries. One byte is kept free for a terminator, so the longest
    /// value that survives a split is `scratch_capacity - 1` bytes; longer
    /// ones are truncated.
    ///
    /// Values contained in a single chunk are never copied and are not
    /// limited by this.
    ///
    /// # Default
    ///
    /// `64`
    pub scratch_capacity: usize,

    /// Longest accepted path segment, in bytes. A path with a longer segment
    /// finds nothing.
    ///
    /// An object key split across chunks only matches if it fits the scratch
    /// buffer, so this should not exceed `scratch_capacity - 1`.
    ///
    /// # Default
    ///
    /// `63`
    pub max_segment_len: usize,
}

impl LookupOptions {
    /// Scratch size used when none is configured.
    pub const DEFAULT_SCRATCH_CAPACITY: usize = 64;
    /// Segment limit used when none is configured.
    pub const DEFAULT_MAX_SEGMENT_LEN: usize = Self::DEFAULT_SCRATCH_CAPACITY - 1;
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self {
            scratch_capacity: Self::DEFAULT_SCRATCH_CAPACITY,
            max_segment_len: Self::DEFAULT_MAX_SEGMENT_LEN,
        }
    }
}
