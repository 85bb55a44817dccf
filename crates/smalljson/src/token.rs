use core::fmt;

/// The lexical class of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum TokenKind {
    /// A string; the range excludes the surrounding quotes and is not
    /// unescaped.
    String,
    /// A bareword starting with `-` or a digit.
    Number,
    /// `{`
    StartObject,
    /// `}`
    EndObject,
    /// `[`
    StartArray,
    /// `]`
    EndArray,
    /// A bareword starting with `t`.
    True,
    /// A bareword starting with `f`.
    False,
    /// A bareword starting with `n`.
    Null,
    /// The input ended between tokens. Carries no value.
    OutOfData,
    /// A byte that cannot appear at this position.
    ParseError,
}

impl TokenKind {
    /// Strings, numbers and the three literal barewords.
    #[must_use]
    pub fn is_scalar(self) -> bool {
        matches!(
            self,
            Self::String | Self::Number | Self::True | Self::False | Self::Null
        )
    }

    /// `{` or `[`.
    #[must_use]
    pub fn is_start(self) -> bool {
        matches!(self, Self::StartObject | Self::StartArray)
    }

    /// `}` or `]`. The grammar does not tell them apart structurally.
    #[must_use]
    pub fn is_end(self) -> bool {
        matches!(self, Self::EndObject | Self::EndArray)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::String => "string",
            Self::Number => "number",
            Self::StartObject => "start of object",
            Self::EndObject => "end of object",
            Self::StartArray => "start of array",
            Self::EndArray => "end of array",
            Self::True => "true",
            Self::False => "false",
            Self::Null => "null",
            Self::OutOfData => "end of data",
            Self::ParseError => "parse error",
        })
    }
}

/// The buffer a token's `start..end` range points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Origin {
    /// The input window that was current when the token was returned.
    #[default]
    Window,
    /// The reassembly scratch buffer.
    Scratch,
}

/// One classified span of input.
///
/// `start..end` is the raw value range: for strings it excludes the quotes,
/// for brackets it is the single bracket byte. A `ParseError` token spans the
/// offending byte. Tokens are plain values; the range is only meaningful
/// until the producer is asked for the next token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// What was scanned.
    pub kind: TokenKind,
    /// First byte of the value.
    pub start: usize,
    /// One past the last byte of the value.
    pub end: usize,
    /// The value continues past the end of the current window.
    pub partial: bool,
    /// The value did not fit the scratch buffer and was cut.
    pub truncated: bool,
    /// Which buffer `start..end` refers to.
    pub origin: Origin,
}

impl Token {
    pub(crate) fn complete(kind: TokenKind, start: usize, end: usize) -> Self {
        Self {
            kind,
            start,
            end,
            partial: false,
            truncated: false,
            origin: Origin::Window,
        }
    }

    pub(crate) fn out_of_data(at: usize) -> Self {
        Self::complete(TokenKind::OutOfData, at, at)
    }

    /// Length of the value range in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// `true` if the value range is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
