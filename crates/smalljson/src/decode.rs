//! Decoding of raw token bytes.
//!
//! Unescaping never grows a value: every escape sequence is at least as long
//! as the bytes it stands for. That lets one routine serve both the copying
//! and the in-place variants, writing behind its read position.

use alloc::vec;

use bstr::BString;

use crate::error::DecodeError;

/// Bytes required to unescape `src`, including the terminating zero byte.
#[must_use]
pub fn unescape_buffer_len(src: &[u8]) -> usize {
    src.len() + 1
}

/// Unescape the raw bytes of a string token into `out` and append a zero
/// byte. Returns the length of the unescaped value, terminator excluded.
///
/// `\uXXXX` escapes are written as UTF-8. A high surrogate directly followed
/// by an escaped low surrogate is combined into one code point; any other
/// surrogate is encoded on its own, so the output is not guaranteed to be
/// valid UTF-8.
///
/// # Errors
///
/// `out` is shorter than [`unescape_buffer_len`], or `src` holds a broken
/// escape sequence.
pub fn unescape(src: &[u8], out: &mut [u8]) -> Result<usize, DecodeError> {
    let required = unescape_buffer_len(src);
    let Some(dest) = out.get_mut(..required) else {
        return Err(DecodeError::OutputTooSmall {
            required,
            capacity: out.len(),
        });
    };
    dest[..src.len()].copy_from_slice(src);
    unescape_in_place(dest, src.len())
}

/// Unescape `buf[..len]` over itself and write a zero byte after the result.
/// Returns the unescaped length.
///
/// # Errors
///
/// `buf` has no room past `len` for the terminator, or the value holds a
/// broken escape sequence. On error the contents of `buf` are unspecified.
pub fn unescape_in_place(buf: &mut [u8], len: usize) -> Result<usize, DecodeError> {
    if len >= buf.len() {
        return Err(DecodeError::OutputTooSmall {
            required: len + 1,
            capacity: buf.len(),
        });
    }

    let mut read = 0;
    let mut write = 0;
    while read < len {
        let c = buf[read];
        read += 1;
        if c != b'\\' {
            buf[write] = c;
            write += 1;
            continue;
        }

        let escape_at = read - 1;
        if read == len {
            return Err(DecodeError::DanglingEscape { offset: escape_at });
        }
        let e = buf[read];
        read += 1;
        let byte = match e {
            b'"' | b'\\' | b'/' => e,
            b'b' => 0x08,
            b'f' => 0x0C,
            b'n' => b'\n',
            b'r' => b'\r',
            b't' => b'\t',
            b'u' => {
                let mut code = hex4(&buf[..len], read)?;
                read += 4;
                if (0xD800..=0xDBFF).contains(&code) {
                    if let Some(low) = low_surrogate(&buf[..len], read) {
                        code = ((code & 0x3FF) << 10) + (low & 0x3FF) + 0x1_0000;
                        read += 6;
                    }
                }
                let mut utf8 = [0u8; 4];
                let n = encode_utf8(code, &mut utf8);
                buf[write..write + n].copy_from_slice(&utf8[..n]);
                write += n;
                continue;
            }
            other => {
                return Err(DecodeError::UnknownEscape {
                    byte: other,
                    offset: read - 1,
                });
            }
        };
        buf[write] = byte;
        write += 1;
    }

    buf[write] = 0;
    Ok(write)
}

/// Unescape into a fresh heap buffer. The result carries no terminator.
///
/// # Errors
///
/// `src` holds a broken escape sequence.
pub fn unescape_to_bstring(src: &[u8]) -> Result<BString, DecodeError> {
    let mut buf = vec![0u8; unescape_buffer_len(src)];
    let len = unescape(src, &mut buf)?;
    buf.truncate(len);
    Ok(BString::from(buf))
}

/// Compare raw token bytes with `expected`, without unescaping.
///
/// Only meaningful where escapes cannot occur, such as plain ASCII keys.
#[must_use]
pub fn fast_eq(raw: &[u8], expected: &[u8]) -> bool {
    raw.len() == expected.len() && raw == expected
}

/// Cut `src` before an escape sequence that runs off its end, so that a
/// value truncated mid-escape still decodes. A trailing high surrogate is
/// dropped too, since its low half may have been cut.
pub(crate) fn trim_partial_escape(src: &[u8]) -> &[u8] {
    let mut i = 0;
    let mut surrogate_at = None;
    while i < src.len() {
        if src[i] != b'\\' {
            i += 1;
            surrogate_at = None;
            continue;
        }
        let Some(&e) = src.get(i + 1) else {
            return &src[..surrogate_at.unwrap_or(i)];
        };
        if e != b'u' {
            i += 2;
            surrogate_at = None;
            continue;
        }
        if src.len() < i + 6 {
            return &src[..surrogate_at.unwrap_or(i)];
        }
        let Ok(code) = hex4(src, i + 2) else {
            return src;
        };
        surrogate_at = (0xD800..=0xDBFF).contains(&code).then_some(i);
        i += 6;
    }
    &src[..surrogate_at.unwrap_or(src.len())]
}

/// Parse an optional `-` followed by decimal digits.
///
/// Overflow is not detected; the value wraps.
///
/// # Errors
///
/// The input is empty, is a lone `-`, or contains any other byte.
pub fn parse_integer(raw: &[u8]) -> Result<i64, DecodeError> {
    let (negative, digits) = match raw.split_first() {
        Some((b'-', rest)) => (true, rest),
        _ => (false, raw),
    };
    if digits.is_empty() {
        return Err(DecodeError::EmptyInteger);
    }

    let offset = raw.len() - digits.len();
    let mut value: i64 = 0;
    for (i, &c) in digits.iter().enumerate() {
        if !c.is_ascii_digit() {
            return Err(DecodeError::InvalidDigit {
                byte: c,
                offset: offset + i,
            });
        }
        value = value.wrapping_mul(10).wrapping_add(i64::from(c - b'0'));
    }
    Ok(if negative { value.wrapping_neg() } else { value })
}

fn hex4(src: &[u8], at: usize) -> Result<u32, DecodeError> {
    let digits = src
        .get(at..at + 4)
        .ok_or(DecodeError::TruncatedUnicodeEscape { offset: at - 2 })?;
    let mut code = 0;
    for (i, &c) in digits.iter().enumerate() {
        let digit = char::from(c)
            .to_digit(16)
            .ok_or(DecodeError::InvalidHexDigit {
                byte: c,
                offset: at + i,
            })?;
        code = (code << 4) | digit;
    }
    Ok(code)
}

/// A well-formed `\uXXXX` low surrogate starting at `at`, if there is one.
fn low_surrogate(src: &[u8], at: usize) -> Option<u32> {
    if src.get(at..at + 2)? != b"\\u" {
        return None;
    }
    let low = hex4(src, at + 2).ok()?;
    (0xDC00..=0xDFFF).contains(&low).then_some(low)
}

#[allow(clippy::cast_possible_truncation)]
fn encode_utf8(code: u32, out: &mut [u8; 4]) -> usize {
    if code < 0x80 {
        out[0] = code as u8;
        1
    } else if code < 0x800 {
        out[0] = 0xC0 | (code >> 6) as u8;
        out[1] = 0x80 | (code & 0x3F) as u8;
        2
    } else if code < 0x1_0000 {
        out[0] = 0xE0 | (code >> 12) as u8;
        out[1] = 0x80 | ((code >> 6) & 0x3F) as u8;
        out[2] = 0x80 | (code & 0x3F) as u8;
        3
    } else {
        out[0] = 0xF0 | (code >> 18) as u8;
        out[1] = 0x80 | ((code >> 12) & 0x3F) as u8;
        out[2] = 0x80 | ((code >> 6) & 0x3F) as u8;
        out[3] = 0x80 | (code & 0x3F) as u8;
        4
    }
}
