use alloc::vec::Vec;

/// Split `payload` into `parts` chunks of approximately equal size. Fewer
/// chunks are returned when `payload` is shorter than `parts`, and none when
/// it is empty.
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn produce_chunks(payload: &[u8], parts: usize) -> Vec<&[u8]> {
    assert!(parts > 0);
    let chunk_size = payload.len().div_ceil(parts).max(1);
    payload.chunks(chunk_size).collect()
}

/// Split `payload` at the given byte offsets. Offsets are clamped to the
/// payload and applied in ascending order, so the chunks always concatenate
/// back to `payload`; repeated or out-of-order offsets yield empty chunks.
#[must_use]
pub fn split_at<'a>(payload: &'a [u8], points: &[usize]) -> Vec<&'a [u8]> {
    let mut chunks = Vec::with_capacity(points.len() + 1);
    let mut start = 0;
    for &point in points {
        let end = point.clamp(start, payload.len());
        chunks.push(&payload[start..end]);
        start = end;
    }
    chunks.push(&payload[start..]);
    chunks
}
