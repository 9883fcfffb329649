use crate::common::{Chunk, Row};

/// Splits the rows into at most `parts` contiguous chunks of
/// ceil(len / parts) rows each; the final chunk holds the remainder.
/// Concatenated in order, the chunks rebuild the input exactly. An
/// empty input yields no chunks at all.
pub fn split_rows(rows: Vec<Row>, parts: usize) -> Vec<Chunk> {
    assert!(parts > 0);

    if rows.is_empty() {
        return Vec::new();
    }

    let chunk_size = rows.len().div_ceil(parts);
    let mut chunks = Vec::with_capacity(parts);
    let mut rest = rows;
    while !rest.is_empty() {
        let tail = rest.split_off(chunk_size.min(rest.len()));
        chunks.push(rest);
        rest = tail;
    }
    chunks
}
