//! Document chunking.
//!
//! Reference documents are split into consecutive, non-overlapping slices of
//! a fixed number of characters, in document order. Chunk ids increase
//! monotonically across documents so the corpus can grow append-only.

use serde::{Deserialize, Serialize};

/// Default chunk size in characters
pub const DEFAULT_CHUNK_SIZE: usize = 512;

/// A fixed-size slice of a reference document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub id: usize,
    pub text: String,
}

/// Split `text` into consecutive `chunk_size`-character slices.
///
/// The final slice may be shorter. Ids start at `next_id` and continue
/// upward, so loading a second document appends rather than replaces.
/// Slicing is by `char`, not byte, so multi-byte text never splits inside a
/// code point.
pub fn chunk_text(text: &str, chunk_size: usize, next_id: usize) -> Vec<DocumentChunk> {
    let chunk_size = chunk_size.max(1);
    let chars: Vec<char> = text.chars().collect();

    chars
        .chunks(chunk_size)
        .enumerate()
        .map(|(i, slice)| DocumentChunk {
            id: next_id + i,
            text: slice.iter().collect(),
        })
        .collect()
}
