//! Paragraph strategy: split oversized paragraphs, pack, then merge tiny tails.

use super::helpers::{merge_tiny, pack, split_oversized};
use super::types::{Chunk, ChunkConfig};

/// Chunk cleaned text into non-overlapping, paragraph-respecting pieces.
pub fn chunk_text(text: &str, config: &ChunkConfig) -> Vec<Chunk> {
    let pieces = split_oversized(text, config.max_chunk_tokens);
    let pieces = pack(pieces, config.max_chunk_tokens);
    let pieces = merge_tiny(pieces, config.min_chunk_tokens);

    let mut chunks = Vec::with_capacity(pieces.len());
    let mut char_offset = 0usize;
    for (index, content) in pieces.into_iter().enumerate() {
        let len = content.len();
        chunks.push(Chunk {
            index,
            content,
            char_offset,
        });
        // Advance by the raw length plus the paragraph separator.
        char_offset += len + 2;
    }
    chunks
}
