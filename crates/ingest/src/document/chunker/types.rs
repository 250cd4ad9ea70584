//! Chunk configuration and output types.

// ── Configuration ───────────────────────────────────────────────────────────

/// Configuration for the chunking engine.
#[derive(Debug, Clone)]
pub struct ChunkConfig {
    /// Maximum tokens per chunk (default: 600).
    pub max_chunk_tokens: usize,
    /// Chunks below this many tokens are merged into a neighbour (default: 80).
    pub min_chunk_tokens: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_chunk_tokens: 600,
            min_chunk_tokens: 80,
        }
    }
}

impl ChunkConfig {
    /// Config targeting `max_tokens`, merging anything under a seventh of it.
    pub fn with_max_tokens(max_tokens: usize) -> Self {
        let max_chunk_tokens = max_tokens.max(1);
        Self {
            max_chunk_tokens,
            min_chunk_tokens: (max_chunk_tokens / 7).max(1),
        }
    }
}

// ── Chunk output ────────────────────────────────────────────────────────────

/// A chunk of text with its position in the source.
#[derive(Debug, Clone)]
pub struct Chunk {
    /// 0-based index within the document.
    pub index: usize,
    /// The chunk text content.
    pub content: String,
    /// Approximate character offset in the original text.
    pub char_offset: usize,
}
