//! Paragraph-respecting chunking.
//!
//! Splits cleaned text into consecutive, non-overlapping chunks near a target
//! token count, used to feed one compression pass per chunk.

mod helpers;
mod strategies;
mod types;

pub use helpers::count_tokens;
pub use strategies::chunk_text;
pub use types::{Chunk, ChunkConfig};
