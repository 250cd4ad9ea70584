pub mod document;

pub use document::chunker::{chunk_text, Chunk, ChunkConfig};
pub use document::{
    extract_text, extract_text_with, mime_for_path, DocumentKind, ExtractedText, ExtractionError,
};
