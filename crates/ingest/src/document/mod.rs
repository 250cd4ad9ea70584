pub mod chunker;
mod docx;
mod layout;
mod pdf;
mod sanitize;
mod txt;

use std::path::Path;
use std::time::Instant;

use serde::Serialize;
use studykit_core::config::ExtractionConfig;
use thiserror::Error;

pub use sanitize::sanitize;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MIME_DOC: &str = "application/msword";
pub const MIME_TEXT: &str = "text/plain";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),
    #[error("DOCX extraction failed: {0}")]
    Docx(String),
    #[error("Document returned insufficient text content ({chars} chars, need {min})")]
    InsufficientText { chars: usize, min: usize },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Extraction task crashed: {0}")]
    Crashed(String),
}

/// Source format, resolved from the declared MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Docx,
    Text,
}

impl DocumentKind {
    /// Anything that is not PDF or Word is read as text.
    pub fn from_mime(mime: &str) -> Self {
        let mime = mime.trim().to_ascii_lowercase();
        match mime.as_str() {
            MIME_PDF => DocumentKind::Pdf,
            MIME_DOCX | MIME_DOC => DocumentKind::Docx,
            _ => DocumentKind::Text,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Docx => "docx",
            DocumentKind::Text => "text",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Best-effort MIME type for a file path, by extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    match ext.as_str() {
        "pdf" => MIME_PDF,
        "docx" => MIME_DOCX,
        "doc" => MIME_DOC,
        _ => MIME_TEXT,
    }
}

/// Cleaned text of one document.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedText {
    text: String,
    kind: DocumentKind,
    /// Pages for PDFs, 1 for everything else.
    page_count: usize,
}

impl ExtractedText {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

impl AsRef<str> for ExtractedText {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for ExtractedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Extract text from document bytes using the default minimum length.
pub fn extract_text(bytes: &[u8], mime: &str) -> Result<ExtractedText, ExtractionError> {
    extract_text_with(bytes, mime, &ExtractionConfig::default())
}

/// Extract text from document bytes based on the declared MIME type.
pub fn extract_text_with(
    bytes: &[u8],
    mime: &str,
    config: &ExtractionConfig,
) -> Result<ExtractedText, ExtractionError> {
    let start = Instant::now();
    let kind = DocumentKind::from_mime(mime);
    tracing::debug!(%kind, bytes = bytes.len(), "extracting document");

    let (raw, page_count) = match kind {
        DocumentKind::Pdf => pdf::extract_pdf(bytes)?,
        DocumentKind::Docx => (docx::extract_docx(bytes)?, 1),
        DocumentKind::Text => (txt::extract_txt(bytes), 1),
    };

    let text = sanitize(&raw);
    let chars = text.chars().count();
    if chars < config.min_chars {
        return Err(ExtractionError::InsufficientText {
            chars,
            min: config.min_chars,
        });
    }

    tracing::info!(
        %kind,
        chars,
        pages = page_count,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "document extracted"
    );

    Ok(ExtractedText {
        text,
        kind,
        page_count,
    })
}
