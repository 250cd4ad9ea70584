//! Document bytes to study kit.

use studykit_core::config::ExtractionConfig;
use studykit_core::{AbortError, CancelSignal, StudyKit};
use studykit_ingest::{extract_text_with, ExtractedText, ExtractionError};
use thiserror::Error;

use crate::orchestrator::StudyKitGenerator;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    Aborted(#[from] AbortError),
}

/// Extract text on the blocking pool; parser panics surface as extraction errors.
pub async fn extract_document(
    bytes: Vec<u8>,
    mime: &str,
    config: &ExtractionConfig,
) -> Result<ExtractedText, ExtractionError> {
    let mime = mime.to_string();
    let config = config.clone();
    tokio::task::spawn_blocking(move || extract_text_with(&bytes, &mime, &config))
        .await
        .map_err(|e| ExtractionError::Crashed(e.to_string()))?
}

/// Extract a document and generate its study kit.
pub async fn study_kit_from_document(
    generator: &StudyKitGenerator,
    bytes: Vec<u8>,
    mime: &str,
    extraction: &ExtractionConfig,
    cancel: Option<&CancelSignal>,
) -> Result<StudyKit, PipelineError> {
    if let Some(cancel) = cancel {
        cancel.check()?;
    }
    let extracted = extract_document(bytes, mime, extraction).await?;
    tracing::debug!(
        kind = %extracted.kind(),
        pages = extracted.page_count(),
        chars = extracted.char_count(),
        "document ready for generation"
    );
    Ok(generator.run(extracted.as_str(), cancel).await?)
}
