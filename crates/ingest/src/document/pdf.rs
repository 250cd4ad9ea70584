use std::panic::{catch_unwind, AssertUnwindSafe};

use lopdf::Document;
use pdf_extract::{output_doc, MediaBox, OutputDev, OutputError, Transform};

use super::layout::{assemble_page, clean_pages, TextFragment, LINE_TOLERANCE};
use super::ExtractionError;

/// Horizontal gaps wider than this share of the font size split words.
const WORD_GAP_RATIO: f64 = 0.1;

/// Extract PDF text, returning `(text, page_count)`.
///
/// Glyphs are decoded by pdf-extract (font encodings, ToUnicode maps,
/// composite fonts) and positioned in page space, so lines and paragraphs
/// are rebuilt from where the text actually lands. If the layout pass fails,
/// the plain pdf-extract text stream is used instead.
pub fn extract_pdf(bytes: &[u8]) -> Result<(String, usize), ExtractionError> {
    match extract_with_layout(bytes) {
        Ok((pages, page_count)) => {
            tracing::debug!(pages = page_count, "PDF text reconstructed from layout");
            return Ok((clean_pages(&pages), page_count));
        }
        Err(e) => tracing::warn!(error = %e, "layout pass failed, using text stream"),
    }

    let text = guarded(|| pdf_extract::extract_text_from_mem(bytes))?;
    // pdf-extract separates pages with form feeds.
    let pages: Vec<String> = text.split('\x0C').map(str::to_string).collect();
    let page_count = pages.len().max(1);
    Ok((clean_pages(&pages), page_count))
}

fn extract_with_layout(bytes: &[u8]) -> Result<(Vec<String>, usize), ExtractionError> {
    let doc = Document::load_mem(bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))?;
    if doc.is_encrypted() {
        return Err(ExtractionError::Pdf("document is encrypted".into()));
    }
    let page_count = doc.get_pages().len();

    let mut collector = LayoutCollector::default();
    guarded(|| output_doc(&doc, &mut collector))?;
    Ok((collector.pages, page_count))
}

/// pdf-extract panics on some malformed inputs (missing MediaBox, broken
/// content streams); surface those as extraction errors.
fn guarded<T>(f: impl FnOnce() -> Result<T, OutputError>) -> Result<T, ExtractionError> {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result.map_err(|e| ExtractionError::Pdf(e.to_string())),
        Err(_) => Err(ExtractionError::Pdf("PDF parser panicked".into())),
    }
}

/// Run of glyphs being accumulated on one baseline.
struct OpenFragment {
    fragment: TextFragment,
    end_x: f64,
}

/// Collects decoded glyphs into positioned fragments, one page at a time.
#[derive(Default)]
struct LayoutCollector {
    fragments: Vec<TextFragment>,
    open: Option<OpenFragment>,
    pages: Vec<String>,
}

impl LayoutCollector {
    fn flush(&mut self) {
        if let Some(open) = self.open.take() {
            self.fragments.push(open.fragment);
        }
    }
}

/// Uniform scale of a transform (square root of its area factor).
fn scale_of(m: &Transform) -> f64 {
    (m.m11 * m.m22 - m.m12 * m.m21).abs().sqrt()
}

impl OutputDev for LayoutCollector {
    fn begin_page(
        &mut self,
        _page_num: u32,
        _media_box: &MediaBox,
        _art_box: Option<(f64, f64, f64, f64)>,
    ) -> Result<(), OutputError> {
        self.fragments.clear();
        self.open = None;
        Ok(())
    }

    fn end_page(&mut self) -> Result<(), OutputError> {
        self.flush();
        let fragments = std::mem::take(&mut self.fragments);
        self.pages.push(assemble_page(&fragments));
        Ok(())
    }

    fn output_character(
        &mut self,
        trm: &Transform,
        width: f64,
        spacing: f64,
        font_size: f64,
        ch: &str,
    ) -> Result<(), OutputError> {
        let scale = scale_of(trm);
        let size = font_size * scale;
        let (x, y) = (trm.m31, trm.m32);
        let advance = width * size + spacing * scale;

        let continues = self.open.as_ref().is_some_and(|open| {
            (open.fragment.y - y).abs() < LINE_TOLERANCE
                && x >= open.fragment.x
                && x <= open.end_x + size * WORD_GAP_RATIO
        });
        if continues {
            if let Some(open) = self.open.as_mut() {
                open.fragment.text.push_str(ch);
                open.end_x = x + advance;
            }
        } else {
            self.flush();
            self.open = Some(OpenFragment {
                fragment: TextFragment {
                    x,
                    y,
                    text: ch.to_string(),
                },
                end_x: x + advance,
            });
        }
        Ok(())
    }

    fn begin_word(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    fn end_word(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    fn end_line(&mut self) -> Result<(), OutputError> {
        Ok(())
    }
}
