//! Chunked summarization with per-chunk fallback strategies.

use std::collections::HashMap;
use std::sync::Arc;

use studykit_core::config::SummaryConfig;
use studykit_core::{AbortError, CancelSignal};
use studykit_ingest::{chunk_text, ChunkConfig};
use studykit_llm::Compressor;
use tracing::{debug, warn};

use crate::analysis::sentences::{is_clean_sentence, segment};
use crate::analysis::text::{alpha_ratio, is_stopword, truncate_at_word, words};

/// Longest clean sentences kept per chunk by the extractive strategy.
const SENTENCES_PER_CHUNK: usize = 2;
/// Characters kept by the leading-slice strategy.
const LEADING_SLICE_CHARS: usize = 300;
/// Below this letter share a chunk is not worth quoting.
const MIN_SLICE_ALPHA_RATIO: f64 = 0.5;

/// Ways to condense one chunk, tried in order until one yields text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChunkStrategy {
    Abstractive,
    LongestSentences,
    LeadingSlice,
}

pub struct SummaryGenerator {
    compressor: Option<Arc<dyn Compressor>>,
    config: SummaryConfig,
}

impl SummaryGenerator {
    pub fn new(config: SummaryConfig, compressor: Option<Arc<dyn Compressor>>) -> Self {
        Self { compressor, config }
    }

    pub fn is_abstractive(&self) -> bool {
        self.compressor.is_some()
    }

    fn strategies(&self) -> Vec<ChunkStrategy> {
        let mut strategies = Vec::with_capacity(3);
        if self.compressor.is_some() {
            strategies.push(ChunkStrategy::Abstractive);
        }
        strategies.push(ChunkStrategy::LongestSentences);
        strategies.push(ChunkStrategy::LeadingSlice);
        strategies
    }

    /// Summarize `text` chunk by chunk.
    ///
    /// Cancellation is checked before every chunk, so no compression call is
    /// issued once `cancel` has fired.
    pub async fn summarize(&self, text: &str, cancel: &CancelSignal) -> Result<String, AbortError> {
        let chunks = chunk_text(text, &ChunkConfig::with_max_tokens(self.config.chunk_tokens));
        let strategies = self.strategies();

        let mut parts = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            cancel.check()?;
            for strategy in &strategies {
                if let Some(part) = self.apply(*strategy, &chunk.content, chunk.index).await {
                    parts.push(part);
                    break;
                }
            }
        }

        let combined = parts.join("\n\n");
        if combined.chars().count() >= self.config.min_chars {
            debug!(chunks = chunks.len(), chars = combined.len(), "summary assembled");
            return Ok(combined);
        }

        let fallback = extractive_summary(text, self.config.fallback_sentences);
        debug!(
            chunks = chunks.len(),
            chars = fallback.len(),
            "chunk summaries too short, using whole-document extract"
        );
        if fallback.chars().count() > combined.chars().count() {
            Ok(fallback)
        } else if !combined.is_empty() {
            Ok(combined)
        } else {
            Ok(truncate_at_word(text, LEADING_SLICE_CHARS))
        }
    }

    async fn apply(&self, strategy: ChunkStrategy, chunk: &str, index: usize) -> Option<String> {
        match strategy {
            ChunkStrategy::Abstractive => {
                let compressor = self.compressor.as_ref()?;
                match compressor.compress(chunk).await {
                    Ok(summary) => Some(summary),
                    Err(e) => {
                        warn!(chunk = index, error = %e, "abstractive compression failed, going extractive");
                        None
                    }
                }
            }
            ChunkStrategy::LongestSentences => longest_sentences(chunk, SENTENCES_PER_CHUNK),
            ChunkStrategy::LeadingSlice => {
                (alpha_ratio(chunk) >= MIN_SLICE_ALPHA_RATIO).then(|| truncate_at_word(chunk, LEADING_SLICE_CHARS))
            }
        }
    }
}

/// The `n` longest clean sentences of a chunk, in their original order.
fn longest_sentences(chunk: &str, n: usize) -> Option<String> {
    let clean: Vec<String> = segment(chunk).into_iter().filter(|s| is_clean_sentence(s)).collect();
    if clean.is_empty() {
        return None;
    }
    let mut ranked: Vec<usize> = (0..clean.len()).collect();
    ranked.sort_by_key(|&i| std::cmp::Reverse(clean[i].chars().count()));
    ranked.truncate(n);
    ranked.sort_unstable();
    Some(ranked.into_iter().map(|i| clean[i].as_str()).collect::<Vec<_>>().join(" "))
}

/// Top `n` clean sentences by mean content-word frequency, in document order.
pub fn extractive_summary(text: &str, n: usize) -> String {
    let sentences: Vec<String> = segment(text).into_iter().filter(|s| is_clean_sentence(s)).collect();

    let mut frequency: HashMap<String, usize> = HashMap::new();
    for sentence in &sentences {
        for word in words(sentence).filter(|w| !is_stopword(w)) {
            *frequency.entry(word.to_lowercase()).or_default() += 1;
        }
    }

    let score = |sentence: &str| -> f64 {
        let content: Vec<String> = words(sentence)
            .filter(|w| !is_stopword(w))
            .map(str::to_lowercase)
            .collect();
        if content.is_empty() {
            return 0.0;
        }
        let total: usize = content.iter().map(|w| frequency.get(w).copied().unwrap_or(0)).sum();
        total as f64 / content.len() as f64
    };

    let mut ranked: Vec<(usize, f64)> = sentences.iter().enumerate().map(|(i, s)| (i, score(s))).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.truncate(n);
    ranked.sort_by_key(|&(i, _)| i);

    ranked
        .into_iter()
        .map(|(i, _)| sentences[i].as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
