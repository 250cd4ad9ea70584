#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use studykit_core::config::{GeneratorConfig, SummaryConfig};
use studykit_core::CancelSignal;
use studykit_llm::{Compressor, LlmError};
use studykit_synth::StudyKitGenerator;

pub const LECTURE: &str = "\
Cell Biology

The cell is the basic unit of structure in all living organisms. The nucleus is a membrane-bound \
organelle that stores the genetic material of the cell. Every cell is surrounded by a plasma membrane.

The mitochondrion is an organelle that produces chemical energy for the cell. The ribosome is a small \
structure that assembles proteins from amino acids. Plant cells can produce glucose through photosynthesis.

Osmosis is the movement of water across a semipermeable membrane. Animal cells cannot perform \
photosynthesis without chloroplasts. Diffusion is faster in gases than in liquids.

The main types of cell division are mitosis, meiosis, and binary fission.

The stages of mitosis are:
- Prophase: chromosomes condense
- Metaphase: chromosomes line up
- Anaphase: chromatids separate
- Telophase: nuclei reform";

/// Compressor that counts calls and can fire a cancel signal or stall.
pub struct CountingCompressor {
    pub calls: AtomicUsize,
    cancel_on_call: Option<CancelSignal>,
    delay: Option<Duration>,
}

impl CountingCompressor {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            cancel_on_call: None,
            delay: None,
        })
    }

    pub fn cancelling(signal: CancelSignal) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            cancel_on_call: Some(signal),
            delay: None,
        })
    }

    pub fn stalling(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            cancel_on_call: None,
            delay: Some(delay),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Compressor for CountingCompressor {
    async fn compress(&self, chunk: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(signal) = &self.cancel_on_call {
            signal.cancel();
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let words: Vec<&str> = chunk.split_whitespace().take(30).collect();
        Ok(words.join(" "))
    }
}

pub fn generator_with(compressor: Option<Arc<CountingCompressor>>) -> StudyKitGenerator {
    StudyKitGenerator::new(
        GeneratorConfig::default(),
        SummaryConfig::default(),
        compressor.map(|c| c as Arc<dyn Compressor>),
    )
}

/// Many short paragraphs so the summarizer sees several chunks.
pub fn long_document(paragraphs: usize) -> String {
    (0..paragraphs)
        .map(|i| {
            format!(
                "Section {i} explains how the enzyme catalase breaks down hydrogen peroxide into water and oxygen. \
                 The reaction rate rises with temperature until the protein begins to denature at high heat. \
                 Researchers measured the oxygen released in trial {i} to compare reaction speeds carefully."
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
