mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use studykit_core::config::{GeneratorConfig, SummaryConfig};
use studykit_core::{AbortError, CancelSignal};
use studykit_llm::Compressor;
use studykit_synth::StudyKitGenerator;

use common::{generator_with, long_document, CountingCompressor, LECTURE};

fn small_chunks(compressor: Arc<CountingCompressor>) -> StudyKitGenerator {
    let summary = SummaryConfig {
        chunk_tokens: 100,
        ..SummaryConfig::default()
    };
    StudyKitGenerator::new(GeneratorConfig::default(), summary, Some(compressor as Arc<dyn Compressor>))
}

#[tokio::test]
async fn cancelled_request_makes_no_compression_calls() {
    let compressor = CountingCompressor::new();
    let generator = generator_with(Some(compressor.clone()));
    let cancel = CancelSignal::new();
    cancel.cancel();

    let result = generator.generate(LECTURE, Some(&cancel)).await;
    assert_eq!(result, Err(AbortError));
    assert_eq!(compressor.calls(), 0);
}

#[tokio::test]
async fn cancelling_mid_summary_stops_at_the_next_chunk() {
    let cancel = CancelSignal::new();
    let compressor = CountingCompressor::cancelling(cancel.clone());
    let generator = small_chunks(compressor.clone());

    let result = generator.generate(&long_document(20), Some(&cancel)).await;
    assert_eq!(result, Err(AbortError));
    assert_eq!(compressor.calls(), 1);
}

#[tokio::test]
async fn every_chunk_is_compressed_when_left_alone() {
    let compressor = CountingCompressor::new();
    let generator = small_chunks(compressor.clone());

    let kit = generator.generate(&long_document(20), None).await.unwrap();
    assert!(compressor.calls() > 1);
    assert!(!kit.summary.is_empty());
    assert!(!kit.is_degraded());
}

#[tokio::test]
async fn budget_overrun_returns_a_degraded_kit() {
    let compressor = CountingCompressor::stalling(Duration::from_secs(30));
    let generator = generator_with(Some(compressor.clone()));

    let start = Instant::now();
    let kit = generator
        .generate_within(LECTURE, None, Duration::from_millis(100))
        .await
        .unwrap();
    assert!(start.elapsed() < Duration::from_secs(10));
    assert!(kit.is_degraded());
    assert!(kit.quiz.is_empty());
    assert!(kit.flashcards.is_empty());
    assert!(compressor.calls() <= 1);
}

#[tokio::test]
async fn caller_cancel_wins_over_budget() {
    let compressor = CountingCompressor::stalling(Duration::from_secs(30));
    let generator = generator_with(Some(compressor));
    let cancel = CancelSignal::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let result = generator
        .generate_within(LECTURE, Some(&cancel), Duration::from_secs(20))
        .await;
    assert_eq!(result, Err(AbortError));
}

#[tokio::test]
async fn run_applies_the_configured_budget() {
    let compressor = CountingCompressor::stalling(Duration::from_secs(30));
    let config = GeneratorConfig {
        budget_secs: Some(1),
        ..GeneratorConfig::default()
    };
    let generator = StudyKitGenerator::new(
        config,
        SummaryConfig::default(),
        Some(compressor as Arc<dyn Compressor>),
    );
    let kit = generator.run(LECTURE, None).await.unwrap();
    assert!(kit.is_degraded());
}
