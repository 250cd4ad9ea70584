//! One request: text in, study kit out.

use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use studykit_core::config::{GeneratorConfig, SummaryConfig};
use studykit_core::{AbortError, CancelSignal, Config, Flashcard, QuizItem, StudyKit};
use studykit_llm::{shared_compressor, Compressor};
use tracing::{debug, error, info, warn};

use crate::analysis::analyze;
use crate::analysis::text::char_prefix;
use crate::flashcards::{build_flashcards, FlashcardLimits};
use crate::quiz::{build_quiz, QuizLimits, QuizSources};
use crate::summary::SummaryGenerator;

pub struct StudyKitGenerator {
    config: GeneratorConfig,
    summarizer: SummaryGenerator,
}

impl StudyKitGenerator {
    pub fn new(
        config: GeneratorConfig,
        summary_config: SummaryConfig,
        compressor: Option<Arc<dyn Compressor>>,
    ) -> Self {
        Self {
            config,
            summarizer: SummaryGenerator::new(summary_config, compressor),
        }
    }

    /// Build from config, reusing the process-wide compressor handle.
    pub async fn from_config(config: &Config) -> Self {
        let compressor = shared_compressor(&config.llm, &config.ollama).await;
        Self::new(config.generator.clone(), config.summary.clone(), compressor)
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate a study kit, enforcing the configured budget when one is set.
    pub async fn run(&self, text: &str, cancel: Option<&CancelSignal>) -> Result<StudyKit, AbortError> {
        match self.config.budget_secs {
            Some(secs) => self.generate_within(text, cancel, Duration::from_secs(secs)).await,
            None => self.generate(text, cancel).await,
        }
    }

    /// Summary and quiz/flashcard synthesis run concurrently and are joined
    /// before the kit is assembled.
    ///
    /// Returns `AbortError` when `cancel` fires. Any other failure, including
    /// a panic during synthesis, yields a degraded kit.
    pub async fn generate(&self, text: &str, cancel: Option<&CancelSignal>) -> Result<StudyKit, AbortError> {
        let start = Instant::now();
        let cancel = cancel.cloned().unwrap_or_default();
        cancel.check()?;

        let input: Arc<str> = Arc::from(char_prefix(text, self.config.max_input_chars));
        if input.len() < text.len() {
            debug!(
                chars = self.config.max_input_chars,
                "input capped before generation"
            );
        }

        let synthesis = {
            let input = Arc::clone(&input);
            let cancel = cancel.clone();
            let quiz_limits = QuizLimits::from(&self.config);
            let card_limits = FlashcardLimits::from(&self.config);
            tokio::task::spawn_blocking(move || synthesize(&input, &quiz_limits, &card_limits, &cancel))
        };
        let summary = self.summarizer.summarize(&input, &cancel);

        let (summary, synthesis) = tokio::join!(summary, synthesis);
        let summary = summary?;
        let (quiz, flashcards) = match synthesis {
            Ok(parts) => parts?,
            Err(e) => {
                error!(error = %e, "quiz and flashcard synthesis failed");
                return Ok(StudyKit::degraded("quiz and flashcard synthesis did not complete"));
            }
        };
        cancel.check()?;

        info!(
            chars = input.chars().count(),
            summary_chars = summary.chars().count(),
            quiz = quiz.len(),
            flashcards = flashcards.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "study kit generated"
        );
        Ok(StudyKit {
            summary,
            quiz,
            flashcards,
        })
    }

    /// Like [`generate`](Self::generate), but gives up after `budget` and
    /// returns a degraded kit.
    pub async fn generate_within(
        &self,
        text: &str,
        cancel: Option<&CancelSignal>,
        budget: Duration,
    ) -> Result<StudyKit, AbortError> {
        if let Some(cancel) = cancel {
            cancel.check()?;
        }
        // Internal signal so work still in flight stops once the budget runs out.
        let inner = CancelSignal::new();
        let caller = cancel.cloned();

        tokio::select! {
            result = tokio::time::timeout(budget, self.generate(text, Some(&inner))) => match result {
                Ok(kit) => kit,
                Err(_) => {
                    inner.cancel();
                    warn!(budget_secs = budget.as_secs_f64(), "study kit generation exceeded budget");
                    Ok(StudyKit::degraded("generation exceeded its time budget"))
                }
            },
            _ = wait_for_cancel(caller) => {
                inner.cancel();
                Err(AbortError)
            }
        }
    }
}

async fn wait_for_cancel(cancel: Option<CancelSignal>) {
    match cancel {
        Some(cancel) => cancel.cancelled().await,
        None => std::future::pending().await,
    }
}

/// CPU-bound half of a request: analysis, quiz and flashcards.
fn synthesize(
    text: &str,
    quiz_limits: &QuizLimits,
    card_limits: &FlashcardLimits,
    cancel: &CancelSignal,
) -> Result<(Vec<QuizItem>, Vec<Flashcard>), AbortError> {
    cancel.check()?;
    let analysis = analyze(text);
    cancel.check()?;

    let mut rng = StdRng::from_entropy();
    let quiz = build_quiz(&QuizSources::from(&analysis), quiz_limits, &mut rng);
    cancel.check()?;
    let flashcards = build_flashcards(&analysis.definitions, &analysis, card_limits);
    Ok((quiz, flashcards))
}

/// Generate a study kit with configuration read from the environment.
pub async fn generate_study_kit(text: &str, cancel: Option<&CancelSignal>) -> Result<StudyKit, AbortError> {
    let config = Config::from_env();
    StudyKitGenerator::from_config(&config).await.run(text, cancel).await
}
