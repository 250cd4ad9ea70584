//! Study kit synthesis: linguistic analysis, quiz and flashcard generation,
//! summarization, and the orchestrator that ties them together.

pub mod analysis;
pub mod flashcards;
pub mod orchestrator;
pub mod pipeline;
pub mod quiz;
pub mod summary;

pub use analysis::{analyze, Analysis, DefinitionEntry, FactKind, FactStatement, ListGroup, ListRelation};
pub use flashcards::{build_flashcards, FlashcardLimits};
pub use orchestrator::{generate_study_kit, StudyKitGenerator};
pub use pipeline::{extract_document, study_kit_from_document, PipelineError};
pub use quiz::{build_quiz, falsify_statement, QuizLimits, QuizSources};
pub use summary::{extractive_summary, SummaryGenerator};
