use serde::{Deserialize, Serialize};

/// Question type as persisted by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizType {
    Mcq,
    FillBlank,
    TrueFalse,
    MultiSelect,
}

impl std::fmt::Display for QuizType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuizType::Mcq => write!(f, "mcq"),
            QuizType::FillBlank => write!(f, "fill_blank"),
            QuizType::TrueFalse => write!(f, "true_false"),
            QuizType::MultiSelect => write!(f, "multi_select"),
        }
    }
}

/// How a question was constructed. Reverse and NOT questions are still
/// emitted as `mcq`; the archetype is bookkeeping for the generator and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Archetype {
    #[default]
    Definition,
    FillBlank,
    TrueFalse,
    MultiSelect,
    ReverseDefinition,
    OddOneOut,
    SentenceBlank,
}

/// A single answer or a set of answers (multi-select).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Single(String),
    Multiple(Vec<String>),
}

impl Answer {
    /// Answer values as a slice-like list.
    pub fn values(&self) -> Vec<&str> {
        match self {
            Answer::Single(s) => vec![s.as_str()],
            Answer::Multiple(v) => v.iter().map(|s| s.as_str()).collect(),
        }
    }

    pub fn as_single(&self) -> Option<&str> {
        match self {
            Answer::Single(s) => Some(s.as_str()),
            Answer::Multiple(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizItem {
    #[serde(rename = "type")]
    pub kind: QuizType,
    pub question: String,
    pub options: Vec<String>,
    pub answer: Answer,
    pub explanation: String,
    #[serde(skip)]
    pub archetype: Archetype,
}

impl QuizItem {
    /// True when every answer value is one of the options and, for
    /// single-answer types, exactly one value is given.
    pub fn is_well_formed(&self) -> bool {
        let answers = self.answer.values();
        if answers.is_empty() {
            return false;
        }
        let single = !matches!(self.kind, QuizType::MultiSelect);
        if single && self.answer.as_single().is_none() {
            return false;
        }
        answers
            .iter()
            .all(|a| self.options.iter().any(|o| o == a))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

/// The record handed to the caller for persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyKit {
    pub summary: String,
    pub quiz: Vec<QuizItem>,
    pub flashcards: Vec<Flashcard>,
}

impl StudyKit {
    /// Kit returned when synthesis fails for a reason other than cancellation.
    pub fn degraded(reason: &str) -> Self {
        Self {
            summary: format!("Analysis failed: {reason}"),
            quiz: Vec::new(),
            flashcards: Vec::new(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.quiz.is_empty() && self.flashcards.is_empty() && self.summary.starts_with("Analysis failed")
    }
}
