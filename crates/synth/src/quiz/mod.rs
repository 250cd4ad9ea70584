//! Quiz synthesis from mined definitions, facts and lists.
//!
//! Six archetypes take turns, each drawing from its own cursor over the
//! source material, so a quiz mixes question shapes even when one source
//! dominates. Topics already asked by an mcq or fill-blank are skipped by
//! both; reverse and NOT questions track their own keys.

mod archetypes;
mod distractors;
mod fallback;
mod falsify;
#[cfg(test)]
mod tests;

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use studykit_core::config::GeneratorConfig;
use studykit_core::{Answer, Archetype, QuizItem, QuizType};
use tracing::debug;

use crate::analysis::text::{char_prefix, normalize_key};
use crate::analysis::{Analysis, DefinitionEntry, FactStatement, ListGroup};

pub use falsify::falsify_statement;

pub(crate) const BLANK: &str = "_____";
pub(crate) const MAX_DISTRACTORS: usize = 3;
const DEDUP_PREFIX_CHARS: usize = 60;
/// Candidates generated per allowed item before dedup and truncation.
const OVERGENERATION: usize = 2;

const ROUND: [Archetype; 6] = [
    Archetype::Definition,
    Archetype::FillBlank,
    Archetype::TrueFalse,
    Archetype::MultiSelect,
    Archetype::ReverseDefinition,
    Archetype::OddOneOut,
];

/// Mined material the quiz draws from.
#[derive(Debug, Clone, Copy)]
pub struct QuizSources<'a> {
    pub definitions: &'a [DefinitionEntry],
    pub facts: &'a [FactStatement],
    pub lists: &'a [ListGroup],
    pub terms: &'a [String],
    pub clean_sentences: &'a [String],
}

impl<'a> From<&'a Analysis> for QuizSources<'a> {
    fn from(analysis: &'a Analysis) -> Self {
        Self {
            definitions: &analysis.definitions,
            facts: &analysis.facts,
            lists: &analysis.lists,
            terms: &analysis.terms,
            clean_sentences: &analysis.clean_sentences,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizLimits {
    pub max_items: usize,
    /// Below this, sentence blanks top the quiz up.
    pub min_items: usize,
}

impl Default for QuizLimits {
    fn default() -> Self {
        Self {
            max_items: 20,
            min_items: 5,
        }
    }
}

impl From<&GeneratorConfig> for QuizLimits {
    fn from(config: &GeneratorConfig) -> Self {
        Self {
            max_items: config.quiz_max_items,
            min_items: config.quiz_min_items.min(config.quiz_max_items),
        }
    }
}

/// Build a deduplicated, capped quiz with shuffled options.
pub fn build_quiz<R: Rng + ?Sized>(
    sources: &QuizSources<'_>,
    limits: &QuizLimits,
    rng: &mut R,
) -> Vec<QuizItem> {
    let mut builder = QuizBuilder::new(*sources, rng);
    let mut items = builder.interleave(limits.max_items.saturating_mul(OVERGENERATION));

    let mut keys = HashSet::new();
    items.retain(|item| keys.insert(question_key(&item.question)));

    if items.len() < limits.min_items {
        let needed = limits.min_items - items.len();
        let extra = builder.sentence_blanks(needed, &mut keys);
        debug!(needed, added = extra.len(), "quiz below floor, sampling sentences");
        items.extend(extra);
    }

    items.truncate(limits.max_items);
    for item in &mut items {
        item.options.shuffle(&mut *builder.rng);
    }

    debug!(
        items = items.len(),
        mcq = count(&items, QuizType::Mcq),
        fill_blank = count(&items, QuizType::FillBlank),
        true_false = count(&items, QuizType::TrueFalse),
        multi_select = count(&items, QuizType::MultiSelect),
        "quiz built"
    );
    items
}

fn count(items: &[QuizItem], kind: QuizType) -> usize {
    items.iter().filter(|i| i.kind == kind).count()
}

/// Normalized question prefix used for deduplication.
pub(crate) fn question_key(question: &str) -> String {
    char_prefix(&normalize_key(question), DEDUP_PREFIX_CHARS).to_string()
}

pub(crate) struct QuizBuilder<'s, 'r, R: Rng + ?Sized> {
    src: QuizSources<'s>,
    rng: &'r mut R,
    asked: HashSet<String>,
    cursors: [usize; ROUND.len()],
    /// Normalized source sentences already turned into questions.
    used_sentences: HashSet<String>,
}

impl<'s, 'r, R: Rng + ?Sized> QuizBuilder<'s, 'r, R> {
    fn new(src: QuizSources<'s>, rng: &'r mut R) -> Self {
        Self {
            src,
            rng,
            asked: HashSet::new(),
            cursors: [0; ROUND.len()],
            used_sentences: HashSet::new(),
        }
    }

    /// Round-robin over the archetypes until every cursor is exhausted or
    /// `limit` items exist.
    fn interleave(&mut self, limit: usize) -> Vec<QuizItem> {
        let mut items = Vec::new();
        loop {
            let mut progressed = false;
            for (slot, archetype) in ROUND.iter().enumerate() {
                if items.len() >= limit {
                    return items;
                }
                if let Some(item) = self.next_item(slot, *archetype) {
                    items.push(item);
                    progressed = true;
                }
            }
            if !progressed {
                return items;
            }
        }
    }

    fn next_item(&mut self, slot: usize, archetype: Archetype) -> Option<QuizItem> {
        let definitions = self.src.definitions;
        let facts = self.src.facts;
        let lists = self.src.lists;
        match archetype {
            Archetype::Definition => self.advance(slot, definitions, Self::definition_mcq),
            Archetype::FillBlank => self.advance(slot, definitions, Self::definition_blank),
            Archetype::TrueFalse => self.advance(slot, facts, Self::true_false),
            Archetype::MultiSelect => self.advance(slot, lists, Self::multi_select),
            Archetype::ReverseDefinition => self.advance(slot, definitions, Self::reverse_definition),
            Archetype::OddOneOut => self.advance(slot, lists, Self::odd_one_out),
            Archetype::SentenceBlank => None,
        }
    }

    /// Move this archetype's cursor forward until one entry yields a question.
    fn advance<T>(
        &mut self,
        slot: usize,
        source: &'s [T],
        build: fn(&mut Self, usize, &'s T) -> Option<QuizItem>,
    ) -> Option<QuizItem> {
        while let Some(entry) = source.get(self.cursors[slot]) {
            let index = self.cursors[slot];
            self.cursors[slot] += 1;
            if let Some(item) = build(self, index, entry) {
                return Some(item);
            }
        }
        None
    }

    fn mark_used(&mut self, sentence: &str) {
        self.used_sentences.insert(normalize_key(sentence));
    }
}

/// A single-answer item with the answer listed first; options are shuffled later.
pub(crate) fn single_answer(
    kind: QuizType,
    archetype: Archetype,
    question: String,
    answer: String,
    distractors: Vec<String>,
    explanation: String,
) -> QuizItem {
    let mut options = Vec::with_capacity(distractors.len() + 1);
    options.push(answer.clone());
    options.extend(distractors);
    QuizItem {
        kind,
        question,
        options,
        answer: Answer::Single(answer),
        explanation,
        archetype,
    }
}
