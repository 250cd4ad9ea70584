//! Flashcard deck from mined definitions, topped up with definitional
//! sentences about frequent terms.

use std::collections::HashSet;

use studykit_core::config::GeneratorConfig;
use studykit_core::Flashcard;
use tracing::debug;

use crate::analysis::patterns::DEFINITIONAL_VERB;
use crate::analysis::text::{as_sentence, capitalize_first, contains_word_ci, substantive_word_count, word_count};
use crate::analysis::{Analysis, DefinitionEntry};

const MIN_BACK_CHARS: usize = 30;
const MIN_BACK_WORDS: usize = 5;
const MIN_SECONDARY_TERM_CHARS: usize = 4;
const MAX_FRONT_WORDS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashcardLimits {
    pub max_cards: usize,
    /// The secondary source is used only while the deck is below this.
    pub min_cards: usize,
}

impl Default for FlashcardLimits {
    fn default() -> Self {
        Self {
            max_cards: 15,
            min_cards: 10,
        }
    }
}

impl From<&GeneratorConfig> for FlashcardLimits {
    fn from(config: &GeneratorConfig) -> Self {
        Self {
            max_cards: config.flashcard_max,
            min_cards: config.flashcard_min.min(config.flashcard_max),
        }
    }
}

/// Rejects fragment-quality backs.
pub fn is_substantive_back(back: &str) -> bool {
    back.chars().count() >= MIN_BACK_CHARS && substantive_word_count(back) >= MIN_BACK_WORDS
}

pub fn build_flashcards(
    definitions: &[DefinitionEntry],
    analysis: &Analysis,
    limits: &FlashcardLimits,
) -> Vec<Flashcard> {
    let mut fronts = HashSet::new();
    let mut cards = Vec::new();

    for def in definitions {
        if cards.len() >= limits.max_cards {
            break;
        }
        let back = as_sentence(&def.definition);
        if is_substantive_back(&back) && fronts.insert(def.term.to_lowercase()) {
            cards.push(Flashcard {
                front: capitalize_first(&def.term),
                back,
            });
        }
    }
    let primary = cards.len();

    for term in &analysis.terms {
        if cards.len() >= limits.min_cards.min(limits.max_cards) {
            break;
        }
        if term.chars().count() < MIN_SECONDARY_TERM_CHARS
            || word_count(term) > MAX_FRONT_WORDS
            || fronts.contains(&term.to_lowercase())
        {
            continue;
        }
        let Some(sentence) = analysis
            .clean_sentences
            .iter()
            .find(|s| contains_word_ci(s, term) && DEFINITIONAL_VERB.is_match(s))
        else {
            continue;
        };
        if is_substantive_back(sentence) && fronts.insert(term.to_lowercase()) {
            cards.push(Flashcard {
                front: capitalize_first(term),
                back: sentence.clone(),
            });
        }
    }

    debug!(primary, secondary = cards.len() - primary, "flashcards built");
    cards
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;

    #[test]
    fn definitions_become_cards() {
        let text = "The mitochondrion is an organelle that produces chemical energy for the cell. \
                    Glucose is a sugar.";
        let analysis = analyze(text);
        let cards = build_flashcards(&analysis.definitions, &analysis, &FlashcardLimits::default());
        assert_eq!(cards[0].front, "Mitochondrion");
        assert_eq!(cards[0].back, "An organelle that produces chemical energy for the cell.");
        assert!(cards.iter().all(|c| c.front != "Glucose"));
    }

    #[test]
    fn backs_pass_the_quality_gate() {
        assert!(is_substantive_back("A protein that speeds up chemical reactions."));
        assert!(!is_substantive_back("A sugar."));
        assert!(!is_substantive_back("It is a big one of us."));
    }

    #[test]
    fn secondary_source_needs_a_definitional_verb() {
        let analysis = Analysis {
            terms: vec!["enzyme".into(), "catalysis".into()],
            clean_sentences: vec![
                "Each enzyme works best within a narrow temperature range.".into(),
                "In catalysis the enzyme is a protein that lowers activation energy.".into(),
            ],
            ..Analysis::default()
        };
        let cards = build_flashcards(&[], &analysis, &FlashcardLimits::default());
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].front, "Enzyme");
        assert!(cards[0].back.starts_with("In catalysis"));
        assert_eq!(cards[1].front, "Catalysis");
    }

    #[test]
    fn fronts_are_unique_and_capped() {
        let definitions: Vec<DefinitionEntry> = (0..30)
            .map(|i| DefinitionEntry {
                term: if i % 2 == 0 { "Osmosis".into() } else { format!("Term{i}") },
                definition: format!("a long enough definition about subject number {i} here"),
                source_sentence: String::new(),
            })
            .collect();
        let cards = build_flashcards(&definitions, &Analysis::default(), &FlashcardLimits::default());
        assert_eq!(cards.len(), 15);
        let fronts: HashSet<String> = cards.iter().map(|c| c.front.to_lowercase()).collect();
        assert_eq!(fronts.len(), cards.len());
    }
}
