//! Fill-blank questions sampled straight from clean sentences, used when
//! the mined structures cannot fill the quiz floor.

use std::collections::HashSet;

use rand::Rng;
use studykit_core::{Archetype, QuizItem, QuizType};

use super::distractors::{conflicts, distinct, pick, pick_tiered, term_tiers};
use super::{question_key, single_answer, QuizBuilder, BLANK, MAX_DISTRACTORS};
use crate::analysis::text::{is_stopword, normalize_key, replace_all_ci, words};

const MIN_NOUN_CHARS: usize = 4;
/// Shortest word from the sentence itself accepted as a distractor.
const MIN_OWN_WORD_CHARS: usize = 3;

/// Options used when the document offers nothing else to choose from.
const GENERIC_DISTRACTORS: [&str; 3] = ["Information not specified", "A secondary concept", "An unrelated variable"];

impl<'s, 'r, R: Rng + ?Sized> QuizBuilder<'s, 'r, R> {
    /// Up to `needed` sentence blanks whose question keys are not in `keys`.
    ///
    /// Sentences are visited at an even stride first so the questions spread
    /// across the document, then the remaining ones in order.
    pub(super) fn sentence_blanks(&mut self, needed: usize, keys: &mut HashSet<String>) -> Vec<QuizItem> {
        let candidates: Vec<&'s String> = self
            .src
            .clean_sentences
            .iter()
            .filter(|s| !self.used_sentences.contains(&normalize_key(s)))
            .collect();
        if needed == 0 || candidates.is_empty() {
            return Vec::new();
        }

        let stride = (candidates.len() / needed).max(1);
        let order = (0..stride).flat_map(|offset| (offset..candidates.len()).step_by(stride));

        let mut out = Vec::with_capacity(needed);
        for i in order {
            if out.len() >= needed {
                break;
            }
            let Some(item) = self.sentence_blank(candidates[i]) else {
                continue;
            };
            if keys.insert(question_key(&item.question)) {
                self.mark_used(candidates[i]);
                out.push(item);
            }
        }
        out
    }

    fn sentence_blank(&mut self, sentence: &str) -> Option<QuizItem> {
        let answer = leading_noun(sentence)?;
        let masked = replace_all_ci(sentence, &answer, BLANK)?;

        let tiers = term_tiers(&self.src, &[answer.as_str()], &masked);
        let mut distractors = pick_tiered(&mut *self.rng, tiers, MAX_DISTRACTORS);

        if distractors.is_empty() {
            // Other content words of the same sentence.
            let own: Vec<String> = words(sentence)
                .filter(|w| is_content_word(w, MIN_OWN_WORD_CHARS) && !conflicts(w, &answer))
                .map(str::to_lowercase)
                .collect();
            distractors = pick(&mut *self.rng, distinct(own), MAX_DISTRACTORS);
        }
        if distractors.is_empty() {
            distractors = GENERIC_DISTRACTORS.iter().map(|d| d.to_string()).collect();
        }

        Some(single_answer(
            QuizType::FillBlank,
            Archetype::SentenceBlank,
            masked,
            answer,
            distractors,
            format!("The complete sentence reads: \"{sentence}\""),
        ))
    }
}

/// First content word long enough to be worth asking about, settling for
/// shorter content words when the sentence has none.
fn leading_noun(sentence: &str) -> Option<String> {
    [MIN_NOUN_CHARS, MIN_OWN_WORD_CHARS]
        .into_iter()
        .find_map(|min| words(sentence).find(|w| is_content_word(w, min)))
        .map(str::to_string)
}

fn is_content_word(word: &str, min_chars: usize) -> bool {
    word.chars().count() >= min_chars && word.chars().all(char::is_alphabetic) && !is_stopword(word)
}
