//! One constructor per question archetype.

use rand::seq::index;
use rand::Rng;
use studykit_core::{Answer, Archetype, QuizItem, QuizType};

use super::distractors::{distinct, option_text, pick, pick_tiered, term_tiers, MAX_OPTION_CHARS};
use super::falsify::falsify_statement;
use super::{single_answer, QuizBuilder, BLANK, MAX_DISTRACTORS};
use crate::analysis::text::{
    capitalize_first, contains_word_ci, find_word_ci, normalize_key, replace_all_ci,
    strip_terminal_punct, truncate_at_word,
};
use crate::analysis::{DefinitionEntry, FactStatement, ListGroup, ListRelation};

/// Most correct items shown in a multi-select question.
const MAX_CORRECT: usize = 4;
/// Total options in a multi-select question when enough outsiders exist.
const MULTI_SELECT_OPTIONS: usize = 6;
/// List items shown alongside the outsider in a NOT question.
const ODD_ONE_OUT_SHOWN: usize = 3;

impl<'s, 'r, R: Rng + ?Sized> QuizBuilder<'s, 'r, R> {
    pub(super) fn definition_mcq(&mut self, _index: usize, def: &'s DefinitionEntry) -> Option<QuizItem> {
        let topic = def.term.to_lowercase();
        if self.asked.contains(&topic) {
            return None;
        }

        let answer = option_text(&def.definition);
        let answer_key = normalize_key(&answer);
        let others: Vec<String> = self
            .src
            .definitions
            .iter()
            .filter(|other| !other.term.eq_ignore_ascii_case(&def.term))
            .map(|other| option_text(&other.definition))
            .filter(|text| normalize_key(text) != answer_key)
            .collect();
        let mut distractors = pick(&mut *self.rng, distinct(others), MAX_DISTRACTORS);

        if distractors.len() < MAX_DISTRACTORS {
            let taken: Vec<String> = distractors.iter().map(|d| normalize_key(d)).collect();
            let padding: Vec<String> = self
                .src
                .clean_sentences
                .iter()
                .filter(|s| **s != def.source_sentence && !contains_word_ci(s, &def.term))
                .map(|s| option_text(s))
                .filter(|text| {
                    let key = normalize_key(text);
                    key != answer_key && !taken.contains(&key)
                })
                .collect();
            let needed = MAX_DISTRACTORS - distractors.len();
            distractors.extend(pick(&mut *self.rng, distinct(padding), needed));
        }
        if distractors.is_empty() {
            return None;
        }

        self.asked.insert(topic);
        self.mark_used(&def.source_sentence);
        Some(single_answer(
            QuizType::Mcq,
            Archetype::Definition,
            format!("What {} {}?", copula(def), def.term),
            answer,
            distractors,
            format!("The text defines {} as {}.", def.term, strip_terminal_punct(&def.definition)),
        ))
    }

    pub(super) fn definition_blank(&mut self, _index: usize, def: &'s DefinitionEntry) -> Option<QuizItem> {
        let topic = def.term.to_lowercase();
        if self.asked.contains(&topic) {
            return None;
        }
        let masked = replace_all_ci(&def.source_sentence, &def.term, BLANK)?;
        let tiers = term_tiers(&self.src, &[def.term.as_str()], &masked);
        let distractors = pick_tiered(&mut *self.rng, tiers, MAX_DISTRACTORS);
        if distractors.is_empty() {
            return None;
        }

        self.asked.insert(topic);
        self.mark_used(&def.source_sentence);
        Some(single_answer(
            QuizType::FillBlank,
            Archetype::FillBlank,
            masked,
            def.term.clone(),
            distractors,
            format!("The complete sentence reads: \"{}\"", def.source_sentence),
        ))
    }

    /// Odd-indexed facts are negated when a substitution applies.
    pub(super) fn true_false(&mut self, index: usize, fact: &'s FactStatement) -> Option<QuizItem> {
        let falsified = if index % 2 == 1 {
            falsify_statement(&fact.sentence)
        } else {
            None
        };
        let (statement, truth, explanation) = match falsified {
            Some(statement) => (
                statement,
                "False",
                format!("The statement was altered. The text says: \"{}\"", fact.sentence),
            ),
            None => (
                fact.sentence.clone(),
                "True",
                format!("The text says: \"{}\"", fact.sentence),
            ),
        };

        self.mark_used(&fact.sentence);
        Some(QuizItem {
            kind: QuizType::TrueFalse,
            question: format!("True or False: {statement}"),
            options: vec!["True".to_string(), "False".to_string()],
            answer: Answer::Single(truth.to_string()),
            explanation,
            archetype: Archetype::TrueFalse,
        })
    }

    pub(super) fn multi_select(&mut self, _index: usize, group: &'s ListGroup) -> Option<QuizItem> {
        let correct = self.sample_items(group, MAX_CORRECT);
        let wanted = MULTI_SELECT_OPTIONS.saturating_sub(correct.len()).clamp(1, MAX_DISTRACTORS);
        let pool = self.outsiders(group);
        let distractors = pick_tiered(&mut *self.rng, pool, wanted);
        if distractors.is_empty() {
            return None;
        }

        let question = match group.relation {
            ListRelation::MembersOf => format!(
                "Which of the following are {}? (Select all that apply)",
                group.category
            ),
            ListRelation::Includes => format!(
                "Which of the following are included in {}? (Select all that apply)",
                group.category
            ),
        };
        let mut options = correct.clone();
        options.extend(distractors);
        Some(QuizItem {
            kind: QuizType::MultiSelect,
            question,
            options,
            answer: Answer::Multiple(correct),
            explanation: format!("The text lists {}: {}.", group.category, group.items.join(", ")),
            archetype: Archetype::MultiSelect,
        })
    }

    pub(super) fn reverse_definition(&mut self, _index: usize, def: &'s DefinitionEntry) -> Option<QuizItem> {
        let key = format!("reverse:{}", def.term.to_lowercase());
        if self.asked.contains(&key) {
            return None;
        }
        let tiers = term_tiers(&self.src, &[def.term.as_str()], &def.definition);
        let distractors = pick_tiered(&mut *self.rng, tiers, MAX_DISTRACTORS);
        if distractors.is_empty() {
            return None;
        }

        self.asked.insert(key);
        let shown = truncate_at_word(strip_terminal_punct(&def.definition), MAX_OPTION_CHARS);
        Some(single_answer(
            QuizType::Mcq,
            Archetype::ReverseDefinition,
            format!("Which term is defined as: \"{shown}\"?"),
            def.term.clone(),
            distractors,
            format!(
                "{} is defined as {}.",
                capitalize_first(&def.term),
                strip_terminal_punct(&def.definition)
            ),
        ))
    }

    pub(super) fn odd_one_out(&mut self, _index: usize, group: &'s ListGroup) -> Option<QuizItem> {
        let key = format!("not:{}", group.category.to_lowercase());
        if self.asked.contains(&key) {
            return None;
        }
        let pool = self.outsiders(group);
        let outsider = pick_tiered(&mut *self.rng, pool, 1).pop()?;
        let shown = self.sample_items(group, ODD_ONE_OUT_SHOWN);

        self.asked.insert(key);
        let question = match group.relation {
            ListRelation::MembersOf => {
                format!("Which of the following is NOT one of the {}?", group.category)
            }
            ListRelation::Includes => {
                format!("Which of the following is NOT included in {}?", group.category)
            }
        };
        let explanation = format!(
            "{} is not listed among {}. The text lists {}.",
            capitalize_first(&outsider),
            group.category,
            group.items.join(", ")
        );
        Some(single_answer(
            QuizType::Mcq,
            Archetype::OddOneOut,
            question,
            outsider,
            shown,
            explanation,
        ))
    }

    /// Up to `n` items of the group, in their listed order.
    fn sample_items(&mut self, group: &ListGroup, n: usize) -> Vec<String> {
        if group.items.len() <= n {
            return group.items.clone();
        }
        let mut picked = index::sample(&mut *self.rng, group.items.len(), n).into_vec();
        picked.sort_unstable();
        picked.into_iter().map(|i| group.items[i].clone()).collect()
    }

    /// Terms that belong neither to the group nor to its category.
    fn outsiders(&self, group: &ListGroup) -> [Vec<String>; 2] {
        let mut exclude: Vec<&str> = group.items.iter().map(String::as_str).collect();
        exclude.push(&group.category);
        term_tiers(&self.src, &exclude, &group.category)
    }
}

/// "is" or "are", following the verb the source sentence used after the term.
fn copula(def: &DefinitionEntry) -> &'static str {
    let plural = find_word_ci(&def.source_sentence, &def.term)
        .map(|(_, end)| def.source_sentence[end..].trim_start().to_lowercase())
        .is_some_and(|rest| ["are ", "refer ", "represent ", "mean "].iter().any(|v| rest.starts_with(v)));
    if plural {
        "are"
    } else {
        "is"
    }
}
