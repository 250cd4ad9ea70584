use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;
use studykit_core::{Answer, Archetype, QuizItem, QuizType};

use super::*;
use crate::analysis::analyze;

const BIOLOGY: &str = "\
The cell is the basic unit of structure in all living organisms. \
The nucleus is a membrane-bound organelle that stores the genetic material of the cell. \
The mitochondrion is an organelle that produces chemical energy for the cell. \
The ribosome is a small structure that assembles proteins from amino acids. \
Osmosis is the movement of water across a semipermeable membrane. \
Plant cells can produce glucose through photosynthesis. \
Animal cells cannot perform photosynthesis without chloroplasts. \
Diffusion is faster in gases than in liquids. \
The main types of cell division are mitosis, meiosis, and binary fission.";

fn quiz_for(text: &str, seed: u64) -> Vec<QuizItem> {
    let analysis = analyze(text);
    let mut rng = StdRng::seed_from_u64(seed);
    build_quiz(&QuizSources::from(&analysis), &QuizLimits::default(), &mut rng)
}

fn has_distinct_options(item: &QuizItem) -> bool {
    let keys: HashSet<String> = item.options.iter().map(|o| normalize_key(o)).collect();
    keys.len() == item.options.len()
}

#[test]
fn every_item_is_well_formed() {
    let quiz = quiz_for(BIOLOGY, 1);
    assert!(quiz.len() >= 5, "only {} items", quiz.len());
    for item in &quiz {
        assert!(item.is_well_formed(), "{item:?}");
        assert!(has_distinct_options(item), "{item:?}");
        match item.kind {
            QuizType::TrueFalse => assert_eq!(item.options.len(), 2),
            QuizType::MultiSelect => {
                assert!(matches!(&item.answer, Answer::Multiple(a) if !a.is_empty()));
                assert!(item.options.len() > item.answer.values().len());
            }
            _ => assert!(item.options.len() >= 2),
        }
    }
}

#[test]
fn interleaves_archetypes() {
    let quiz = quiz_for(BIOLOGY, 2);
    let archetypes: HashSet<Archetype> = quiz.iter().map(|q| q.archetype).collect();
    for expected in [
        Archetype::Definition,
        Archetype::FillBlank,
        Archetype::TrueFalse,
        Archetype::MultiSelect,
        Archetype::ReverseDefinition,
        Archetype::OddOneOut,
    ] {
        assert!(archetypes.contains(&expected), "missing {expected:?}");
    }
    assert_eq!(quiz[0].archetype, Archetype::Definition);
    assert_eq!(quiz[1].archetype, Archetype::FillBlank);
}

#[test]
fn mcq_and_fill_blank_never_share_a_topic() {
    let quiz = quiz_for(BIOLOGY, 3);
    let mcq_topics: HashSet<String> = quiz
        .iter()
        .filter(|q| q.archetype == Archetype::Definition)
        .map(|q| q.question.trim_start_matches("What is ").trim_end_matches('?').to_lowercase())
        .collect();
    for blank in quiz.iter().filter(|q| q.archetype == Archetype::FillBlank) {
        let answer = blank.answer.as_single().unwrap().to_lowercase();
        assert!(!mcq_topics.contains(&answer), "{answer} asked twice");
    }
}

#[test]
fn questions_are_unique_by_key() {
    let quiz = quiz_for(BIOLOGY, 4);
    let keys: HashSet<String> = quiz.iter().map(|q| question_key(&q.question)).collect();
    assert_eq!(keys.len(), quiz.len());
}

#[test]
fn structure_is_stable_across_runs() {
    let a = quiz_for(BIOLOGY, 10);
    let b = quiz_for(BIOLOGY, 99);
    let shape = |quiz: &[QuizItem]| -> Vec<(Archetype, String)> {
        quiz.iter().map(|q| (q.archetype, q.question.clone())).collect()
    };
    assert_eq!(shape(&a), shape(&b));
}

#[test]
fn respects_item_cap() {
    let text = (0..40)
        .map(|i| format!("Concept{} is a distinct idea that researchers describe in chapter number {i}.", char::from(b'a' + (i % 26) as u8)))
        .collect::<Vec<_>>()
        .join(" ");
    let analysis = analyze(&text);
    let limits = QuizLimits {
        max_items: 7,
        min_items: 5,
    };
    let mut rng = StdRng::seed_from_u64(5);
    let quiz = build_quiz(&QuizSources::from(&analysis), &limits, &mut rng);
    assert!(quiz.len() <= 7);
}

#[test]
fn floor_fallback_uses_plain_sentences() {
    let text = "Rivers carry sediment from mountains toward the distant sea. \
                Glaciers carve deep valleys into ancient granite mountains. \
                Wind moves sand across wide desert plains every season.";
    let quiz = quiz_for(text, 6);
    assert!(!quiz.is_empty());
    for item in &quiz {
        assert!(item.is_well_formed());
        if item.archetype == Archetype::SentenceBlank {
            assert_eq!(item.kind, QuizType::FillBlank);
            assert!(item.question.contains(BLANK));
        }
    }
    assert!(quiz.iter().any(|q| q.archetype == Archetype::SentenceBlank));
}

#[test]
fn empty_material_yields_empty_quiz() {
    assert!(quiz_for("", 0).is_empty());
}

#[test]
fn limits_follow_config() {
    let config = GeneratorConfig {
        quiz_max_items: 3,
        quiz_min_items: 5,
        ..GeneratorConfig::default()
    };
    let limits = QuizLimits::from(&config);
    assert_eq!(limits.max_items, 3);
    assert_eq!(limits.min_items, 3);
}

#[test]
fn single_sentence_still_yields_a_question() {
    let quiz = quiz_for("The elephant ran by the old red car.", 7);
    let item = quiz
        .iter()
        .find(|q| q.archetype == Archetype::SentenceBlank)
        .expect("sentence blank");
    assert_eq!(item.answer.as_single(), Some("elephant"));
    assert!(item.is_well_formed());
    assert!(item.options.len() >= 2);
}

#[test]
fn generic_options_when_the_document_offers_none() {
    let clean = vec!["Elephants, elephants and more elephants were there too.".to_string()];
    let src = QuizSources {
        definitions: &[],
        facts: &[],
        lists: &[],
        terms: &[],
        clean_sentences: &clean,
    };
    let mut rng = StdRng::seed_from_u64(8);
    let quiz = build_quiz(&src, &QuizLimits::default(), &mut rng);
    assert_eq!(quiz.len(), 1);
    let item = &quiz[0];
    assert!(item.is_well_formed());
    assert!(item.options.iter().any(|o| o == "Information not specified"));
    assert_eq!(item.question, "_____, _____ and more _____ were there too.");
}

#[test]
fn blanks_mask_every_occurrence_of_the_answer() {
    let text = "Osmosis is the movement of water across a membrane, and osmosis needs no energy. \
                Diffusion is the spread of particles from high concentration, and diffusion is passive. \
                The nucleus is a membrane-bound organelle, and the nucleus stores genetic material. \
                The ribosome is a small structure that builds proteins, and each ribosome reads messenger RNA.";
    let quiz = quiz_for(text, 9);
    assert!(quiz.iter().any(|q| q.archetype == Archetype::FillBlank));
    for item in quiz.iter().filter(|q| q.kind == QuizType::FillBlank) {
        let answer = item.answer.as_single().unwrap();
        assert!(
            !crate::analysis::text::contains_word_ci(&item.question, answer),
            "answer leaks into {}",
            item.question
        );
    }
}
