mod common;

use std::collections::HashSet;

use studykit_core::config::ExtractionConfig;
use studykit_core::{Answer, Archetype, QuizType};
use studykit_ingest::{extract_text, ExtractionError};
use studykit_synth::analysis::text::{contains_word_ci, normalize_key};
use studykit_synth::{
    analyze, build_flashcards, build_quiz, study_kit_from_document, FlashcardLimits, ListRelation, PipelineError,
    QuizLimits, QuizSources,
};

use common::{generator_with, CountingCompressor, LECTURE};

const VOLCANOES: &str = "\
A volcano is a rupture in the crust of a planet that lets hot lava escape. \
Volcanoes are found near tectonic plate boundaries.

Magma is the molten rock stored beneath the surface of the earth. \
Magma rises when pressure builds inside the chamber.

The three types of rock are igneous, sedimentary, and metamorphic.";

#[tokio::test]
async fn definitions_and_lists_reach_the_quiz() {
    let analysis = analyze(VOLCANOES);
    assert!(analysis.definitions.len() >= 2, "{:?}", analysis.definitions);
    let terms: Vec<String> = analysis.definitions.iter().map(|d| d.term.to_lowercase()).collect();
    assert!(terms.contains(&"volcano".to_string()));
    assert!(terms.contains(&"magma".to_string()));

    let group = analysis
        .lists
        .iter()
        .find(|g| g.items.len() == 3)
        .expect("three-item list");
    assert_eq!(group.relation, ListRelation::MembersOf);
    assert_eq!(group.items, ["igneous", "sedimentary", "metamorphic"]);

    let kit = generator_with(None)
        .generate(VOLCANOES, None)
        .await
        .unwrap();
    let mcq = kit
        .quiz
        .iter()
        .find(|q| q.archetype == Archetype::Definition)
        .expect("definition question");
    assert_eq!(mcq.kind, QuizType::Mcq);
    assert!(terms.iter().any(|t| mcq.question.to_lowercase().contains(t.as_str())));

    let multi = kit
        .quiz
        .iter()
        .find(|q| q.kind == QuizType::MultiSelect)
        .expect("multi-select question");
    let answers: HashSet<&str> = multi.answer.values().into_iter().collect();
    assert!(answers.iter().all(|a| group.items.iter().any(|i| i == a)));
    assert!(!kit.summary.is_empty());
}

#[tokio::test]
async fn short_documents_never_reach_generation() {
    assert!(matches!(
        extract_text(b"Too short.", "text/plain"),
        Err(ExtractionError::InsufficientText { .. })
    ));

    let compressor = CountingCompressor::new();
    let generator = generator_with(Some(compressor.clone()));
    let err = study_kit_from_document(
        &generator,
        b"   tiny   ".to_vec(),
        "text/plain",
        &ExtractionConfig::default(),
        None,
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Extraction(ExtractionError::InsufficientText { .. })
    ));
    assert_eq!(compressor.calls(), 0);
}

#[tokio::test]
async fn plain_prose_still_yields_a_quiz() {
    let text = "Rivers carry sediment from mountains toward the distant sea. \
                Glaciers carve deep valleys into ancient granite mountains. \
                Wind moves sand across wide desert plains every season. \
                Waves slowly grind coastal cliffs into pebbles and sand.";
    let analysis = analyze(text);
    assert!(analysis.definitions.is_empty());

    let kit = generator_with(None).generate(text, None).await.unwrap();
    assert!(!kit.quiz.is_empty());
    assert!(kit.quiz.iter().all(|q| q.is_well_formed()));
    assert!(kit.quiz.iter().any(|q| q.archetype == Archetype::SentenceBlank));
    for card in &kit.flashcards {
        assert!(card.back.chars().count() >= 30, "{card:?}");
    }
}

#[tokio::test]
async fn one_short_sentence_still_yields_a_quiz() {
    let kit = generator_with(None)
        .generate("The elephant ran by the old red car.", None)
        .await
        .unwrap();
    assert!(!kit.quiz.is_empty());
    assert!(kit.quiz.iter().all(|q| q.is_well_formed()));
    assert!(kit
        .quiz
        .iter()
        .all(|q| !contains_word_ci(&q.question, "elephant")));
}

#[tokio::test]
async fn document_pipeline_end_to_end() {
    let compressor = CountingCompressor::new();
    let generator = generator_with(Some(compressor.clone()));
    let kit = study_kit_from_document(
        &generator,
        LECTURE.as_bytes().to_vec(),
        "text/plain",
        &ExtractionConfig::default(),
        None,
    )
    .await
    .unwrap();
    assert!(!kit.is_degraded());
    assert!(compressor.calls() >= 1);
    assert!(kit.quiz.len() >= 5);
    assert!(kit.flashcards.len() >= 4);
}

#[test]
fn quiz_items_hold_their_invariants() {
    let analysis = analyze(LECTURE);
    let quiz = build_quiz(&QuizSources::from(&analysis), &QuizLimits::default(), &mut rand::thread_rng());
    assert!(quiz.len() <= 20);

    let mut questions = HashSet::new();
    for item in &quiz {
        assert!(item.is_well_formed(), "{item:?}");
        assert!(questions.insert(item.question.clone()), "duplicate {}", item.question);

        let options: HashSet<String> = item.options.iter().map(|o| normalize_key(o)).collect();
        assert_eq!(options.len(), item.options.len(), "{item:?}");
        for answer in item.answer.values() {
            assert!(item.options.iter().any(|o| o == answer), "{item:?}");
        }
        match (&item.kind, &item.answer) {
            (QuizType::TrueFalse, Answer::Single(a)) => {
                assert!(a == "True" || a == "False");
                assert_eq!(item.options.len(), 2);
            }
            (QuizType::MultiSelect, Answer::Multiple(a)) => assert!(!a.is_empty()),
            (QuizType::MultiSelect, _) | (QuizType::TrueFalse, _) => panic!("bad answer shape {item:?}"),
            _ => {}
        }
    }
}

#[test]
fn flashcards_hold_their_invariants() {
    let analysis = analyze(LECTURE);
    let cards = build_flashcards(&analysis.definitions, &analysis, &FlashcardLimits::default());
    assert!(!cards.is_empty());
    assert!(cards.len() <= 15);

    let mut fronts = HashSet::new();
    for card in &cards {
        assert!(card.back.chars().count() >= 30, "{card:?}");
        assert!(card.back.split_whitespace().count() >= 5, "{card:?}");
        assert!(fronts.insert(card.front.to_lowercase()), "duplicate front {}", card.front);
    }
}

#[test]
fn mined_terms_come_from_their_sentences() {
    let analysis = analyze(LECTURE);
    for def in &analysis.definitions {
        assert!(
            contains_word_ci(&def.source_sentence, &def.term),
            "{} not in {}",
            def.term,
            def.source_sentence
        );
        assert!(!def.definition.to_lowercase().starts_with("very"), "{def:?}");
    }
}

#[test]
fn extraction_is_idempotent() {
    let first = extract_text(LECTURE.as_bytes(), "text/plain").unwrap();
    let second = extract_text(LECTURE.as_bytes(), "text/plain").unwrap();
    assert_eq!(first.as_str(), second.as_str());

    let again = extract_text(first.as_str().as_bytes(), "text/plain").unwrap();
    assert_eq!(again.as_str(), first.as_str());
}

#[test]
fn kit_serializes_to_the_wire_shape() {
    let analysis = analyze(LECTURE);
    let quiz = build_quiz(&QuizSources::from(&analysis), &QuizLimits::default(), &mut rand::thread_rng());
    let value = serde_json::to_value(&quiz).unwrap();
    for item in value.as_array().unwrap() {
        let kind = item["type"].as_str().unwrap();
        assert!(["mcq", "fill_blank", "true_false", "multi_select"].contains(&kind), "{kind}");
        match kind {
            "multi_select" => assert!(item["answer"].is_array()),
            _ => assert!(item["answer"].is_string()),
        }
        assert!(item["options"].is_array());
        assert!(item["explanation"].is_string());
    }
}
