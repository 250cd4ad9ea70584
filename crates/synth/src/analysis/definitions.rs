use std::collections::HashSet;

use tracing::trace;

use super::patterns::{DEFINITION_RULES, LEADING_ARTICLE, NON_TERM_STARTS, VAGUE_DEFINITION};
use super::text::{is_stopword, strip_terminal_punct, substantive_word_count, word_count, words};
use super::DefinitionEntry;

const MIN_TERM_CHARS: usize = 2;
const MAX_TERM_CHARS: usize = 40;
const MAX_TERM_WORDS: usize = 5;
const MIN_DEFINITION_WORDS: usize = 4;

/// Mine term/definition pairs from clean sentences, first pattern match wins.
pub fn mine_definitions(clean_sentences: &[String]) -> Vec<DefinitionEntry> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for sentence in clean_sentences {
        let body = strip_terminal_punct(sentence);
        let Some((rule, term, definition)) = DEFINITION_RULES.iter().find_map(|rule| {
            rule.regex
                .captures(body)
                .map(|c| (rule.name, c["term"].to_string(), c["def"].to_string()))
        }) else {
            continue;
        };

        let term = clean_term(&term);
        let definition = definition.trim().to_string();
        if !valid_term(&term) || !valid_definition(&definition) {
            trace!(rule, %term, "definition rejected");
            continue;
        }
        if !seen.insert(term.to_lowercase()) {
            continue;
        }
        out.push(DefinitionEntry {
            term,
            definition,
            source_sentence: sentence.clone(),
        });
    }
    out
}

fn clean_term(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches(|c: char| "\"'“”‘’".contains(c)).trim();
    LEADING_ARTICLE.replace(trimmed, "").trim().to_string()
}

fn valid_term(term: &str) -> bool {
    let chars = term.chars().count();
    if !(MIN_TERM_CHARS..=MAX_TERM_CHARS).contains(&chars) || word_count(term) > MAX_TERM_WORDS {
        return false;
    }
    let lower = term.to_lowercase();
    let first = lower.split_whitespace().next().unwrap_or("");
    if NON_TERM_STARTS.contains(&first) || NON_TERM_STARTS.contains(&lower.as_str()) {
        return false;
    }
    words(term).any(|w| !is_stopword(w) && w.chars().any(char::is_alphabetic))
}

fn valid_definition(def: &str) -> bool {
    substantive_word_count(def) >= MIN_DEFINITION_WORDS
        && !VAGUE_DEFINITION.is_match(def)
        && !is_enumeration(def)
}

/// "red, blue, green and yellow" is a list, not a definition.
fn is_enumeration(def: &str) -> bool {
    let commas = def.matches(',').count();
    commas >= 2 && word_count(def) <= (commas + 1) * 3
}
