use std::collections::HashMap;

use super::text::is_stopword;

const MIN_TOKEN_CHARS: usize = 3;
const MAX_PHRASE_WORDS: usize = 3;
/// Multi-word phrases must recur to count as terms.
const MIN_PHRASE_COUNT: usize = 2;
const MAX_TERMS: usize = 200;

struct Candidate {
    display: String,
    words: usize,
    count: usize,
    first_seen: usize,
    /// Only ever seen at the start of a sentence.
    sentence_initial_only: bool,
}

/// Candidate terms ranked by frequency, then first appearance.
///
/// Every content word is a candidate. Runs of two or three adjacent content
/// words, uninterrupted by stopwords or punctuation, are candidates too but
/// survive only when they recur.
pub fn extract_terms(sentences: &[String]) -> Vec<String> {
    let mut candidates: HashMap<String, Candidate> = HashMap::new();
    let mut position = 0;

    for sentence in sentences {
        for run in content_runs(sentence) {
            for len in 1..=MAX_PHRASE_WORDS.min(run.tokens.len()) {
                for start in 0..=run.tokens.len() - len {
                    position += 1;
                    let phrase = run.tokens[start..start + len].join(" ");
                    let at_start = run.at_sentence_start && start == 0;
                    let entry = candidates
                        .entry(phrase.to_lowercase())
                        .or_insert_with(|| Candidate {
                            display: phrase.clone(),
                            words: len,
                            count: 0,
                            first_seen: position,
                            sentence_initial_only: true,
                        });
                    entry.count += 1;
                    if !at_start && entry.sentence_initial_only {
                        entry.sentence_initial_only = false;
                        entry.display = phrase;
                    }
                }
            }
        }
    }

    let mut ranked: Vec<Candidate> = candidates
        .into_values()
        .filter(|c| c.words == 1 || c.count >= MIN_PHRASE_COUNT)
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then(a.first_seen.cmp(&b.first_seen)));
    ranked
        .into_iter()
        .take(MAX_TERMS)
        .map(|c| {
            if c.sentence_initial_only {
                lower_initial(&c.display)
            } else {
                c.display
            }
        })
        .collect()
}

struct Run<'a> {
    tokens: Vec<&'a str>,
    at_sentence_start: bool,
}

fn content_runs(sentence: &str) -> Vec<Run<'_>> {
    let mut runs = Vec::new();
    let mut current = Run {
        tokens: Vec::new(),
        at_sentence_start: false,
    };

    for (index, raw) in sentence.split_whitespace().enumerate() {
        let token = raw.trim_matches(|c: char| !c.is_alphanumeric());
        let opens_group = raw.starts_with(|c: char| "(\"“".contains(c));
        if opens_group || !is_content_token(token) {
            close_run(&mut current, &mut runs);
        }
        if is_content_token(token) {
            if current.tokens.is_empty() {
                current.at_sentence_start = index == 0;
            }
            current.tokens.push(token);
        }
        if raw.ends_with(|c: char| ",;:.!?)\"”".contains(c)) {
            close_run(&mut current, &mut runs);
        }
    }
    close_run(&mut current, &mut runs);
    runs
}

fn close_run<'a>(current: &mut Run<'a>, runs: &mut Vec<Run<'a>>) {
    if !current.tokens.is_empty() {
        runs.push(Run {
            tokens: std::mem::take(&mut current.tokens),
            at_sentence_start: current.at_sentence_start,
        });
    }
}

fn is_content_token(token: &str) -> bool {
    let chars = token.chars().count();
    let lower = token.to_lowercase();
    let adverb = lower.ends_with("ly") && !lower.ends_with("ply") && !lower.ends_with("bly");
    let verb_form = chars >= 5 && (lower.ends_with("ed") || lower.ends_with("ing"));
    chars >= MIN_TOKEN_CHARS
        && token.chars().all(|c| c.is_alphabetic() || c == '-' || c == '\'')
        && !adverb
        && !verb_form
        && !is_stopword(token)
}

fn lower_initial(s: &str) -> String {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(first), Some(second)) if second.is_lowercase() => {
            first.to_lowercase().chain(s.chars().skip(1)).collect()
        }
        _ => s.to_string(),
    }
}
