//! Wrong-answer pools and sampling.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use super::QuizSources;
use crate::analysis::text::{
    capitalize_first, contains_word_ci, normalize_key, strip_terminal_punct, truncate_at_word,
};

/// Longest option text shown for a definition or sentence.
pub(crate) const MAX_OPTION_CHARS: usize = 150;
const MIN_CANDIDATE_CHARS: usize = 3;

/// Display form of a definition or sentence used as an option.
pub(crate) fn option_text(s: &str) -> String {
    capitalize_first(&truncate_at_word(strip_terminal_punct(s), MAX_OPTION_CHARS))
}

/// True when `candidate` would be confused with `other`: equal, or one contains the other.
pub(crate) fn conflicts(candidate: &str, other: &str) -> bool {
    if other.is_empty() {
        return false;
    }
    normalize_key(candidate) == normalize_key(other)
        || contains_word_ci(candidate, other)
        || contains_word_ci(other, candidate)
}

/// Keep the first of each normalized value.
pub(crate) fn distinct(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|v| seen.insert(normalize_key(v)))
        .collect()
}

/// Term-like wrong answers in two tiers: other defined terms, then list
/// items and frequent terms. Candidates that clash with `exclude` or already
/// appear in `context` are dropped.
pub(crate) fn term_tiers(src: &QuizSources<'_>, exclude: &[&str], context: &str) -> [Vec<String>; 2] {
    let usable = |candidate: &str| {
        candidate.chars().count() >= MIN_CANDIDATE_CHARS
            && !exclude.iter().any(|e| conflicts(candidate, e))
            && !contains_word_ci(context, candidate)
    };

    let defined = distinct(
        src.definitions
            .iter()
            .map(|d| d.term.clone())
            .filter(|t| usable(t))
            .collect(),
    );
    let defined_keys: HashSet<String> = defined.iter().map(|t| normalize_key(t)).collect();

    let others = distinct(
        src.lists
            .iter()
            .flat_map(|l| l.items.iter())
            .chain(src.terms.iter())
            .filter(|t| usable(t) && !defined_keys.contains(&normalize_key(t)))
            .cloned()
            .collect(),
    );
    [defined, others]
}

/// Sample up to `n` values without replacement.
pub(crate) fn pick<R: Rng + ?Sized>(rng: &mut R, pool: Vec<String>, n: usize) -> Vec<String> {
    pool.choose_multiple(rng, n).cloned().collect()
}

/// Sample up to `n` values, exhausting earlier tiers first.
pub(crate) fn pick_tiered<R: Rng + ?Sized>(rng: &mut R, tiers: [Vec<String>; 2], n: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(n);
    for tier in tiers {
        let remaining = n - out.len();
        if remaining == 0 {
            break;
        }
        let fresh: Vec<String> = tier
            .into_iter()
            .filter(|t| !seen.contains(&normalize_key(t)))
            .collect();
        for value in pick(rng, fresh, remaining) {
            seen.insert(normalize_key(&value));
            out.push(value);
        }
    }
    out
}
