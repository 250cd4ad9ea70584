//! Lexical negation of fact sentences for false true/false statements.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

struct Substitution {
    pattern: Regex,
    replacement: &'static str,
}

/// Removals of an existing negation come first so "is not" never becomes "is not not".
static SUBSTITUTIONS: Lazy<Vec<Substitution>> = Lazy::new(|| {
    [
        (r"\bis not\b", "is"),
        (r"\bisn't\b", "is"),
        (r"\bare not\b", "are"),
        (r"\baren't\b", "are"),
        (r"\bcannot\b", "can"),
        (r"\bcan not\b", "can"),
        (r"\bcan't\b", "can"),
        (r"\bdoes not support\b", "supports"),
        (r"\bdoes not allow\b", "allows"),
        (r"\bdoes not enable\b", "enables"),
        (r"\bwas not\b", "was"),
        (r"\bwere not\b", "were"),
        (r"\bis\b", "is not"),
        (r"\bcan\b", "cannot"),
        (r"\bare\b", "are not"),
        (r"\bsupports\b", "does not support"),
        (r"\ballows\b", "does not allow"),
        (r"\benables\b", "does not enable"),
        (r"\bwas\b", "was not"),
        (r"\bwere\b", "were not"),
        (r"\bwill\b", "will not"),
    ]
    .into_iter()
    .map(|(p, replacement)| Substitution {
        pattern: Regex::new(&format!("(?i){p}")).unwrap(),
        replacement,
    })
    .collect()
});

/// Contrast markers leave the polarity of the sentence ambiguous.
static CONTRAST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:but|although|though|however|whereas|unless|except)\b").unwrap());

/// Flip the polarity of the first negatable phrase.
///
/// Returns `None` when no substitution applies or when the sentence
/// contrasts two clauses, where a single flip would read incoherently.
pub fn falsify_statement(sentence: &str) -> Option<String> {
    if CONTRAST.is_match(sentence) {
        return None;
    }
    let sub = SUBSTITUTIONS
        .iter()
        .find(|sub| sub.pattern.is_match(sentence))?;

    let flipped = sub
        .pattern
        .replacen(sentence, 1, |caps: &Captures| match_case(&caps[0], sub.replacement))
        .into_owned();
    (flipped != sentence).then_some(flipped)
}

/// Carry a leading capital over to the replacement.
fn match_case(original: &str, replacement: &str) -> String {
    if original.starts_with(|c: char| c.is_uppercase()) {
        let mut chars = replacement.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    } else {
        replacement.to_string()
    }
}
