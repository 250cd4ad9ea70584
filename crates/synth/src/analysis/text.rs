//! Word-level helpers shared by the miners and builders.

use std::collections::HashSet;

use once_cell::sync::Lazy;

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and",
        "any", "are", "as", "at", "be", "because", "been", "before", "being", "below",
        "between", "both", "but", "by", "can", "cannot", "could", "did", "do", "does", "doing",
        "down", "during", "each", "either", "even", "every", "few", "for", "from", "further",
        "had", "has", "have", "having", "he", "her", "here", "hers", "him", "his", "how",
        "however", "i", "if", "in", "into", "is", "it", "its", "itself", "just", "like", "many",
        "may", "me", "might", "more", "most", "much", "must", "my", "neither", "no", "nor",
        "not", "now", "of", "off", "often", "on", "once", "one", "only", "or", "other", "our",
        "ours", "out", "over", "own", "same", "she", "should", "since", "so", "some", "such",
        "than", "that", "the", "their", "theirs", "them", "then", "there", "these", "they",
        "this", "those", "through", "thus", "to", "too", "two", "under", "until", "up", "upon",
        "us", "used", "uses", "using", "very", "was", "we", "well", "were", "what", "when",
        "where", "whether", "which", "while", "who", "whom", "whose", "why", "will", "with",
        "within", "without", "would", "yet", "you", "your", "yours", "called", "known",
        "include", "includes", "including", "refers", "means", "defined", "represents",
        "example", "examples", "type", "types", "kind", "kinds", "form", "forms", "several",
        "three", "four", "five", "first", "second", "third", "another", "certain", "various",
        "make", "makes", "made", "allows", "allow", "enables", "enable", "helps", "help",
        "provides", "provide", "requires", "require", "become", "becomes", "occurs", "occur",
        "found", "based", "within", "whereas", "although", "though", "therefore", "instead",
    ]
    .into_iter()
    .collect()
});

pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(word.to_lowercase().as_str())
}

/// Whitespace-separated words with surrounding punctuation removed.
pub fn words(s: &str) -> impl Iterator<Item = &str> {
    s.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
}

pub fn word_count(s: &str) -> usize {
    words(s).count()
}

/// Words made of letters and longer than two characters.
pub fn substantive_word_count(s: &str) -> usize {
    words(s)
        .filter(|w| w.chars().count() > 2 && w.chars().all(|c| c.is_alphabetic() || c == '-' || c == '\''))
        .count()
}

/// Share of letters among all characters.
pub fn alpha_ratio(s: &str) -> f64 {
    let total = s.chars().count();
    if total == 0 {
        return 0.0;
    }
    let letters = s.chars().filter(|c| c.is_alphabetic()).count();
    letters as f64 / total as f64
}

/// Lowercased alphanumerics separated by single spaces.
pub fn normalize_key(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for word in s.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()) {
        if !out.is_empty() {
            out.push(' ');
        }
        out.extend(word.chars().flat_map(char::to_lowercase));
    }
    out
}

/// Cut to at most `max_chars`, backing off to a word boundary and adding an ellipsis.
pub fn truncate_at_word(s: &str, max_chars: usize) -> String {
    let s = s.trim();
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let cut = s
        .char_indices()
        .nth(max_chars)
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    let head = &s[..cut];
    let head = match head.rfind(char::is_whitespace) {
        Some(i) if i > cut / 2 => &head[..i],
        _ => head,
    };
    let head = head.trim_end_matches(|c: char| c.is_whitespace() || ",;:-".contains(c));
    format!("{head}...")
}

/// Cut to at most `max_chars` at a char boundary, without decoration.
pub fn char_prefix(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}

pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn strip_terminal_punct(s: &str) -> &str {
    s.trim()
        .trim_end_matches(|c: char| ".!?;:,".contains(c))
        .trim_end()
}

/// Ensure the text ends with sentence punctuation.
pub fn as_sentence(s: &str) -> String {
    let s = capitalize_first(s.trim());
    if s.ends_with(['.', '!', '?']) {
        s
    } else {
        format!("{s}.")
    }
}

/// Byte length of the prefix of `hay` equal to `needle` under Unicode
/// lowercasing, if `hay` starts with it.
fn ci_prefix_len(hay: &str, needle: &str) -> Option<usize> {
    let mut want = needle.chars().flat_map(char::to_lowercase).peekable();
    for (idx, c) in hay.char_indices() {
        if want.peek().is_none() {
            return Some(idx);
        }
        for lower in c.to_lowercase() {
            if want.next() != Some(lower) {
                return None;
            }
        }
    }
    want.peek().is_none().then_some(hay.len())
}

/// Byte ranges of every non-overlapping, case-insensitive, word-bounded
/// occurrence of `needle`.
fn word_matches_ci(haystack: &str, needle: &str) -> Vec<(usize, usize)> {
    let mut found = Vec::new();
    if needle.is_empty() {
        return found;
    }
    let mut resume = 0;
    for (i, _) in haystack.char_indices() {
        if i < resume {
            continue;
        }
        let before_ok = haystack[..i]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        if !before_ok {
            continue;
        }
        let Some(len) = ci_prefix_len(&haystack[i..], needle) else {
            continue;
        };
        let end = i + len;
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        if after_ok {
            found.push((i, end));
            resume = end;
        }
    }
    found
}

/// Byte range of the first case-insensitive, word-bounded occurrence of `needle`.
pub fn find_word_ci(haystack: &str, needle: &str) -> Option<(usize, usize)> {
    word_matches_ci(haystack, needle).into_iter().next()
}

pub fn contains_word_ci(haystack: &str, needle: &str) -> bool {
    find_word_ci(haystack, needle).is_some()
}

/// Replace every word-bounded occurrence of `needle`, ignoring case.
/// `None` when there is none.
pub fn replace_all_ci(haystack: &str, needle: &str, replacement: &str) -> Option<String> {
    let matches = word_matches_ci(haystack, needle);
    if matches.is_empty() {
        return None;
    }
    let mut out = String::with_capacity(haystack.len());
    let mut last = 0;
    for (start, end) in matches {
        out.push_str(&haystack[last..start]);
        out.push_str(replacement);
        last = end;
    }
    out.push_str(&haystack[last..]);
    Some(out)
}
