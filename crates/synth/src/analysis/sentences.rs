//! Sentence segmentation and the clean-sentence filter.

use once_cell::sync::Lazy;
use regex::Regex;

use super::text::{alpha_ratio, word_count};

const MIN_SENTENCE_CHARS: usize = 25;
const MAX_SENTENCE_CHARS: usize = 400;
const MIN_SENTENCE_WORDS: usize = 4;
const MIN_ALPHA_RATIO: f64 = 0.6;
/// Short unpunctuated lines at the start of a block are treated as headings.
const MAX_HEADING_WORDS: usize = 8;

const ABBREVIATIONS: &[&str] = &[
    "e.g", "i.e", "etc", "vs", "dr", "mr", "mrs", "ms", "prof", "fig", "no", "st", "jr", "sr",
    "approx", "cf", "al", "ca", "eq", "vol", "pp",
];

static BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:[-*•·▪‣–]\s+|\(?\d{1,3}[.)]\s+|\(?[a-z][.)]\s+)").unwrap());

static CODE_MARKERS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"[{}]",
        r";\s*$",
        r"\);",
        r";.*;",
        r"\b[a-z]+[A-Z]\w*\s*\(",
        r"\b\w+\.\w+\(",
        r"\b\w+\(\)",
        r"^\s*(?:class|function|def|import|from|const|let|var|public|private|protected|return|package|fn|func|#include|#define)\b",
        r"//|/\*|\*/|<!--|-->",
        r"=>|==|!=|&&|\|\||:=|\+=|-=",
        r"\w\s*=\s*[\[\d'\x22]",
        r"</?[a-zA-Z][\w-]*(?:\s[^<>]*)?>",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// True for lines that open a bullet or numbered item.
pub fn is_bullet(line: &str) -> bool {
    BULLET.is_match(line)
}

/// Line text with any bullet or numbering marker removed.
pub fn strip_bullet(line: &str) -> &str {
    match BULLET.find(line) {
        Some(m) => line[m.end()..].trim(),
        None => line.trim(),
    }
}

/// Split text into sentences.
///
/// Blank lines separate blocks. Inside a block, wrapped lines are joined
/// back together unless they look like headings, bullets, or list intros.
pub fn segment(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut block: Vec<&str> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            segment_block(&block, &mut out);
            block.clear();
        } else {
            block.push(line);
        }
    }
    segment_block(&block, &mut out);
    out
}

fn segment_block(lines: &[&str], out: &mut Vec<String>) {
    let mut buffer = String::new();

    for (i, line) in lines.iter().enumerate() {
        let next = lines.get(i + 1).copied();

        if is_bullet(line) {
            flush(&mut buffer, out);
            split_unit(strip_bullet(line), out);
            continue;
        }
        if buffer.is_empty() && is_heading(line, next) {
            out.push(line.to_string());
            continue;
        }

        if !buffer.is_empty() {
            buffer.push(' ');
        }
        buffer.push_str(line);
        if line.ends_with(':') {
            flush(&mut buffer, out);
        }
    }
    flush(&mut buffer, out);
}

fn flush(buffer: &mut String, out: &mut Vec<String>) {
    if !buffer.is_empty() {
        split_unit(buffer, out);
        buffer.clear();
    }
}

fn is_heading(line: &str, next: Option<&str>) -> bool {
    if line.ends_with(|c: char| ".!?:;,".contains(c)) || word_count(line) > MAX_HEADING_WORDS {
        return false;
    }
    match next {
        None => true,
        Some(next) => is_bullet(next) || next.chars().next().is_some_and(|c| c.is_uppercase()),
    }
}

/// Split one run of prose at sentence-ending punctuation.
fn split_unit(unit: &str, out: &mut Vec<String>) {
    let chars: Vec<(usize, char)> = unit.char_indices().collect();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let (pos, c) = chars[i];
        if !matches!(c, '.' | '!' | '?') {
            i += 1;
            continue;
        }

        let mut j = i + 1;
        while j < chars.len() && matches!(chars[j].1, '"' | '\'' | ')' | '”' | '’') {
            j += 1;
        }
        let at_end = j >= chars.len();
        let boundary = at_end
            || (chars[j].1.is_whitespace() && {
                let mut k = j;
                while k < chars.len() && chars[k].1.is_whitespace() {
                    k += 1;
                }
                k >= chars.len() || opens_sentence(chars[k].1)
            });

        if boundary && !(c == '.' && is_abbreviation(&unit[start..pos])) {
            let end = if at_end { unit.len() } else { chars[j].0 };
            push_trimmed(&unit[start..end], out);
            start = end;
            i = j;
        } else {
            i += 1;
        }
    }
    push_trimmed(&unit[start..], out);
}

fn opens_sentence(c: char) -> bool {
    c.is_uppercase() || c.is_ascii_digit() || matches!(c, '"' | '\'' | '(' | '“' | '‘')
}

fn is_abbreviation(before_dot: &str) -> bool {
    let word = before_dot
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or("")
        .trim_start_matches(['(', '"', '\'']);
    if word.chars().count() == 1 {
        return word.chars().all(|c| c.is_alphabetic());
    }
    let lower = word.to_lowercase();
    ABBREVIATIONS.contains(&lower.as_str())
}

fn push_trimmed(s: &str, out: &mut Vec<String>) {
    let s = s.trim();
    if !s.is_empty() {
        out.push(s.to_string());
    }
}

/// Prose sentence fit for question and flashcard material.
pub fn is_clean_sentence(sentence: &str) -> bool {
    let len = sentence.chars().count();
    (MIN_SENTENCE_CHARS..=MAX_SENTENCE_CHARS).contains(&len)
        && word_count(sentence) >= MIN_SENTENCE_WORDS
        && alpha_ratio(sentence) >= MIN_ALPHA_RATIO
        && !looks_like_code(sentence)
}

pub fn looks_like_code(s: &str) -> bool {
    CODE_MARKERS.iter().any(|re| re.is_match(s))
}
