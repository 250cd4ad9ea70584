//! Line and paragraph reconstruction from positioned PDF text fragments,
//! and page-level cleanup of the reconstructed text.

use std::collections::{HashMap, HashSet};

/// Vertical deltas below this continue the current line.
pub(crate) const LINE_TOLERANCE: f64 = 2.0;

/// Vertical deltas above this start a new paragraph.
pub(crate) const PARAGRAPH_GAP: f64 = 15.0;

/// A run of text shown at a text-space position.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TextFragment {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// Join fragments (in content-stream order) into lines and paragraphs.
///
/// Fragments on the same baseline are concatenated; a horizontal jump
/// between them becomes a single space. Moving down by more than
/// [`PARAGRAPH_GAP`] inserts a blank line.
pub(crate) fn assemble_page(fragments: &[TextFragment]) -> String {
    let mut out = String::new();
    let mut last: Option<(f64, f64)> = None;

    for frag in fragments {
        if frag.text.trim().is_empty() {
            continue;
        }
        if let Some((last_x, last_y)) = last {
            let dy = (last_y - frag.y).abs();
            if dy < LINE_TOLERANCE {
                let moved = (frag.x - last_x).abs() > f64::EPSILON;
                if moved && needs_space(&out, &frag.text) {
                    out.push(' ');
                }
            } else {
                truncate_trailing_spaces(&mut out);
                if dy > PARAGRAPH_GAP {
                    out.push_str("\n\n");
                } else {
                    out.push('\n');
                }
            }
        }
        let text = if out.ends_with('\n') || out.is_empty() {
            frag.text.trim_start()
        } else {
            frag.text.as_str()
        };
        out.push_str(text);
        last = Some((frag.x, frag.y));
    }

    out.lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn needs_space(current: &str, next: &str) -> bool {
    let ends_ws = current.chars().last().map_or(true, char::is_whitespace);
    let starts_ws = next.chars().next().map_or(true, char::is_whitespace);
    !ends_ws && !starts_ws
}

fn truncate_trailing_spaces(s: &mut String) {
    let trimmed = s.trim_end_matches(' ').len();
    s.truncate(trimmed);
}

/// Typographic ligatures and their letter expansions.
const LIGATURES: &[(char, &str)] = &[
    ('\u{FB00}', "ff"),
    ('\u{FB01}', "fi"),
    ('\u{FB02}', "fl"),
    ('\u{FB03}', "ffi"),
    ('\u{FB04}', "ffl"),
    ('\u{FB05}', "st"),
    ('\u{FB06}', "st"),
];

/// Running headers and footers are only detected in documents this long.
const MIN_PAGES_FOR_RUNNING_LINES: usize = 3;

/// Lines inspected at the top and at the bottom of each page.
const EDGE_LINES: usize = 1;

/// Clean per-page text and join the pages with blank lines.
///
/// Expands ligatures, drops control characters and soft hyphens, removes
/// page numbers and headers/footers repeated across pages, and re-joins
/// words hyphenated across a line break.
pub(crate) fn clean_pages<S: AsRef<str>>(pages: &[S]) -> String {
    let pages: Vec<Vec<String>> = pages
        .iter()
        .map(|page| {
            normalize_glyphs(page.as_ref())
                .lines()
                .map(|line| line.trim_end().to_string())
                .collect()
        })
        .collect();
    let running = running_lines(&pages);

    pages
        .into_iter()
        .map(|lines| join_hyphenated(&strip_page_edges(lines, &running)))
        .map(|page| page.trim().to_string())
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn normalize_glyphs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if let Some((_, expansion)) = LIGATURES.iter().find(|(lig, _)| *lig == c) {
            out.push_str(expansion);
        } else if c == '\u{AD}' || (c.is_control() && c != '\n' && c != '\t') {
            continue;
        } else {
            out.push(c);
        }
    }
    out
}

/// Key that makes "Chapter 2 | page 14" and "Chapter 2 | page 15" compare equal.
fn edge_key(line: &str) -> String {
    line.trim()
        .chars()
        .map(|c| if c.is_ascii_digit() { '#' } else { c.to_ascii_lowercase() })
        .collect()
}

fn edge_indices(lines: &[String]) -> Vec<usize> {
    let filled: Vec<usize> = (0..lines.len()).filter(|&i| !lines[i].trim().is_empty()).collect();
    let mut edges: Vec<usize> = filled.iter().take(EDGE_LINES).copied().collect();
    edges.extend(filled.iter().rev().take(EDGE_LINES).copied());
    edges.sort_unstable();
    edges.dedup();
    edges
}

/// Edge lines that recur on at least half the pages.
fn running_lines(pages: &[Vec<String>]) -> HashSet<String> {
    if pages.len() < MIN_PAGES_FOR_RUNNING_LINES {
        return HashSet::new();
    }
    let mut counts: HashMap<String, usize> = HashMap::new();
    for lines in pages {
        let keys: HashSet<String> = edge_indices(lines).into_iter().map(|i| edge_key(&lines[i])).collect();
        for key in keys {
            *counts.entry(key).or_default() += 1;
        }
    }
    let threshold = (pages.len() / 2).max(MIN_PAGES_FOR_RUNNING_LINES);
    counts
        .into_iter()
        .filter(|(_, n)| *n >= threshold)
        .map(|(key, _)| key)
        .collect()
}

fn strip_page_edges(lines: Vec<String>, running: &HashSet<String>) -> Vec<String> {
    let drop: HashSet<usize> = edge_indices(&lines)
        .into_iter()
        .filter(|&i| is_page_number(&lines[i]) || running.contains(&edge_key(&lines[i])))
        .collect();
    lines
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !drop.contains(i))
        .map(|(_, line)| line)
        .collect()
}

/// "12", "- 12 -", "Page 12", "12 of 40", "12/40".
fn is_page_number(line: &str) -> bool {
    let lower = line.trim().to_lowercase();
    let body = lower.trim_matches(|c: char| c == '-' || c == '\u{2013}' || c.is_whitespace());
    let body = body.strip_prefix("page").unwrap_or(body).trim();
    if body.is_empty() {
        return false;
    }
    body.split(" of ")
        .flat_map(|part| part.split('/'))
        .all(|part| {
            let part = part.trim();
            !part.is_empty() && part.chars().all(|c| c.is_ascii_digit())
        })
}

/// Join "photo-" / "synthesis" split across lines back into one word.
fn join_hyphenated(lines: &[String]) -> String {
    let mut out = String::new();
    let mut glue = false;
    for (i, line) in lines.iter().enumerate() {
        if i > 0 && !glue {
            out.push('\n');
        }
        let line = if glue { line.trim_start() } else { line.as_str() };
        let next_starts_lower = lines
            .get(i + 1)
            .and_then(|next| next.trim_start().chars().next())
            .is_some_and(char::is_lowercase);
        let mut chars = line.chars().rev();
        let hyphenated = chars.next() == Some('-') && chars.next().is_some_and(char::is_alphabetic);

        if hyphenated && next_starts_lower {
            out.push_str(&line[..line.len() - 1]);
            glue = true;
        } else {
            out.push_str(line);
            glue = false;
        }
    }
    out
}
