use std::collections::HashSet;

use super::patterns::{
    GROUP_PHRASE, INTRO_TAIL, ITEM_ENUMERATOR, ITEM_SPLIT, LEADING_ARTICLE, LIST_RULES, NON_TERM_STARTS,
};
use super::sentences::{is_bullet, strip_bullet};
use super::text::{is_stopword, strip_terminal_punct, word_count, words};
use super::{ListGroup, ListRelation};

const MAX_ITEM_WORDS: usize = 6;
const MIN_ITEM_CHARS: usize = 2;
const MAX_ITEM_CHARS: usize = 60;
const MAX_CATEGORY_CHARS: usize = 60;

/// Mine enumerations: inline lists in clean sentences, then bullet or
/// numbered lines under an intro line ending in ':'.
pub fn mine_lists(text: &str, clean_sentences: &[String]) -> Vec<ListGroup> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    let inline = clean_sentences.iter().filter_map(|s| inline_list(s));
    for group in inline.chain(line_lists(text)) {
        if seen.insert(group.category.to_lowercase()) {
            out.push(group);
        }
    }
    out
}

fn inline_list(sentence: &str) -> Option<ListGroup> {
    let body = strip_terminal_punct(sentence);
    LIST_RULES.iter().find_map(|rule| {
        let caps = rule.regex.captures(body)?;
        let raw_items: Vec<&str> = ITEM_SPLIT.split(&caps["items"]).collect();
        make_group(&caps["cat"], rule.tag, &raw_items)
    })
}

fn line_lists(text: &str) -> Vec<ListGroup> {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    let mut groups = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        let intro = lines[i];
        i += 1;
        if !intro.ends_with(':') || is_bullet(intro) {
            continue;
        }
        let mut raw_items = Vec::new();
        while i < lines.len() && is_bullet(lines[i]) {
            raw_items.push(item_head(strip_bullet(lines[i])));
            i += 1;
        }
        if raw_items.is_empty() {
            continue;
        }

        let heading = INTRO_TAIL.replace(intro.trim_end_matches(':').trim(), "");
        let (category, relation) = match GROUP_PHRASE.find(&heading) {
            Some(m) => (m.as_str().to_string(), ListRelation::MembersOf),
            None => (heading.to_string(), ListRelation::Includes),
        };
        if let Some(group) = make_group(&category, relation, &raw_items) {
            groups.push(group);
        }
    }
    groups
}

/// "Prophase: chromosomes condense" lists "Prophase".
fn item_head(line: &str) -> &str {
    [": ", " - ", " – ", " — "]
        .iter()
        .filter_map(|sep| line.find(sep))
        .min()
        .map_or(line, |i| &line[..i])
}

fn make_group(raw_category: &str, relation: ListRelation, raw_items: &[&str]) -> Option<ListGroup> {
    let category = clean_category(raw_category)?;

    let mut seen = HashSet::new();
    let items: Vec<String> = raw_items
        .iter()
        .filter_map(|raw| clean_item(raw))
        .filter(|item| seen.insert(item.to_lowercase()))
        .collect();

    let rejected = raw_items.len().saturating_sub(items.len());
    if items.len() < 2 || rejected > items.len() {
        return None;
    }
    Some(ListGroup {
        category,
        items,
        relation,
    })
}

fn clean_category(raw: &str) -> Option<String> {
    let category = LEADING_ARTICLE.replace(raw.trim(), "").trim().to_string();
    let lower = category.to_lowercase();
    let first = lower.split_whitespace().next()?;
    if NON_TERM_STARTS.contains(&first)
        || category.chars().count() > MAX_CATEGORY_CHARS
        || !words(&category).any(|w| !is_stopword(w))
    {
        return None;
    }
    Some(decapitalize(&category))
}

fn clean_item(raw: &str) -> Option<String> {
    let item = ITEM_ENUMERATOR.replace(raw.trim(), "");
    let item = item.trim();
    let item = item
        .strip_prefix("and ")
        .or_else(|| item.strip_prefix("or "))
        .unwrap_or(item);
    let item = LEADING_ARTICLE.replace(item.trim(), "");
    let item = strip_terminal_punct(&item)
        .trim_matches(|c: char| "\"'“”‘’()".contains(c))
        .trim();

    let chars = item.chars().count();
    let n_words = word_count(item);
    if (1..=MAX_ITEM_WORDS).contains(&n_words)
        && (MIN_ITEM_CHARS..=MAX_ITEM_CHARS).contains(&chars)
        && words(item).any(|w| !is_stopword(w))
    {
        Some(item.to_string())
    } else {
        None
    }
}

/// Lowercase a sentence-initial capital, keeping acronyms and proper nouns.
fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(first), Some(second)) if first.is_uppercase() && second.is_lowercase() => {
            first.to_lowercase().chain(s.chars().skip(1)).collect()
        }
        _ => s.to_string(),
    }
}
