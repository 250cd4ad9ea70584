//! Heuristic linguistic analysis of extracted text.
//!
//! Everything here is deterministic: the same text always yields the same
//! sentences, definitions, facts, lists and terms, in the same order.

mod definitions;
mod facts;
mod lists;
pub(crate) mod patterns;
pub mod sentences;
mod terms;
pub mod text;

use serde::Serialize;

pub use definitions::mine_definitions;
pub use facts::mine_facts;
pub use lists::mine_lists;
pub use sentences::{is_clean_sentence, segment};
pub use terms::extract_terms;

/// A term paired with the definition mined for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefinitionEntry {
    pub term: String,
    pub definition: String,
    pub source_sentence: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FactKind {
    Negation,
    Capability,
    Categorical,
    Comparative,
}

/// A clean sentence carrying a checkable claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactStatement {
    pub sentence: String,
    pub kind: FactKind,
}

/// How a list's items relate to its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListRelation {
    /// "types of rock are igneous, ..."
    MembersOf,
    /// "common symptoms include fever, ..."
    Includes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListGroup {
    pub category: String,
    pub items: Vec<String>,
    pub relation: ListRelation,
}

/// Everything the builders draw on.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Analysis {
    pub sentences: Vec<String>,
    pub clean_sentences: Vec<String>,
    pub terms: Vec<String>,
    pub definitions: Vec<DefinitionEntry>,
    pub facts: Vec<FactStatement>,
    pub lists: Vec<ListGroup>,
}

impl Analysis {
    /// True when any definition, fact or list was found.
    pub fn has_structure(&self) -> bool {
        !self.definitions.is_empty() || !self.facts.is_empty() || !self.lists.is_empty()
    }
}

pub fn analyze(text: &str) -> Analysis {
    let sentences = segment(text);
    let clean_sentences: Vec<String> = sentences
        .iter()
        .filter(|s| is_clean_sentence(s))
        .cloned()
        .collect();

    let term_source = if clean_sentences.is_empty() {
        &sentences
    } else {
        &clean_sentences
    };
    let terms = extract_terms(term_source);
    let definitions = mine_definitions(&clean_sentences);
    let facts = mine_facts(&clean_sentences);
    let lists = mine_lists(text, &clean_sentences);

    tracing::debug!(
        sentences = sentences.len(),
        clean = clean_sentences.len(),
        terms = terms.len(),
        definitions = definitions.len(),
        facts = facts.len(),
        lists = lists.len(),
        "text analyzed"
    );

    Analysis {
        sentences,
        clean_sentences,
        terms,
        definitions,
        facts,
        lists,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_is_deterministic() {
        let text = "Photosynthesis is the process by which plants convert light into chemical energy. \
                    Plants cannot survive without light.\n\nThe three types of rock are igneous, sedimentary, and metamorphic.";
        let a = analyze(text);
        let b = analyze(text);
        assert_eq!(a.definitions, b.definitions);
        assert_eq!(a.facts, b.facts);
        assert_eq!(a.lists, b.lists);
        assert_eq!(a.terms, b.terms);

        assert_eq!(a.definitions.len(), 1);
        assert_eq!(a.definitions[0].term, "Photosynthesis");
        assert_eq!(a.facts.len(), 1);
        assert_eq!(a.lists.len(), 1);
        assert!(a.has_structure());
    }

    #[test]
    fn code_only_text_has_no_clean_sentences() {
        let a = analyze("fn main() {\n    let x = compute(1, 2);\n    println!(\"{x}\");\n}");
        assert!(a.clean_sentences.is_empty());
        assert!(!a.has_structure());
    }
}
