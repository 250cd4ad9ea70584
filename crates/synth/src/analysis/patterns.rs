//! Pattern tables for the miners.
//!
//! Tables are ordered: the first rule that matches a sentence wins. Every
//! definition rule captures `term` and `def`; every inline list rule
//! captures `cat` and `items`.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{FactKind, ListRelation};

/// A named, compiled rule.
pub struct Rule<T> {
    pub name: &'static str,
    pub regex: Regex,
    pub tag: T,
}

fn compile<T: Copy>(table: &[(&'static str, T, &str)]) -> Vec<Rule<T>> {
    table
        .iter()
        .map(|&(name, tag, pattern)| Rule {
            name,
            regex: Regex::new(pattern).unwrap_or_else(|e| panic!("bad pattern {name}: {e}")),
            tag,
        })
        .collect()
}

// Term: a short run of words, digits, hyphens, slashes and parentheses.
macro_rules! term {
    () => {
        r"(?P<term>[A-Za-z][A-Za-z0-9'’()/\- ]{1,60}?)"
    };
}

/// Definition shapes, applied to a sentence with its final punctuation removed.
pub static DEFINITION_RULES: Lazy<Vec<Rule<()>>> = Lazy::new(|| {
    compile(&[
        ("defined_as", (), concat!(r"(?i)^", term!(), r",?\s+(?:is|are)\s+defined\s+as\s+(?P<def>.+)$")),
        ("refers_to", (), concat!(r"(?i)^", term!(), r"\s+refers?\s+to\s+(?P<def>.+)$")),
        ("means", (), concat!(r"(?i)^", term!(), r"\s+means\s+(?P<def>.+)$")),
        ("represents", (), concat!(r"(?i)^", term!(), r"\s+represents?\s+(?P<def>.+)$")),
        ("described_as", (), concat!(r"(?i)^", term!(), r"\s+(?:can|may)\s+be\s+described\s+as\s+(?P<def>.+)$")),
        ("copula", (), concat!(r"(?i)^", term!(), r"\s+(?:is|are)\s+(?P<def>(?:a|an|the)\s+.+)$")),
        ("glossary_colon", (), concat!(r"^", term!(), r"\s*:\s+(?P<def>.+)$")),
        ("glossary_dash", (), concat!(r"^", term!(), r"\s+[–—-]\s+(?P<def>.+)$")),
    ])
});

/// Definitions that open with one of these say nothing specific.
pub static VAGUE_DEFINITION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:(?:a|an|the)\s+)?(?:very|really|quite|extremely|highly|so|too|important|interesting|essential|crucial|significant|necessary|useful|good|bad|great|nice|known\s+as|called|often|usually|sometimes|also|just|not|one\s+of|lot\s+of|lot|something|thing|way\s+to|kind\s+of|sort\s+of)\b",
    )
    .unwrap()
});

/// Leading words that make a captured term a pronoun or filler, not a concept.
pub const NON_TERM_STARTS: &[&str] = &[
    "it", "this", "that", "these", "those", "they", "he", "she", "we", "you", "i", "there",
    "here", "which", "what", "who", "one", "each", "such", "its", "their", "our", "his", "her",
    "some", "many", "most", "all", "both", "another", "other", "in", "on", "at", "for", "if",
    "when", "while", "because", "but", "and", "or", "so", "however", "also", "thus", "today",
    "now", "then", "note", "example", "for example",
];

/// Fact indicator classes, checked in order.
pub static FACT_RULES: Lazy<Vec<Rule<FactKind>>> = Lazy::new(|| {
    compile(&[
        ("negation", FactKind::Negation, r"(?i)\b(?:not|never|cannot|can't|isn't|aren't|doesn't|don't|no\s+longer)\b"),
        ("capability", FactKind::Capability, r"(?i)\b(?:can|could|may|might|must|should|will|is\s+able\s+to|are\s+able\s+to|allows?|enables?|supports?|requires?|prevents?)\b"),
        ("categorical", FactKind::Categorical, r"(?i)\b(?:always|only|every|all|none|each)\b"),
        ("comparative", FactKind::Comparative, r"(?i)\b(?:than|most|least|better|worse|faster|slower|larger|smaller|greater|fewer|higher|lower)\b"),
    ])
});

// Nouns that announce a list of members.
macro_rules! group_noun {
    () => {
        r"(?:types|kinds|forms|categories|classes|examples|components|parts|features|stages|phases|steps|elements|properties|characteristics|principles|layers|states|functions|sources|causes|branches|levels)"
    };
}

/// Inline list shapes, applied to a sentence with its final punctuation removed.
pub static LIST_RULES: Lazy<Vec<Rule<ListRelation>>> = Lazy::new(|| {
    compile(&[
        (
            "there_are_group",
            ListRelation::MembersOf,
            concat!(
                r"(?i)^there\s+are\s+(?:\w+\s+)?(?:(?:main|major|primary|basic|key|common|different|distinct)\s+)?(?P<cat>",
                group_noun!(),
                r"\s+of\s+[A-Za-z][\w\s\-]{0,40}?)\s*(?::|,|\s+-)\s*(?P<items>.+)$"
            ),
        ),
        (
            "group_of",
            ListRelation::MembersOf,
            concat!(
                r"(?i)^(?:the\s+)?(?:(?:\w+)\s+)?(?:(?:main|major|primary|basic|key|common|different|distinct)\s+)?(?P<cat>",
                group_noun!(),
                r"\s+of\s+[A-Za-z][\w\s\-]{0,40}?)\s+(?:include|includes|are|consist\s+of|comprise)\s*:?\s+(?P<items>.+)$"
            ),
        ),
        (
            "includes",
            ListRelation::Includes,
            r"(?i)^(?P<cat>[A-Za-z][\w\s\-]{1,40}?)\s+(?:include|includes|consist\s+of|consists\s+of|comprise|comprises|such\s+as)\s*:?\s+(?P<items>.+)$",
        ),
        (
            "colon_list",
            ListRelation::Includes,
            r"^(?P<cat>[A-Za-z][\w\s\-]{1,40}?)\s*:\s*(?P<items>[^:]+,[^:]+)$",
        ),
    ])
});

/// A group phrase such as "stages of mitosis" inside a longer heading.
pub static GROUP_PHRASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(concat!(r"(?i)\b", group_noun!(), r"\s+of\s+\S.*$")).unwrap());

/// Trailing verbs on a list-intro line ("The stages of mitosis are:").
pub static INTRO_TAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s+(?:are|is|include|includes|consist\s+of|consists\s+of|comprise|comprises|are\s+as\s+follows|the\s+following)\s*$").unwrap()
});

/// Separators between list items.
pub static ITEM_SPLIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s*[,;]\s*(?:and\s+|or\s+)?|\s+(?:and|or)\s+").unwrap());

/// Leading enumerators on list items: "1.", "(a)", "b)".
pub static ITEM_ENUMERATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(?(?:\d{1,3}|[a-z])[.)]\s*").unwrap());

/// Sentences that read as a definition of something.
pub static DEFINITIONAL_VERB: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:(?:is|are)\s+(?:a|an|the)|refers?\s+to|means|(?:is|are)\s+defined\s+as|represents)\b").unwrap()
});

pub static LEADING_ARTICLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(?:the|a|an)\s+").unwrap());

#[cfg(test)]
mod tests {
    use super::*;

    fn first_definition(s: &str) -> Option<(&'static str, String, String)> {
        DEFINITION_RULES.iter().find_map(|r| {
            r.regex
                .captures(s)
                .map(|c| (r.name, c["term"].to_string(), c["def"].to_string()))
        })
    }

    #[test]
    fn definition_rules_capture_term_and_def() {
        let (name, term, def) = first_definition("Osmosis is defined as the movement of water").unwrap();
        assert_eq!((name, term.as_str(), def.as_str()), ("defined_as", "Osmosis", "the movement of water"));

        let (name, term, def) = first_definition("The mitochondrion is an organelle that produces energy").unwrap();
        assert_eq!(name, "copula");
        assert_eq!(term, "The mitochondrion");
        assert_eq!(def, "an organelle that produces energy");

        let (name, term, _) = first_definition("Entropy refers to the disorder of a system").unwrap();
        assert_eq!((name, term.as_str()), ("refers_to", "Entropy"));

        let (name, term, _) = first_definition("Catalyst: a substance that speeds up a reaction").unwrap();
        assert_eq!((name, term.as_str()), ("glossary_colon", "Catalyst"));
    }

    #[test]
    fn copula_needs_an_article() {
        assert!(first_definition("Water is wet and clear in most lakes").is_none());
    }

    #[test]
    fn vague_openers() {
        assert!(VAGUE_DEFINITION.is_match("a very important idea in biology"));
        assert!(VAGUE_DEFINITION.is_match("one of the largest organs"));
        assert!(!VAGUE_DEFINITION.is_match("a membrane-bound organelle"));
    }

    #[test]
    fn fact_rules_in_order() {
        let kind = |s: &str| FACT_RULES.iter().find(|r| r.regex.is_match(s)).map(|r| r.tag);
        assert_eq!(kind("Enzymes cannot work when denatured"), Some(FactKind::Negation));
        assert_eq!(kind("Bacteria can survive extreme heat"), Some(FactKind::Capability));
        assert_eq!(kind("Every cell has a membrane"), Some(FactKind::Categorical));
        assert_eq!(kind("Light travels faster than sound"), Some(FactKind::Comparative));
        assert_eq!(kind("The sky appears blue at noon"), None);
    }

    #[test]
    fn list_rules() {
        let caps = LIST_RULES[1]
            .regex
            .captures("The three types of rock are igneous, sedimentary, and metamorphic")
            .unwrap();
        assert_eq!(&caps["cat"], "types of rock");
        assert_eq!(&caps["items"], "igneous, sedimentary, and metamorphic");

        let caps = LIST_RULES[0]
            .regex
            .captures("There are four stages of mitosis: prophase, metaphase, anaphase and telophase")
            .unwrap();
        assert_eq!(&caps["cat"], "stages of mitosis");
    }

    #[test]
    fn item_split() {
        let items: Vec<&str> = ITEM_SPLIT.split("igneous, sedimentary, and metamorphic").collect();
        assert_eq!(items, vec!["igneous", "sedimentary", "metamorphic"]);
    }
}
