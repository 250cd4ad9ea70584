use super::patterns::FACT_RULES;
use super::FactStatement;

/// Clean sentences carrying a negation, capability, categorical, or comparative marker.
pub fn mine_facts(clean_sentences: &[String]) -> Vec<FactStatement> {
    clean_sentences
        .iter()
        .filter_map(|sentence| {
            FACT_RULES
                .iter()
                .find(|rule| rule.regex.is_match(sentence))
                .map(|rule| FactStatement {
                    sentence: sentence.clone(),
                    kind: rule.tag,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::FactKind;

    #[test]
    fn keeps_only_indicator_sentences() {
        let sentences = vec![
            "Plants cannot grow without sunlight or water.".to_string(),
            "The river flows through the valley in spring.".to_string(),
            "Copper conducts electricity better than iron does.".to_string(),
        ];
        let facts = mine_facts(&sentences);
        assert_eq!(facts.len(), 2);
        assert_eq!(facts[0].kind, FactKind::Negation);
        assert_eq!(facts[1].kind, FactKind::Comparative);
    }
}
