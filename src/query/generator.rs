use std::collections::HashSet;
use tracing::debug;

use super::names::{aliases_for, CommonNames, GENERIC_COMMITTEE_WORDS};
use crate::config::NewsConfig;
use crate::places::state_name;
use crate::text::ordinal;
use crate::types::Subject;
use crate::TARGET_PIPELINE;

const ACTIVITY_SUFFIXES: &[&str] = &["press release", "introduces bill", "votes", "legislation"];

/// Builds the ranked list of search terms for a subject.
///
/// Subjects with a common first or last name only get terms that carry the
/// full name or a titled form, so providers never see a bare surname.
#[derive(Debug, Clone)]
pub struct QueryGenerator {
    names: CommonNames,
    max_terms: usize,
    max_term_chars: usize,
}

impl QueryGenerator {
    pub fn new(config: &NewsConfig) -> Self {
        Self {
            names: CommonNames::new().with_extra(&config.extra_common_names),
            max_terms: config.max_search_terms,
            max_term_chars: config.max_term_chars,
        }
    }

    pub fn common_names(&self) -> &CommonNames {
        &self.names
    }

    pub fn is_common_name(&self, subject: &Subject) -> bool {
        self.names.is_common(&subject.first_name, &subject.last_name)
    }

    /// Generate deduplicated, bounded search terms in priority order
    pub fn generate(&self, subject: &Subject) -> Vec<String> {
        let common = self.is_common_name(subject);
        let state = state_name(&subject.state).unwrap_or(subject.state.as_str());
        let title = subject.chamber.title();
        let short_title = subject.chamber.short_title();
        let full = subject.full_name.trim();
        let last = subject.last_name.trim();

        // Everything after the identity block hangs off this anchor
        let anchor = if common { full } else { last };

        let mut candidates: Vec<String> = Vec::new();

        // Identity terms
        candidates.push(full.to_string());
        candidates.push(format!("{} {}", title, full));
        candidates.push(format!("{} {}", title, last));
        candidates.push(format!("{} {}", short_title, last));
        candidates.push(format!("{} {}", full, state));
        if !common {
            candidates.push(format!("{} {}", last, state));
            candidates.push(format!("{} {}", last, title.to_lowercase()));
        }

        for alias in aliases_for(full) {
            candidates.push(alias.to_string());
        }

        if let Some(district) = subject.house_district() {
            candidates.push(format!("{} {}-{:02}", anchor, subject.state, district));
            candidates.push(format!(
                "{} {} {} district",
                anchor,
                state,
                ordinal(district)
            ));
        } else if subject.is_at_large() {
            candidates.push(format!("{} {} at-large", anchor, state));
        }

        if let Some(topic) = subject.committees.first().and_then(|c| committee_topic(c)) {
            candidates.push(format!("{} {}", anchor, topic));
        }

        for suffix in ACTIVITY_SUFFIXES {
            candidates.push(format!("{} {}", anchor, suffix));
        }

        let terms = self.bound(candidates);
        debug!(
            target: TARGET_PIPELINE,
            "Generated {} search terms for {} (common name: {})",
            terms.len(), subject.full_name, common
        );
        terms
    }

    fn bound(&self, candidates: Vec<String>) -> Vec<String> {
        let mut seen = HashSet::new();
        candidates
            .into_iter()
            .map(|term| term.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|term| !term.is_empty())
            .filter(|term| term.chars().count() <= self.max_term_chars)
            .filter(|term| seen.insert(term.clone()))
            .take(self.max_terms)
            .collect()
    }
}

/// First one or two non-generic words of a committee name
/// ("Committee on Homeland Security and Governmental Affairs" -> "Homeland Security")
pub fn committee_topic(committee: &str) -> Option<String> {
    let words: Vec<&str> = committee
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|w| !w.is_empty())
        .filter(|w| !GENERIC_COMMITTEE_WORDS.contains(&w.to_lowercase().as_str()))
        .take(2)
        .collect();

    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Chamber;

    fn generator() -> QueryGenerator {
        QueryGenerator::new(&NewsConfig::default())
    }

    fn john_james() -> Subject {
        Subject::new("J000307", "John", "James", "MI", Chamber::House)
            .with_district(10)
            .with_committees(vec!["Committee on Foreign Affairs".to_string()])
    }

    #[test]
    fn test_common_name_never_emits_bare_last_name() {
        let subject = john_james();
        let terms = generator().generate(&subject);

        assert!(!terms.is_empty());
        for term in &terms {
            let titled = ["Representative James", "Rep. James"]
                .iter()
                .any(|t| term.contains(t));
            assert!(
                term.contains("John James") || titled,
                "term '{}' lacks full name or titled form",
                term
            );
            assert_ne!(term, "James");
            assert!(!term.starts_with("James "), "bare surname term '{}'", term);
        }
    }

    #[test]
    fn test_common_name_terms() {
        let terms = generator().generate(&john_james());
        assert_eq!(terms[0], "John James");
        assert!(terms.contains(&"Representative John James".to_string()));
        assert!(terms.contains(&"John James Michigan".to_string()));
        assert!(terms.contains(&"John James MI-10".to_string()));
        assert!(terms.contains(&"John James Michigan 10th district".to_string()));
        assert!(terms.contains(&"John James Foreign Affairs".to_string()));
        assert!(terms.contains(&"John James press release".to_string()));
    }

    #[test]
    fn test_uncommon_name_allows_last_name_terms() {
        let subject = Subject::new("O000174", "Jon", "Ossoff", "GA", Chamber::Senate)
            .with_committees(vec![
                "Committee on Homeland Security and Governmental Affairs".to_string(),
            ]);
        let terms = generator().generate(&subject);

        assert!(terms.contains(&"Ossoff Georgia".to_string()));
        assert!(terms.contains(&"Senator Ossoff".to_string()));
        assert!(terms.contains(&"Ossoff Homeland Security".to_string()));
        assert!(terms.contains(&"Ossoff introduces bill".to_string()));
        // Senators have no district terms
        assert!(!terms.iter().any(|t| t.contains("district")));
    }

    #[test]
    fn test_at_large_member_terms() {
        let subject = Subject::new("B001323", "Nick", "Begich", "AK", Chamber::House).with_district(0);
        let terms = generator().generate(&subject);

        assert!(terms.contains(&"Begich Alaska at-large".to_string()));
        assert!(terms
            .iter()
            .all(|t| !t.contains("AK-00") && !t.contains("0th district")));
    }

    #[test]
    fn test_alias_terms() {
        let subject = Subject::new("S000033", "Bernard", "Sanders", "VT", Chamber::Senate);
        let terms = generator().generate(&subject);
        assert!(terms.contains(&"Bernie Sanders".to_string()));
    }

    #[test]
    fn test_terms_are_bounded_and_unique() {
        let config = NewsConfig {
            max_search_terms: 5,
            max_term_chars: 30,
            ..NewsConfig::default()
        };
        let subject = Subject::new("X1", "Maximiliana", "Featherstonehaugh", "NC", Chamber::House)
            .with_district(4);
        let terms = QueryGenerator::new(&config).generate(&subject);

        assert!(terms.len() <= 5);
        assert!(terms.iter().all(|t| !t.is_empty() && t.chars().count() <= 30));
        let unique: HashSet<_> = terms.iter().collect();
        assert_eq!(unique.len(), terms.len());
    }

    #[test]
    fn test_committee_topic() {
        assert_eq!(
            committee_topic("Committee on Homeland Security and Governmental Affairs"),
            Some("Homeland Security".to_string())
        );
        assert_eq!(
            committee_topic("Senate Committee on Armed Services"),
            Some("Armed Services".to_string())
        );
        assert_eq!(committee_topic("Committee on the"), None);
    }
}
