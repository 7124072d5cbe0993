use regex::Regex;
use std::fmt;

use crate::text::{contains_word, ordinal, word_positions};
use crate::types::Subject;

/// Which rule tied a headline to the subject
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameMatch {
    FullName,
    Proximity,
    TitledLastName,
    DistrictReference,
}

impl fmt::Display for NameMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameMatch::FullName => write!(f, "full name"),
            NameMatch::Proximity => write!(f, "first and last name nearby"),
            NameMatch::TitledLastName => write!(f, "title with last name"),
            NameMatch::DistrictReference => write!(f, "district reference with last name"),
        }
    }
}

/// Per-subject headline matcher for common-name subjects.
///
/// A title passes on the full name, on first and last name within
/// `proximity` characters of each other, on a title + last name form
/// ("Sen. Scott"), or on a district reference next to the last name.
#[derive(Debug, Clone)]
pub struct NameDisambiguator {
    full_name: String,
    first_name: String,
    last_name: String,
    proximity: usize,
    titled: Option<Regex>,
    district: Option<Regex>,
}

impl NameDisambiguator {
    pub fn new(subject: &Subject, proximity: usize) -> Self {
        let last = regex::escape(subject.last_name.trim());

        let titled = Regex::new(&format!(
            r"(?i)\b(?:senator|sen\.|representative|rep\.|congressman|congresswoman|congressmember)\s+{}\b",
            last
        ))
        .ok();

        let state = regex::escape(&subject.state);
        let district = match subject.house_district() {
            Some(d) => Regex::new(&format!(
                r"(?i)\b(?:{state}-0?{d}|{ord}\s+(?:congressional\s+)?district|district\s+{d})\b",
                state = state,
                d = d,
                ord = ordinal(d),
            ))
            .ok(),
            None if subject.is_at_large() => {
                Regex::new(&format!(r"(?i)\b(?:{}-AL|at-large)\b", state)).ok()
            }
            None => None,
        };

        Self {
            full_name: subject.full_name.trim().to_string(),
            first_name: subject.first_name.trim().to_string(),
            last_name: subject.last_name.trim().to_string(),
            proximity,
            titled,
            district,
        }
    }

    /// The first rule the title satisfies, if any
    pub fn matches(&self, title: &str) -> Option<NameMatch> {
        if contains_word(title, &self.full_name) {
            return Some(NameMatch::FullName);
        }

        if self.names_within_proximity(title) {
            return Some(NameMatch::Proximity);
        }

        if self.titled.as_ref().is_some_and(|re| re.is_match(title)) {
            return Some(NameMatch::TitledLastName);
        }

        if let Some(district) = &self.district {
            if district.is_match(title) && contains_word(title, &self.last_name) {
                return Some(NameMatch::DistrictReference);
            }
        }

        None
    }

    fn names_within_proximity(&self, title: &str) -> bool {
        let first_positions = word_positions(title, &self.first_name);
        if first_positions.is_empty() {
            return false;
        }
        let last_positions = word_positions(title, &self.last_name);

        first_positions.iter().any(|f| {
            last_positions
                .iter()
                .any(|l| f != l && f.abs_diff(*l) <= self.proximity)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Chamber;

    fn john_james() -> NameDisambiguator {
        let subject = Subject::new("J000307", "John", "James", "MI", Chamber::House).with_district(10);
        NameDisambiguator::new(&subject, 100)
    }

    #[test]
    fn test_rules() {
        let matcher = john_james();
        assert_eq!(
            matcher.matches("John James introduces bill on Great Lakes shipping"),
            Some(NameMatch::FullName)
        );
        assert_eq!(
            matcher.matches("Rep. John R. James joins bipartisan water caucus"),
            Some(NameMatch::Proximity)
        );
        assert_eq!(
            matcher.matches("Rep. James questions Pentagon budget request"),
            Some(NameMatch::TitledLastName)
        );
        assert_eq!(
            matcher.matches("MI-10 incumbent James outraises challenger"),
            Some(NameMatch::DistrictReference)
        );
        assert_eq!(
            matcher.matches("James holds 10th District town hall in Macomb"),
            Some(NameMatch::DistrictReference)
        );
    }

    #[test]
    fn test_single_component_titles_rejected() {
        let matcher = john_james();
        let adversarial = [
            "LeBron James scores 40 as Lakers beat Warriors",
            "John Deere reports record quarterly earnings",
            "James Webb telescope captures new galaxy images",
            "Pope John Paul II exhibit opens in Detroit",
            "Jesse James museum reopens after renovation",
            "King James Bible anniversary celebrated",
            "Elton John announces farewell tour dates",
            "Jameson whiskey sales climb in Michigan",
            "MI-10 race heats up as challenger files",
            "Senator Johnson slams trade deal",
        ];
        for title in adversarial {
            assert_eq!(matcher.matches(title), None, "'{}' should be rejected", title);
        }
    }

    #[test]
    fn test_names_far_apart_rejected() {
        let matcher = john_james();
        let filler = "x".repeat(120);
        let title = format!("John spoke first {} then James replied", filler);
        assert_eq!(matcher.matches(&title), None);

        let relaxed = NameDisambiguator::new(
            &Subject::new("J000307", "John", "James", "MI", Chamber::House),
            500,
        );
        assert_eq!(relaxed.matches(&title), Some(NameMatch::Proximity));
    }

    #[test]
    fn test_senator_has_no_district_rule() {
        let subject = Subject::new("S001184", "Tim", "Scott", "SC", Chamber::Senate).with_district(1);
        let matcher = NameDisambiguator::new(&subject, 100);
        assert_eq!(matcher.matches("SC-1 voters hear from Scott"), None);
        assert_eq!(
            matcher.matches("Sen. Scott unveils housing plan"),
            Some(NameMatch::TitledLastName)
        );
    }

    #[test]
    fn test_at_large_district_rule() {
        let subject = Subject::new("J000301", "Dusty", "Johnson", "SD", Chamber::House).with_district(0);
        let matcher = NameDisambiguator::new(&subject, 100);
        assert_eq!(
            matcher.matches("Johnson keeps at-large seat after recount"),
            Some(NameMatch::DistrictReference)
        );
        assert_eq!(
            matcher.matches("SD-AL incumbent Johnson files for reelection"),
            Some(NameMatch::DistrictReference)
        );
        assert_eq!(matcher.matches("SD-00 Johnson 0th district"), None);
    }
}
