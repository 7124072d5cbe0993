//! Geographic relevance of an article to the subject's state and district.

use regex::Regex;

use crate::config::NewsConfig;
use crate::places::{state_name, DistrictPlaces, AMBIGUOUS_STATE_CODES};
use crate::text::{contains_exact_word, contains_word, ordinal};
use crate::types::{CandidateArticle, LocalImpact, RelevanceTier, Subject};

const STATE_NAME_WEIGHT: u32 = 3;
const STATE_CODE_WEIGHT: u32 = 2;
const DISTRICT_ID_WEIGHT: u32 = 4;
const DISTRICT_ORDINAL_WEIGHT: u32 = 3;
const CITY_WEIGHT: u32 = 2;
const MAX_CITIES_SCORED: usize = 2;

#[derive(Debug, Clone)]
pub struct LocalImpactScorer {
    places: DistrictPlaces,
    high_threshold: u32,
    medium_threshold: u32,
}

impl LocalImpactScorer {
    pub fn new(config: &NewsConfig, places: DistrictPlaces) -> Self {
        Self {
            places,
            high_threshold: config.high_impact_score,
            medium_threshold: config.medium_impact_score,
        }
    }

    /// Prepare the per-subject patterns once so a whole batch can be scored
    /// against them.
    pub fn for_subject<'a>(&'a self, subject: &'a Subject) -> SubjectImpact<'a> {
        let district = subject.house_district().map(|district| DistrictPatterns {
            identifier: Regex::new(&format!(
                r"(?i)\b{}-0?{}\b",
                regex::escape(&subject.state),
                district
            ))
            .ok(),
            ordinal_phrase: Regex::new(&format!(
                r"(?i)\b{}\s+(?:congressional\s+)?district\b",
                ordinal(district)
            ))
            .ok(),
            district,
        });

        SubjectImpact {
            scorer: self,
            subject,
            district,
            cities: self.places.cities_for(&subject.state, subject.house_district()),
        }
    }

    /// Additive score over title and summary. Pure: the same article and
    /// subject always give the same result.
    pub fn score(&self, article: &CandidateArticle, subject: &Subject) -> LocalImpact {
        self.for_subject(subject).score(article)
    }

    pub fn tier(&self, score: u32) -> RelevanceTier {
        if score >= self.high_threshold {
            RelevanceTier::High
        } else if score >= self.medium_threshold {
            RelevanceTier::Medium
        } else {
            RelevanceTier::Low
        }
    }
}

#[derive(Debug)]
struct DistrictPatterns {
    district: u32,
    identifier: Option<Regex>,
    ordinal_phrase: Option<Regex>,
}

/// A scorer bound to one subject, built by [`LocalImpactScorer::for_subject`]
#[derive(Debug)]
pub struct SubjectImpact<'a> {
    scorer: &'a LocalImpactScorer,
    subject: &'a Subject,
    district: Option<DistrictPatterns>,
    cities: &'a [String],
}

impl SubjectImpact<'_> {
    pub fn score(&self, article: &CandidateArticle) -> LocalImpact {
        let subject = self.subject;
        let text = match &article.article.summary {
            Some(summary) => format!("{} {}", article.title(), summary),
            None => article.title().to_string(),
        };

        let mut score = 0;
        let mut factors = Vec::new();

        if let Some(name) = state_name(&subject.state) {
            if contains_word(&text, name) {
                score += STATE_NAME_WEIGHT;
                factors.push(format!("Mentions {}", name));
            }
        }

        if !AMBIGUOUS_STATE_CODES.contains(&subject.state.as_str())
            && contains_exact_word(&text, &subject.state)
        {
            score += STATE_CODE_WEIGHT;
            factors.push(format!("Mentions {}", subject.state));
        }

        if let Some(patterns) = &self.district {
            if patterns.identifier.as_ref().is_some_and(|re| re.is_match(&text)) {
                score += DISTRICT_ID_WEIGHT;
                factors.push(format!("District {}-{:02}", subject.state, patterns.district));
            }
            if patterns.ordinal_phrase.as_ref().is_some_and(|re| re.is_match(&text)) {
                score += DISTRICT_ORDINAL_WEIGHT;
                factors.push(format!("{} district", ordinal(patterns.district)));
            }
        }

        for city in self
            .cities
            .iter()
            .filter(|city| contains_word(&text, city))
            .take(MAX_CITIES_SCORED)
        {
            score += CITY_WEIGHT;
            factors.push(format!("Local: {}", city));
        }

        LocalImpact {
            score,
            tier: self.scorer.tier(score),
            factors,
        }
    }
}
