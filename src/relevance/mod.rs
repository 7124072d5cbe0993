//! Relevance filtering: a quality gate for every article and a name
//! disambiguation gate for subjects with a common first or last name.

mod disambiguation;
mod quality;

pub use disambiguation::{NameDisambiguator, NameMatch};
pub use quality::{is_english, is_non_news_domain, QualityGate, QualityRejection};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::config::NewsConfig;
use crate::query::CommonNames;
use crate::types::{CandidateArticle, RawArticle, Subject};
use crate::TARGET_PIPELINE;

#[derive(Debug, Clone)]
pub struct RelevanceFilter {
    quality: QualityGate,
    names: CommonNames,
    proximity: usize,
}

impl RelevanceFilter {
    pub fn new(config: &NewsConfig) -> Self {
        Self {
            quality: QualityGate::new(config),
            names: CommonNames::new().with_extra(&config.extra_common_names),
            proximity: config.name_proximity_chars,
        }
    }

    pub fn filter(&self, raw: Vec<RawArticle>, subject: &Subject) -> Vec<CandidateArticle> {
        self.filter_at(raw, subject, Utc::now())
    }

    /// Keep the articles that pass both gates, judged at `now`
    pub fn filter_at(
        &self,
        raw: Vec<RawArticle>,
        subject: &Subject,
        now: DateTime<Utc>,
    ) -> Vec<CandidateArticle> {
        let total = raw.len();
        let disambiguator = self
            .names
            .is_common(&subject.first_name, &subject.last_name)
            .then(|| NameDisambiguator::new(subject, self.proximity));

        let mut low_quality = 0;
        let mut ambiguous = 0;
        let mut kept = Vec::new();

        for article in raw {
            if let Err(reason) = self.quality.check(&article, now) {
                debug!(target: TARGET_PIPELINE, "Quality gate dropped {}: {}", article.url, reason);
                low_quality += 1;
                continue;
            }

            if let Some(disambiguator) = &disambiguator {
                match disambiguator.matches(&article.title) {
                    Some(rule) => {
                        debug!(target: TARGET_PIPELINE, "'{}' matched on {}", article.title, rule);
                    }
                    None => {
                        debug!(
                            target: TARGET_PIPELINE,
                            "Disambiguation dropped '{}' for {}", article.title, subject.full_name
                        );
                        ambiguous += 1;
                        continue;
                    }
                }
            }

            kept.push(CandidateArticle {
                article,
                passed_quality: true,
                passed_disambiguation: true,
            });
        }

        info!(
            target: TARGET_PIPELINE,
            "Relevance filter kept {}/{} articles for {} ({} low quality, {} ambiguous)",
            kept.len(), total, subject.full_name, low_quality, ambiguous
        );
        kept
    }
}
