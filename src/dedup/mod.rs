//! Cross-source deduplication of story representatives.

use std::collections::HashMap;
use strsim::normalized_levenshtein;
use tracing::{debug, info};

use crate::clustering::newest_first;
use crate::config::NewsConfig;
use crate::sources::canonical_url;
use crate::text::normalize_title;
use crate::types::{CandidateArticle, ClusterSummary};
use crate::TARGET_PIPELINE;

/// Strict similarity used to drop syndicated or re-headlined copies.
///
/// Normalized Levenshtein over normalized titles. Compare with
/// `clustering::cluster_title_similarity`, which groups looser matches.
pub fn duplicate_title_similarity(a: &str, b: &str) -> f64 {
    normalized_levenshtein(&normalize_title(a), &normalize_title(b))
}

/// Anything the deduplicator can order and compare
pub trait NewsItem {
    fn article(&self) -> &CandidateArticle;
}

impl NewsItem for CandidateArticle {
    fn article(&self) -> &CandidateArticle {
        self
    }
}

impl NewsItem for (CandidateArticle, Option<ClusterSummary>) {
    fn article(&self) -> &CandidateArticle {
        &self.0
    }
}

#[derive(Debug, Clone)]
pub struct Deduplicator {
    threshold: f64,
    max_per_domain: usize,
}

impl Deduplicator {
    pub fn new(config: &NewsConfig) -> Self {
        Self {
            threshold: config.duplicate_similarity_threshold,
            max_per_domain: config.max_articles_per_domain.max(1),
        }
    }

    /// Collapse near-duplicates and apply the per-domain cap. The most recent
    /// article wins every conflict; output is newest first, ties by URL.
    /// Running it twice yields the same result.
    pub fn dedupe<T: NewsItem>(&self, mut items: Vec<T>) -> Vec<T> {
        let total = items.len();
        items.sort_by(|a, b| newest_first(a.article(), b.article()));

        let mut kept: Vec<T> = Vec::with_capacity(items.len());
        let mut kept_urls: Vec<String> = Vec::with_capacity(items.len());
        for item in items {
            let url = canonical_url(item.article().url());
            let duplicate_of = kept.iter().zip(&kept_urls).find(|(other, other_url)| {
                **other_url == url
                    || duplicate_title_similarity(item.article().title(), other.article().title())
                        >= self.threshold
            });

            if let Some((winner, _)) = duplicate_of {
                debug!(
                    target: TARGET_PIPELINE,
                    "Dropping {} as a duplicate of {}",
                    item.article().url(),
                    winner.article().url()
                );
                continue;
            }
            kept.push(item);
            kept_urls.push(url);
        }

        let after_similarity = kept.len();
        let mut per_domain: HashMap<String, usize> = HashMap::new();
        kept.retain(|item| {
            let count = per_domain
                .entry(item.article().domain().to_lowercase())
                .or_default();
            *count += 1;
            *count <= self.max_per_domain
        });

        info!(
            target: TARGET_PIPELINE,
            "Deduplicated {} articles to {} ({} near-duplicates, {} over domain cap)",
            total,
            kept.len(),
            total - after_similarity,
            after_similarity - kept.len()
        );
        kept
    }
}
