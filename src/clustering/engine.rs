use chrono::{DateTime, Duration, Utc};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, info};

use super::category::categorize;
use super::significance::cluster_importance;
use super::similarity::{jaccard, title_tokens};
use super::types::{ClusteringOutcome, StoryCluster};
use crate::config::NewsConfig;
use crate::types::CandidateArticle;
use crate::TARGET_PIPELINE;

/// Groups candidates into story clusters by title similarity inside a
/// time window.
#[derive(Debug, Clone)]
pub struct ClusteringEngine {
    threshold: f64,
    window: Duration,
    min_cluster_size: usize,
    max_clusters: usize,
}

struct Group {
    members: Vec<(CandidateArticle, HashSet<String>)>,
}

impl ClusteringEngine {
    pub fn new(config: &NewsConfig) -> Self {
        Self {
            threshold: config.cluster_similarity_threshold,
            window: Duration::hours(config.cluster_window_hours),
            min_cluster_size: config.min_cluster_size.max(2),
            max_clusters: config.max_clusters,
        }
    }

    pub fn cluster(&self, candidates: Vec<CandidateArticle>) -> ClusteringOutcome {
        self.cluster_at(candidates, Utc::now())
    }

    /// Cluster with recency measured against `now`
    pub fn cluster_at(
        &self,
        mut candidates: Vec<CandidateArticle>,
        now: DateTime<Utc>,
    ) -> ClusteringOutcome {
        let total = candidates.len();
        candidates.sort_by(newest_first);

        let mut groups: Vec<Group> = Vec::new();
        for article in candidates {
            let tokens = title_tokens(article.title());

            let mut best: Option<(usize, f64)> = None;
            for (idx, group) in groups.iter().enumerate() {
                let score = self.group_similarity(group, &article, &tokens);
                if score >= self.threshold && best.map_or(true, |(_, s)| score > s) {
                    best = Some((idx, score));
                }
            }

            match best {
                Some((idx, score)) => {
                    debug!(
                        target: TARGET_PIPELINE,
                        "'{}' joins group {} (similarity {:.2})", article.title(), idx, score
                    );
                    groups[idx].members.push((article, tokens));
                }
                None => groups.push(Group {
                    members: vec![(article, tokens)],
                }),
            }
        }

        let mut clusters = Vec::new();
        let mut singletons = Vec::new();
        for group in groups {
            let members: Vec<CandidateArticle> = group.members.into_iter().map(|(a, _)| a).collect();
            if members.len() < self.min_cluster_size {
                singletons.extend(members);
            } else if let Some(cluster) = self.build_cluster(members, now) {
                clusters.push(cluster);
            }
        }

        clusters.sort_by(|a, b| {
            b.importance
                .partial_cmp(&a.importance)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.primary.url().cmp(b.primary.url()))
        });

        if clusters.len() > self.max_clusters {
            let dissolved = clusters.split_off(self.max_clusters);
            debug!(
                target: TARGET_PIPELINE,
                "Dissolving {} low-importance clusters to their primaries", dissolved.len()
            );
            singletons.extend(dissolved.into_iter().map(|c| c.primary));
        }

        info!(
            target: TARGET_PIPELINE,
            "Clustered {} articles into {} clusters and {} singletons",
            total, clusters.len(), singletons.len()
        );

        ClusteringOutcome {
            clusters,
            singletons,
        }
    }

    /// Best similarity to any member published within the window
    fn group_similarity(
        &self,
        group: &Group,
        article: &CandidateArticle,
        tokens: &HashSet<String>,
    ) -> f64 {
        group
            .members
            .iter()
            .filter(|(member, _)| (member.published() - article.published()).abs() <= self.window)
            .map(|(_, member_tokens)| jaccard(tokens, member_tokens))
            .fold(0.0, f64::max)
    }

    fn build_cluster(
        &self,
        mut members: Vec<CandidateArticle>,
        now: DateTime<Utc>,
    ) -> Option<StoryCluster> {
        members.sort_by(newest_first);
        let category = categorize(members.iter().map(|a| a.title()));
        let sources: BTreeSet<String> = members.iter().map(|a| a.domain().to_string()).collect();
        let size = members.len();

        let mut members = members.into_iter();
        let primary = members.next()?;
        let related: Vec<CandidateArticle> = members.collect();

        let latest = primary.published();
        let earliest = related
            .iter()
            .map(|a| a.published())
            .min()
            .map_or(latest, |oldest| oldest.min(latest));

        Some(StoryCluster {
            importance: cluster_importance(size, sources.len(), latest, now),
            primary,
            related,
            sources,
            category,
            earliest,
            latest,
        })
    }
}

/// Most recent first, ties broken by the lexicographically smallest URL
pub fn newest_first(a: &CandidateArticle, b: &CandidateArticle) -> Ordering {
    b.published()
        .cmp(&a.published())
        .then_with(|| a.url().cmp(b.url()))
}
