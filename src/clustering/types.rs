use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

use super::category::StoryCategory;
use crate::types::{CandidateArticle, ClusterSummary};

/// A group of articles covering the same event
#[derive(Debug, Clone)]
pub struct StoryCluster {
    pub primary: CandidateArticle,
    /// Never contains the primary
    pub related: Vec<CandidateArticle>,
    pub sources: BTreeSet<String>,
    pub category: StoryCategory,
    pub importance: f64,
    pub earliest: DateTime<Utc>,
    pub latest: DateTime<Utc>,
}

impl StoryCluster {
    pub fn size(&self) -> usize {
        self.related.len() + 1
    }

    pub fn summary(&self) -> ClusterSummary {
        ClusterSummary {
            related_count: self.related.len(),
            related_urls: self.related.iter().map(|a| a.url().to_string()).collect(),
            sources: self.sources.iter().cloned().collect(),
            category: self.category.to_string(),
            importance: self.importance,
        }
    }
}

/// Result of one clustering pass
#[derive(Debug, Clone, Default)]
pub struct ClusteringOutcome {
    /// Ordered by importance, highest first
    pub clusters: Vec<StoryCluster>,
    pub singletons: Vec<CandidateArticle>,
}

impl ClusteringOutcome {
    /// One article per story: each cluster's primary with its summary, then
    /// every singleton
    pub fn into_representatives(self) -> Vec<(CandidateArticle, Option<ClusterSummary>)> {
        let mut representatives = Vec::with_capacity(self.clusters.len() + self.singletons.len());
        for cluster in self.clusters {
            let summary = cluster.summary();
            representatives.push((cluster.primary, Some(summary)));
        }
        representatives.extend(self.singletons.into_iter().map(|a| (a, None)));
        representatives
    }
}
