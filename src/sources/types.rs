//! Type definitions for the sources module.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::CandidateArticle;

/// A loosely shaped article as a provider reports it, before validation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderItem {
    pub url: Option<String>,
    pub title: Option<String>,
    pub published: Option<String>,
    /// Publisher URL when `url` points at an aggregator redirect
    pub source_url: Option<String>,
    pub language: Option<String>,
    pub image_url: Option<String>,
    pub summary: Option<String>,
}

/// What happened when one provider was tried
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AttemptOutcome {
    /// Provider produced this many usable articles and won
    WithData(usize),
    /// Provider answered, but nothing survived filtering
    Empty { fetched: usize },
    /// Every query to the provider failed or timed out
    Failed(String),
}

impl fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptOutcome::WithData(n) => write!(f, "{} usable articles", n),
            AttemptOutcome::Empty { fetched } => {
                write!(f, "no usable articles ({} fetched)", fetched)
            }
            AttemptOutcome::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderAttempt {
    pub provider: String,
    pub outcome: AttemptOutcome,
}

/// Result of walking the fallback chain
#[derive(Debug, Clone, Default)]
pub struct FetchOutcome {
    pub articles: Vec<CandidateArticle>,
    /// Id of the provider whose output was used, if any
    pub source: Option<String>,
    pub attempts: Vec<ProviderAttempt>,
}

impl FetchOutcome {
    pub fn has_data(&self) -> bool {
        self.source.is_some() && !self.articles.is_empty()
    }
}
