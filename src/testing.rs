//! Test doubles and fixtures shared across module tests.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::time::sleep;

use crate::sources::SourceClient;
use crate::types::{CandidateArticle, RawArticle};

/// English article published `hours_ago` hours before now
pub fn raw_article(url: &str, title: &str, hours_ago: i64, domain: &str) -> RawArticle {
    RawArticle {
        url: url.to_string(),
        title: title.to_string(),
        published: Utc::now() - Duration::hours(hours_ago),
        source_domain: domain.to_string(),
        language: "en".to_string(),
        image_url: None,
        summary: None,
    }
}

pub fn candidate(url: &str, title: &str, hours_ago: i64, domain: &str) -> CandidateArticle {
    accept_all(vec![raw_article(url, title, hours_ago, domain)]).remove(0)
}

/// Relevance stand-in that keeps everything
pub fn accept_all(raw: Vec<RawArticle>) -> Vec<CandidateArticle> {
    raw.into_iter()
        .map(|article| CandidateArticle {
            article,
            passed_quality: true,
            passed_disambiguation: true,
        })
        .collect()
}

/// Scriptable provider
#[derive(Default)]
pub struct MockSource {
    id: String,
    articles: Vec<RawArticle>,
    per_query: HashMap<String, Vec<RawArticle>>,
    fail_all: bool,
    failing_queries: HashSet<String>,
    slow_queries: HashSet<String>,
    calls: AtomicUsize,
}

impl MockSource {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Self::default()
        }
    }

    /// Returned for every query without a specific response
    pub fn with_articles(mut self, articles: Vec<RawArticle>) -> Self {
        self.articles = articles;
        self
    }

    pub fn with_query(mut self, query: &str, articles: Vec<RawArticle>) -> Self {
        self.per_query.insert(query.to_string(), articles);
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail_all = true;
        self
    }

    pub fn failing_query(mut self, query: &str) -> Self {
        self.failing_queries.insert(query.to_string());
        self
    }

    /// Query that never answers within any reasonable timeout
    pub fn slow_query(mut self, query: &str) -> Self {
        self.slow_queries.insert(query.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SourceClient for MockSource {
    fn id(&self) -> &str {
        &self.id
    }

    async fn fetch(&self, query: &str, max_results: usize) -> Result<Vec<RawArticle>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_all || self.failing_queries.contains(query) {
            return Err(anyhow!("{}: upstream returned 503", self.id));
        }
        if self.slow_queries.contains(query) {
            sleep(tokio::time::Duration::from_secs(3600)).await;
        }

        let articles = self.per_query.get(query).unwrap_or(&self.articles);
        Ok(articles.iter().take(max_results).cloned().collect())
    }
}
