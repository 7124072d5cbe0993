//! End-to-end news retrieval for one subject: query generation, fallback
//! fetch, relevance filtering, clustering, deduplication, local impact
//! scoring, then pagination behind the result cache.

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::cache::{CacheKey, ResultCache};
use crate::clustering::ClusteringEngine;
use crate::config::NewsConfig;
use crate::dedup::Deduplicator;
use crate::error::NewsError;
use crate::impact::LocalImpactScorer;
use crate::pagination::{paginate, PageInfo};
use crate::places::DistrictPlaces;
use crate::query::QueryGenerator;
use crate::relevance::RelevanceFilter;
use crate::sources::{FallbackFetcher, ProfileLookup, SourceClient};
use crate::types::{PipelineResult, ResultStatus, ScoredArticle, Subject};
use crate::TARGET_PIPELINE;

pub struct NewsPipeline {
    profiles: Arc<dyn ProfileLookup>,
    cache: Arc<dyn ResultCache>,
    fetcher: FallbackFetcher,
    queries: QueryGenerator,
    relevance: RelevanceFilter,
    clustering: ClusteringEngine,
    dedup: Deduplicator,
    impact: LocalImpactScorer,
    config: NewsConfig,
}

impl NewsPipeline {
    /// `providers` are tried in the order given
    pub fn new(
        profiles: Arc<dyn ProfileLookup>,
        providers: Vec<Arc<dyn SourceClient>>,
        cache: Arc<dyn ResultCache>,
        places: DistrictPlaces,
        config: NewsConfig,
    ) -> Self {
        Self {
            profiles,
            cache,
            fetcher: FallbackFetcher::new(providers, &config),
            queries: QueryGenerator::new(&config),
            relevance: RelevanceFilter::new(&config),
            clustering: ClusteringEngine::new(&config),
            dedup: Deduplicator::new(&config),
            impact: LocalImpactScorer::new(&config, places),
            config,
        }
    }

    pub fn config(&self) -> &NewsConfig {
        &self.config
    }

    pub fn search_terms(&self, subject: &Subject) -> Vec<String> {
        self.queries.generate(subject)
    }

    /// One page of scored news for `subject_id`.
    ///
    /// `page` starts at 1 and `limit` must be between 1 and the configured
    /// maximum. An empty result is returned as `ResultStatus::NoData`, not as
    /// an error.
    pub async fn get_news(
        &self,
        subject_id: &str,
        page: usize,
        limit: usize,
    ) -> Result<PipelineResult, NewsError> {
        let subject_id = subject_id.trim();
        self.validate(subject_id, page, limit)?;

        let key = CacheKey::new(subject_id, limit, page, &self.config.version_tag);
        match self.cache.get(&key).await {
            Ok(Some(cached)) => {
                debug!(target: TARGET_PIPELINE, "Serving {} from cache", key);
                return Ok(cached);
            }
            Ok(None) => {}
            Err(err) => warn!(target: TARGET_PIPELINE, "Cache read for {} failed: {}", key, err),
        }

        let subject = self
            .profiles
            .get_subject(subject_id)
            .await
            .map_err(NewsError::Lookup)?
            .ok_or_else(|| NewsError::SubjectNotFound(subject_id.to_string()))?;

        let result = self.run(&subject, page, limit).await;

        if let Err(err) = self
            .cache
            .set(key, result.clone(), self.config.cache_ttl())
            .await
        {
            warn!(target: TARGET_PIPELINE, "Cache write for {} failed: {}", subject_id, err);
        }

        Ok(result)
    }

    fn validate(&self, subject_id: &str, page: usize, limit: usize) -> Result<(), NewsError> {
        if subject_id.is_empty() {
            return Err(NewsError::InvalidRequest("subject id is empty".to_string()));
        }
        if page < 1 {
            return Err(NewsError::InvalidRequest(format!(
                "page must be at least 1, got {}",
                page
            )));
        }
        if limit < 1 || limit > self.config.max_page_limit {
            return Err(NewsError::InvalidRequest(format!(
                "limit must be between 1 and {}, got {}",
                self.config.max_page_limit, limit
            )));
        }
        Ok(())
    }

    async fn run(&self, subject: &Subject, page: usize, limit: usize) -> PipelineResult {
        let search_terms = self.queries.generate(subject);
        info!(
            target: TARGET_PIPELINE,
            "Fetching news for {} ({}) with {} terms across providers {:?}",
            subject.full_name,
            subject.id,
            search_terms.len(),
            self.fetcher.provider_ids()
        );

        let outcome = self
            .fetcher
            .fetch(&search_terms, |raw| self.relevance.filter(raw, subject))
            .await;

        if !outcome.has_data() {
            for attempt in &outcome.attempts {
                debug!(target: TARGET_PIPELINE, "{}: {}", attempt.provider, attempt.outcome);
            }
            warn!(
                target: TARGET_PIPELINE,
                "No news found for {} after {} provider attempts",
                subject.full_name,
                outcome.attempts.len()
            );
            return PipelineResult {
                articles: Vec::new(),
                total_count: 0,
                page,
                limit,
                total_pages: 0,
                has_next_page: false,
                search_terms,
                data_source: None,
                status: ResultStatus::NoData,
                message: format!("No recent news found for {}", subject.full_name),
                generated_at: Utc::now(),
            };
        }

        let representatives = self.clustering.cluster(outcome.articles).into_representatives();
        let ranked = self.dedup.dedupe(representatives);

        let scorer = self.impact.for_subject(subject);
        let scored: Vec<ScoredArticle> = ranked
            .into_iter()
            .map(|(candidate, cluster)| {
                let impact = scorer.score(&candidate);
                ScoredArticle {
                    candidate,
                    local_impact_score: impact.score,
                    relevance_tier: impact.tier,
                    factors: impact.factors,
                    cluster,
                }
            })
            .collect();

        let total_count = scored.len();
        let page_info = PageInfo::new(total_count, page, limit);
        let articles = paginate(&scored, page, limit);
        let source = outcome.source.unwrap_or_default();

        info!(
            target: TARGET_PIPELINE,
            "Returning page {}/{} ({} of {} articles) for {} from {}",
            page,
            page_info.total_pages,
            articles.len(),
            total_count,
            subject.full_name,
            source
        );

        PipelineResult {
            articles,
            total_count,
            page,
            limit,
            total_pages: page_info.total_pages,
            has_next_page: page_info.has_next_page,
            search_terms,
            message: format!("{} articles from {}", total_count, source),
            data_source: Some(source),
            status: ResultStatus::Ok,
            generated_at: Utc::now(),
        }
    }
}
