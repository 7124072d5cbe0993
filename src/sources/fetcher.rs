//! Provider fallback chain.

use anyhow::{anyhow, Result};
use futures::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::time::{timeout, Duration};
use tracing::{debug, info, warn};

use super::ingest::is_well_formed;
use super::types::{AttemptOutcome, FetchOutcome, ProviderAttempt};
use super::SourceClient;
use crate::config::NewsConfig;
use crate::types::{CandidateArticle, RawArticle};
use crate::TARGET_FETCH;

/// Runs every search term against one provider concurrently.
///
/// Each call is bounded by `request_timeout` and failures are isolated per
/// call. Results are merged in term order with exact-URL dedupe. Returns an
/// error only when every call failed.
pub async fn fetch_from_provider(
    provider: &dyn SourceClient,
    terms: &[String],
    max_results: usize,
    request_timeout: Duration,
) -> Result<Vec<RawArticle>> {
    let calls = terms.iter().map(|term| async move {
        let result = timeout(request_timeout, provider.fetch(term, max_results)).await;
        (term, result)
    });
    let results = join_all(calls).await;

    let mut failures = 0;
    let mut last_error = String::new();
    let mut seen = HashSet::new();
    let mut articles = Vec::new();

    for (term, result) in results {
        match result {
            Ok(Ok(batch)) => {
                debug!(target: TARGET_FETCH, "{}: '{}' returned {} articles", provider.id(), term, batch.len());
                for article in batch {
                    if !is_well_formed(&article) {
                        debug!(target: TARGET_FETCH, "{}: dropping malformed article {:?}", provider.id(), article.url);
                        continue;
                    }
                    if seen.insert(article.url.clone()) {
                        articles.push(article);
                    }
                }
            }
            Ok(Err(err)) => {
                warn!(target: TARGET_FETCH, "{}: query '{}' failed: {}", provider.id(), term, err);
                failures += 1;
                last_error = err.to_string();
            }
            Err(_) => {
                warn!(
                    target: TARGET_FETCH,
                    "{}: query '{}' timed out after {} seconds",
                    provider.id(), term, request_timeout.as_secs()
                );
                failures += 1;
                last_error = format!("timed out after {:?}", request_timeout);
            }
        }
    }

    if !terms.is_empty() && failures == terms.len() {
        return Err(anyhow!(
            "all {} queries failed, last error: {}",
            failures,
            last_error
        ));
    }

    Ok(articles)
}

/// Tries providers strictly in priority order and keeps the first one that
/// yields usable articles. Lower-priority output is never merged in.
pub struct FallbackFetcher {
    providers: Vec<Arc<dyn SourceClient>>,
    per_query_max_results: usize,
    request_timeout: Duration,
}

impl FallbackFetcher {
    pub fn new(providers: Vec<Arc<dyn SourceClient>>, config: &NewsConfig) -> Self {
        Self {
            providers,
            per_query_max_results: config.per_query_max_results,
            request_timeout: config.request_timeout(),
        }
    }

    pub fn provider_ids(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.id()).collect()
    }

    /// Walk the chain. `usable` turns a provider's raw output into the
    /// articles that survive relevance filtering; an empty return sends the
    /// chain on to the next provider, exactly as a provider failure does.
    pub async fn fetch<F>(&self, terms: &[String], mut usable: F) -> FetchOutcome
    where
        F: FnMut(Vec<RawArticle>) -> Vec<CandidateArticle>,
    {
        let mut attempts = Vec::with_capacity(self.providers.len());

        for provider in &self.providers {
            let id = provider.id().to_string();
            debug!(target: TARGET_FETCH, "Trying provider {} with {} terms", id, terms.len());

            let outcome = match fetch_from_provider(
                provider.as_ref(),
                terms,
                self.per_query_max_results,
                self.request_timeout,
            )
            .await
            {
                Ok(raw) => {
                    let fetched = raw.len();
                    let articles = usable(raw);
                    if !articles.is_empty() {
                        info!(
                            target: TARGET_FETCH,
                            "Provider {} supplied {} usable articles ({} fetched)",
                            id, articles.len(), fetched
                        );
                        attempts.push(ProviderAttempt {
                            provider: id.clone(),
                            outcome: AttemptOutcome::WithData(articles.len()),
                        });
                        return FetchOutcome {
                            articles,
                            source: Some(id),
                            attempts,
                        };
                    }
                    AttemptOutcome::Empty { fetched }
                }
                Err(err) => AttemptOutcome::Failed(err.to_string()),
            };

            warn!(target: TARGET_FETCH, "Provider {} gave no data ({}), falling back", id, outcome);
            attempts.push(ProviderAttempt {
                provider: id,
                outcome,
            });
        }

        warn!(target: TARGET_FETCH, "No provider returned usable articles");
        FetchOutcome {
            articles: Vec::new(),
            source: None,
            attempts,
        }
    }
}
