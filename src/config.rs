//! Tunable parameters for the news pipeline.
//!
//! Every threshold the pipeline applies lives here. The defaults were chosen
//! empirically; they can be overridden per deployment with `HERALD_*`
//! environment variables (see [`NewsConfig::from_env`]).

use serde::{Deserialize, Serialize};
use tokio::time::Duration;

use crate::clustering::MIN_CLUSTER_SIMILARITY;
use crate::environment::{get_env_var_as_vec, get_env_var_or};

/// Bumped whenever pipeline output for the same inputs changes shape or content
pub const PIPELINE_VERSION: &str = "news-v4";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsConfig {
    /// Articles older than this many days are dropped
    pub freshness_days: i64,
    pub min_title_chars: usize,
    pub max_title_chars: usize,
    /// Max characters between first and last name for the proximity rule
    pub name_proximity_chars: usize,

    pub max_search_terms: usize,
    pub max_term_chars: usize,
    pub per_query_max_results: usize,
    pub request_timeout_secs: u64,

    /// Loose threshold used to group distinct coverage of one event
    pub cluster_similarity_threshold: f64,
    pub cluster_window_hours: i64,
    pub min_cluster_size: usize,
    pub max_clusters: usize,

    /// Strict threshold used to drop syndicated copies
    pub duplicate_similarity_threshold: f64,
    pub max_articles_per_domain: usize,

    pub high_impact_score: u32,
    pub medium_impact_score: u32,

    pub cache_ttl_secs: u64,
    pub max_page_limit: usize,

    /// Names treated as common in addition to the built-in reference list
    pub extra_common_names: Vec<String>,
    pub version_tag: String,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            freshness_days: 90,
            min_title_chars: 10,
            max_title_chars: 300,
            name_proximity_chars: 100,
            max_search_terms: 20,
            max_term_chars: 100,
            per_query_max_results: 20,
            request_timeout_secs: 10,
            cluster_similarity_threshold: MIN_CLUSTER_SIMILARITY,
            cluster_window_hours: 72,
            min_cluster_size: 2,
            max_clusters: 8,
            duplicate_similarity_threshold: 0.9,
            max_articles_per_domain: 1,
            high_impact_score: 5,
            medium_impact_score: 2,
            cache_ttl_secs: 30 * 60,
            max_page_limit: 50,
            extra_common_names: Vec::new(),
            version_tag: PIPELINE_VERSION.to_string(),
        }
    }
}

impl NewsConfig {
    /// Builds a configuration from the defaults, overridden by any `HERALD_*`
    /// environment variables that are set and parse.
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            freshness_days: get_env_var_or("HERALD_FRESHNESS_DAYS", d.freshness_days),
            min_title_chars: get_env_var_or("HERALD_MIN_TITLE_CHARS", d.min_title_chars),
            max_title_chars: get_env_var_or("HERALD_MAX_TITLE_CHARS", d.max_title_chars),
            name_proximity_chars: get_env_var_or(
                "HERALD_NAME_PROXIMITY_CHARS",
                d.name_proximity_chars,
            ),
            max_search_terms: get_env_var_or("HERALD_MAX_SEARCH_TERMS", d.max_search_terms),
            max_term_chars: get_env_var_or("HERALD_MAX_TERM_CHARS", d.max_term_chars),
            per_query_max_results: get_env_var_or(
                "HERALD_PER_QUERY_MAX_RESULTS",
                d.per_query_max_results,
            ),
            request_timeout_secs: get_env_var_or(
                "HERALD_REQUEST_TIMEOUT_SECS",
                d.request_timeout_secs,
            ),
            cluster_similarity_threshold: get_env_var_or(
                "HERALD_CLUSTER_SIMILARITY",
                d.cluster_similarity_threshold,
            ),
            cluster_window_hours: get_env_var_or(
                "HERALD_CLUSTER_WINDOW_HOURS",
                d.cluster_window_hours,
            ),
            min_cluster_size: get_env_var_or("HERALD_MIN_CLUSTER_SIZE", d.min_cluster_size),
            max_clusters: get_env_var_or("HERALD_MAX_CLUSTERS", d.max_clusters),
            duplicate_similarity_threshold: get_env_var_or(
                "HERALD_DUPLICATE_SIMILARITY",
                d.duplicate_similarity_threshold,
            ),
            max_articles_per_domain: get_env_var_or(
                "HERALD_MAX_PER_DOMAIN",
                d.max_articles_per_domain,
            ),
            high_impact_score: get_env_var_or("HERALD_HIGH_IMPACT_SCORE", d.high_impact_score),
            medium_impact_score: get_env_var_or(
                "HERALD_MEDIUM_IMPACT_SCORE",
                d.medium_impact_score,
            ),
            cache_ttl_secs: get_env_var_or("HERALD_CACHE_TTL_SECS", d.cache_ttl_secs),
            max_page_limit: get_env_var_or("HERALD_MAX_PAGE_LIMIT", d.max_page_limit),
            extra_common_names: get_env_var_as_vec("HERALD_COMMON_NAMES", ';'),
            version_tag: get_env_var_or("HERALD_VERSION_TAG", d.version_tag),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
