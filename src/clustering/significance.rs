use chrono::{DateTime, Utc};

/// Importance score for a story cluster.
///
/// The score combines:
/// - Number of articles (logarithmic scaling)
/// - Source diversity (distinct domains per article, 1.0 to 2.0)
/// - Recency of the newest article (halves after 7 days)
pub fn cluster_importance(
    article_count: usize,
    distinct_domains: usize,
    latest: DateTime<Utc>,
    now: DateTime<Utc>,
) -> f64 {
    if article_count == 0 {
        return 0.0;
    }

    let days_since_latest = ((now - latest).num_seconds() as f64 / 86400.0).max(0.0);
    let recency_factor = 1.0 / (1.0 + days_since_latest / 7.0);

    let article_factor = (1.0 + article_count as f64).ln();
    let diversity_multiplier = 1.0 + distinct_domains.min(article_count) as f64 / article_count as f64;

    article_factor * diversity_multiplier * recency_factor
}
