use lazy_static::lazy_static;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;

use crate::text::normalize_title;

lazy_static! {
    static ref STOP_WORDS: HashSet<&'static str> = [
        "a", "an", "the", "and", "or", "but", "of", "to", "in", "on", "at", "for", "by", "with",
        "from", "as", "is", "are", "was", "were", "be", "been", "it", "its", "that", "this",
        "these", "those", "after", "before", "over", "into", "about", "amid", "says", "said",
        "would", "could", "will", "new", "up", "out", "he", "she", "they", "his", "her", "their",
        "who", "what", "why", "how", "s",
    ]
    .into_iter()
    .collect();
}

/// Stemmed, stop-word free tokens of a normalized title
pub fn title_tokens(title: &str) -> HashSet<String> {
    let stemmer = Stemmer::create(Algorithm::English);
    normalize_title(title)
        .split_whitespace()
        .filter(|token| !STOP_WORDS.contains(token))
        .map(|token| stemmer.stem(token).to_string())
        .collect()
}

/// Jaccard overlap of two token sets; two empty sets share nothing
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Loose similarity used to group distinct coverage of one event.
///
/// Compare with `dedup::duplicate_title_similarity`, which is much stricter
/// and only collapses near-verbatim copies.
pub fn cluster_title_similarity(a: &str, b: &str) -> f64 {
    jaccard(&title_tokens(a), &title_tokens(b))
}
