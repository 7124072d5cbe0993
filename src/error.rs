use thiserror::Error;

/// Failures surfaced to callers of `NewsPipeline::get_news`.
///
/// Provider outages and empty results are not errors: the first is recovered by
/// the fallback chain and the second is reported as a `NoData` result.
#[derive(Error, Debug)]
pub enum NewsError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Subject not found: {0}")]
    SubjectNotFound(String),

    #[error("Profile lookup failed: {0}")]
    Lookup(#[source] anyhow::Error),
}
