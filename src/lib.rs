pub mod cache;
pub mod clustering;
pub mod config;
pub mod dedup;
pub mod environment;
pub mod error;
pub mod impact;
pub mod logging;
pub mod pagination;
pub mod pipeline;
pub mod places;
pub mod query;
pub mod relevance;
pub mod sources;
pub mod text;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use config::NewsConfig;
pub use error::NewsError;
pub use pipeline::NewsPipeline;

pub const TARGET_FETCH: &str = "news_fetch";
pub const TARGET_PIPELINE: &str = "news_pipeline";
pub const TARGET_CACHE: &str = "news_cache";
