//! News providers and the profile lookup, plus the fallback chain that walks
//! providers in priority order.

mod fetcher;
mod ingest;
pub mod rss;
mod types;

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;

use crate::types::{RawArticle, Subject};

pub use self::fetcher::{fetch_from_provider, FallbackFetcher};
pub use self::ingest::*;
pub use self::types::*;

/// One news provider. Returns an empty list when a query has no results and
/// an error only for transport or authentication failures.
#[async_trait]
pub trait SourceClient: Send + Sync {
    /// Stable identifier reported as the result's data source
    fn id(&self) -> &str;

    async fn fetch(&self, query: &str, max_results: usize) -> Result<Vec<RawArticle>>;
}

/// Resolves a subject id to the official's profile
#[async_trait]
pub trait ProfileLookup: Send + Sync {
    /// `Ok(None)` means the id is unknown
    async fn get_subject(&self, id: &str) -> Result<Option<Subject>>;
}

/// In-memory profile lookup
#[derive(Debug, Clone, Default)]
pub struct StaticProfiles {
    subjects: HashMap<String, Subject>,
}

impl StaticProfiles {
    pub fn new<I: IntoIterator<Item = Subject>>(subjects: I) -> Self {
        Self {
            subjects: subjects.into_iter().map(|s| (s.id.clone(), s)).collect(),
        }
    }
}

#[async_trait]
impl ProfileLookup for StaticProfiles {
    async fn get_subject(&self, id: &str) -> Result<Option<Subject>> {
        Ok(self.subjects.get(id).cloned())
    }
}
