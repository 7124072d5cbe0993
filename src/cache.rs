//! Result cache for whole pipeline runs.

use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::fmt;
use tokio::time::{Duration, Instant};
use tracing::debug;

use crate::types::PipelineResult;
use crate::TARGET_CACHE;

/// Identity of one cached page
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub subject_id: String,
    pub limit: usize,
    pub page: usize,
    pub version: String,
}

impl CacheKey {
    pub fn new(subject_id: &str, limit: usize, page: usize, version: &str) -> Self {
        Self {
            subject_id: subject_id.to_string(),
            limit,
            page,
            version: version.to_string(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "news:{}:{}:{}:{}",
            self.subject_id, self.limit, self.page, self.version
        )
    }
}

/// Storage for computed results with a per-entry time to live
#[async_trait]
pub trait ResultCache: Send + Sync {
    async fn get(&self, key: &CacheKey) -> Result<Option<PipelineResult>>;

    /// Overwrites any existing entry for `key`
    async fn set(&self, key: CacheKey, value: PipelineResult, ttl: Duration) -> Result<()>;
}

struct CacheEntry {
    value: PipelineResult,
    expires_at: Instant,
}

/// In-process cache on a sharded concurrent map. Expired entries are
/// evicted on read or by [`MemoryCache::purge_expired`].
#[derive(Default)]
pub struct MemoryCache {
    entries: DashMap<CacheKey, CacheEntry>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every expired entry, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.expires_at > now);
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            debug!(target: TARGET_CACHE, "Purged {} expired entries", removed);
        }
        removed
    }

    /// Entries currently stored, expired or not
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl ResultCache for MemoryCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<PipelineResult>> {
        let now = Instant::now();
        if let Some(entry) = self.entries.get(key) {
            if entry.expires_at > now {
                debug!(target: TARGET_CACHE, "Cache hit for {}", key);
                return Ok(Some(entry.value.clone()));
            }
        }

        // Guard dropped above; remove_if takes the shard write lock
        if self
            .entries
            .remove_if(key, |_, entry| entry.expires_at <= now)
            .is_some()
        {
            debug!(target: TARGET_CACHE, "Evicted expired entry {}", key);
        } else {
            debug!(target: TARGET_CACHE, "Cache miss for {}", key);
        }
        Ok(None)
    }

    async fn set(&self, key: CacheKey, value: PipelineResult, ttl: Duration) -> Result<()> {
        debug!(target: TARGET_CACHE, "Caching {} for {} seconds", key, ttl.as_secs());
        self.entries.insert(
            key,
            CacheEntry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ResultStatus;
    use chrono::Utc;

    fn result(message: &str) -> PipelineResult {
        PipelineResult {
            articles: Vec::new(),
            total_count: 0,
            page: 1,
            limit: 10,
            total_pages: 0,
            has_next_page: false,
            search_terms: vec!["Jon Ossoff".to_string()],
            data_source: None,
            status: ResultStatus::NoData,
            message: message.to_string(),
            generated_at: Utc::now(),
        }
    }

    fn key(subject: &str, page: usize) -> CacheKey {
        CacheKey::new(subject, 10, page, "news-v4")
    }

    #[tokio::test(start_paused = true)]
    async fn test_entries_expire() {
        let cache = MemoryCache::new();
        cache
            .set(key("O000174", 1), result("first"), Duration::from_secs(60))
            .await
            .unwrap();

        assert!(cache.get(&key("O000174", 1)).await.unwrap().is_some());
        tokio::time::advance(Duration::from_secs(61)).await;
        assert!(cache.get(&key("O000174", 1)).await.unwrap().is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let cache = MemoryCache::new();
        let ttl = Duration::from_secs(60);
        cache.set(key("O000174", 1), result("first"), ttl).await.unwrap();
        cache.set(key("O000174", 1), result("second"), ttl).await.unwrap();

        let hit = cache.get(&key("O000174", 1)).await.unwrap().unwrap();
        assert_eq!(hit.message, "second");
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let cache = MemoryCache::new();
        let ttl = Duration::from_secs(60);
        cache.set(key("O000174", 1), result("page one"), ttl).await.unwrap();

        assert!(cache.get(&key("O000174", 2)).await.unwrap().is_none());
        assert!(cache.get(&key("W000790", 1)).await.unwrap().is_none());
        assert!(cache
            .get(&CacheKey::new("O000174", 10, 1, "news-v5"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_purge_expired() {
        let cache = MemoryCache::new();
        cache.set(key("a", 1), result("short"), Duration::from_secs(10)).await.unwrap();
        cache.set(key("b", 1), result("long"), Duration::from_secs(600)).await.unwrap();

        tokio::time::advance(Duration::from_secs(30)).await;
        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&key("b", 1)).await.unwrap().is_some());
    }

    #[test]
    fn test_key_display() {
        assert_eq!(key("O000174", 3).to_string(), "news:O000174:10:3:news-v4");
    }
}
