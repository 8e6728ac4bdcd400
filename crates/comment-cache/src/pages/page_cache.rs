//! Read cache for comment listings.
//!
//! Entries are keyed by (page, per_page) and expire after a fixed TTL unless
//! a write invalidates them first. Invalidation clears the whole keyspace:
//! any successful create or update drops every cached page. With low write
//! volume this is a deliberate correctness-first simplification, not a bug.

use serde::{de::DeserializeOwned, Serialize};

use crate::pool::{RedisPool, RedisResult};

/// Key prefix for cached comment pages
const PAGE_KEY_PREFIX: &str = "comments:page:";

/// SCAN batch size for invalidation
const SCAN_COUNT: usize = 100;

/// Cache for paged comment listings
#[derive(Clone)]
pub struct PageCache {
    pool: RedisPool,
    ttl_secs: u64,
}

impl PageCache {
    /// Create a new page cache with the given TTL
    #[must_use]
    pub fn new(pool: RedisPool, ttl_secs: u64) -> Self {
        Self { pool, ttl_secs }
    }

    /// Cache key for a (page, per_page) tuple
    #[must_use]
    pub fn key(page: i64, per_page: i64) -> String {
        format!("{PAGE_KEY_PREFIX}{page}:{per_page}")
    }

    /// Look up a cached page payload
    pub async fn get<T: DeserializeOwned>(&self, page: i64, per_page: i64) -> RedisResult<Option<T>> {
        self.pool.get_value(&Self::key(page, per_page)).await
    }

    /// Store a page payload with the configured TTL
    pub async fn set<T: Serialize>(&self, page: i64, per_page: i64, payload: &T) -> RedisResult<()> {
        self.pool
            .set(&Self::key(page, per_page), payload, Some(self.ttl_secs))
            .await
    }

    /// Drop every cached page
    pub async fn clear(&self) -> RedisResult<()> {
        let pattern = format!("{PAGE_KEY_PREFIX}*");
        let keys = self.pool.scan_keys(&pattern, SCAN_COUNT).await?;
        let dropped = self.pool.delete_many(&keys).await?;

        tracing::debug!(dropped, "Comment page cache cleared");

        Ok(())
    }
}
