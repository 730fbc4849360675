use redis::aio::ConnectionManager;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::CacheSettings;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Two-tier cache for read-mostly lookups
///
/// L1 is an in-process moka cache, L2 is Redis shared across instances.
/// Values are stored as JSON in both tiers.
pub struct CacheManager {
    redis: Arc<tokio::sync::Mutex<ConnectionManager>>,
    l1_cache: moka::future::Cache<String, Vec<u8>>,
    ttl_secs: u64,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CacheManager {
    pub async fn new(redis_url: &str, l1_size: u64, ttl_secs: u64) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let redis = ConnectionManager::new(client).await?;

        let l1_cache = moka::future::CacheBuilder::new(l1_size)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Ok(Self {
            redis: Arc::new(tokio::sync::Mutex::new(redis)),
            l1_cache,
            ttl_secs,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        })
    }

    pub async fn from_settings(settings: &CacheSettings) -> Result<Self, CacheError> {
        Self::new(
            &settings.redis_url,
            settings.l1_cache_size.unwrap_or(1000),
            settings.ttl_secs.unwrap_or(300),
        )
        .await
    }

    /// Look a value up, L1 first. `Ok(None)` is a miss.
    pub async fn get<T>(&self, key: &str) -> Result<Option<T>, CacheError>
    where
        T: DeserializeOwned,
    {
        if let Some(bytes) = self.l1_cache.get(key).await {
            tracing::trace!("L1 cache hit: {}", key);
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(Some(serde_json::from_slice(&bytes)?));
        }

        let value: Option<String> = {
            let mut conn = self.redis.lock().await;
            redis::cmd("GET").arg(key).query_async(&mut *conn).await?
        };

        match value {
            Some(json) => {
                tracing::trace!("L2 cache hit: {}", key);
                self.hits.fetch_add(1, Ordering::Relaxed);
                let parsed = serde_json::from_str(&json)?;
                self.l1_cache.insert(key.to_string(), json.into_bytes()).await;
                Ok(Some(parsed))
            }
            None => {
                tracing::trace!("Cache miss: {}", key);
                self.misses.fetch_add(1, Ordering::Relaxed);
                Ok(None)
            }
        }
    }

    /// Store a value in both tiers with the configured TTL
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let json = serde_json::to_string(value)?;

        self.l1_cache.insert(key.to_string(), json.as_bytes().to_vec()).await;

        let mut conn = self.redis.lock().await;
        let _: () = redis::cmd("SETEX")
            .arg(key)
            .arg(self.ttl_secs)
            .arg(json)
            .query_async(&mut *conn)
            .await?;

        tracing::trace!("Cache set: {}", key);
        Ok(())
    }

    pub async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.l1_cache.invalidate(key).await;

        let mut conn = self.redis.lock().await;
        let _: () = redis::cmd("DEL").arg(key).query_async(&mut *conn).await?;
        Ok(())
    }

    /// Drop every key matching a glob pattern.
    ///
    /// L1 has no pattern lookup so it is cleared wholesale; Redis is walked
    /// with SCAN to avoid blocking the server.
    pub async fn invalidate_pattern(&self, pattern: &str) -> Result<u64, CacheError> {
        self.l1_cache.invalidate_all();

        let mut conn = self.redis.lock().await;
        let mut cursor: u64 = 0;
        let mut removed: u64 = 0;

        loop {
            let (next, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(200)
                .query_async(&mut *conn)
                .await?;

            if !keys.is_empty() {
                removed += keys.len() as u64;
                let _: () = redis::cmd("DEL").arg(keys).query_async(&mut *conn).await?;
            }

            if next == 0 {
                break;
            }
            cursor = next;
        }

        tracing::debug!("Invalidated {} keys matching {}", removed, pattern);
        Ok(removed)
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats::from_counts(
            self.l1_cache.entry_count(),
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        )
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    #[serde(rename = "l1Entries")]
    pub l1_entries: u64,
    pub hits: u64,
    pub misses: u64,
    #[serde(rename = "hitRate")]
    pub hit_rate: f64,
}

impl CacheStats {
    fn from_counts(l1_entries: u64, hits: u64, misses: u64) -> Self {
        let total = hits + misses;
        Self {
            l1_entries,
            hits,
            misses,
            hit_rate: if total > 0 { hits as f64 / total as f64 } else { 0.0 },
        }
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Glob covering every recommendation entry
    pub const RECOMMENDATIONS_PATTERN: &'static str = "recs:*";

    pub fn skills() -> String {
        "skills:all".to_string()
    }

    /// A seeker's job recommendations. The location parameters are part of
    /// the key since they change the result.
    pub fn job_recommendations(profile_id: i64, limit: usize, location: &str) -> String {
        format!("recs:jobs:{}:{}:{}", profile_id, limit, location)
    }

    /// A job's candidate recommendations
    pub fn candidate_recommendations(job_id: i64, limit: usize, location: &str) -> String {
        format!("recs:candidates:{}:{}:{}", job_id, limit, location)
    }
}
