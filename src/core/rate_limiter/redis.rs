//! Redis-backed fixed-window rate limiter
//!
//! Shared-store backend for multi-instance deployments. Each window is an
//! INCR-counted key with a TTL equal to the window length, so every instance
//! observes the same counters under the identical contract as the in-memory
//! backend.

use super::RateLimitBackend;
use super::types::RateLimitDecision;
use crate::utils::error::Result;
use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use std::time::Duration;
use tracing::{debug, info};

/// Redis-backed rate limiter
pub struct RedisRateLimiter {
    conn: ConnectionManager,
    scope: String,
    limit: u32,
    window: Duration,
    enabled: bool,
}

impl RedisRateLimiter {
    /// Connect to Redis and build a limiter scoped to one logical endpoint
    pub async fn connect(
        url: &str,
        scope: &str,
        limit: u32,
        window: Duration,
        enabled: bool,
    ) -> Result<Self> {
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        info!("Connected rate limiter scope '{}' to Redis", scope);

        Ok(Self {
            conn,
            scope: scope.to_string(),
            limit,
            window,
            enabled,
        })
    }

    fn bucket_key(&self, key: &str) -> String {
        format!("embedgate:ratelimit:{}:{}", self.scope, key)
    }
}

#[async_trait]
impl RateLimitBackend for RedisRateLimiter {
    async fn check_and_record(&self, key: &str) -> Result<RateLimitDecision> {
        if !self.enabled {
            return Ok(RateLimitDecision::unlimited(self.limit));
        }

        let bucket_key = self.bucket_key(key);
        let mut conn = self.conn.clone();

        let count: u32 = conn.incr(&bucket_key, 1u32).await?;
        if count == 1 {
            // First hit opens the window
            let _: bool = conn.expire(&bucket_key, self.window.as_secs() as i64).await?;
        }

        let allowed = count <= self.limit;
        let remaining = self.limit.saturating_sub(count);

        let retry_after_secs = if allowed {
            None
        } else {
            let ttl: i64 = conn.ttl(&bucket_key).await?;
            // A missing TTL means the expiry raced away; fall back to a full window
            let secs = if ttl > 0 {
                ttl as u64
            } else {
                self.window.as_secs()
            };
            Some(secs.max(1))
        };

        if !allowed {
            debug!(
                "Rate limit exceeded for {} in scope {}: {}/{}",
                key, self.scope, count, self.limit
            );
        }

        Ok(RateLimitDecision {
            allowed,
            limit: self.limit,
            remaining,
            retry_after_secs,
        })
    }
}
