//! In-memory fixed-window rate limiter

use super::RateLimitBackend;
use super::types::{RateLimitDecision, WindowBucket};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

/// Per-process rate limiter
///
/// Buckets are created lazily on a client's first request and reset in place
/// once their window has elapsed. A periodic cleanup task drops buckets whose
/// window has lapsed so idle clients do not accumulate over the process
/// lifetime. Check and record happen under a single lock acquisition, so
/// concurrent bursts from the same client cannot undercount.
pub struct MemoryRateLimiter {
    limit: u32,
    window: Duration,
    enabled: bool,
    buckets: Arc<RwLock<HashMap<String, WindowBucket>>>,
}

impl MemoryRateLimiter {
    /// Create a new limiter with the given per-window ceiling
    pub fn new(limit: u32, window: Duration, enabled: bool) -> Self {
        Self {
            limit,
            window,
            enabled,
            buckets: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Drop buckets whose window has lapsed
    pub async fn cleanup(&self) {
        let now = Instant::now();
        let window = self.window;

        let mut buckets = self.buckets.write().await;
        buckets.retain(|_, bucket| now.duration_since(bucket.window_started) < window);
    }

    /// Start the background cleanup task
    pub fn start_cleanup_task(self: Arc<Self>) {
        let limiter = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(60));
            loop {
                interval.tick().await;
                limiter.cleanup().await;
            }
        });
    }

    /// Number of live buckets (test/diagnostic use)
    pub async fn bucket_count(&self) -> usize {
        self.buckets.read().await.len()
    }
}

#[async_trait]
impl RateLimitBackend for MemoryRateLimiter {
    async fn check_and_record(&self, key: &str) -> Result<RateLimitDecision> {
        if !self.enabled {
            return Ok(RateLimitDecision::unlimited(self.limit));
        }

        let now = Instant::now();
        let mut buckets = self.buckets.write().await;
        // Avoid String allocation if the key already has a bucket
        let bucket = if let Some(b) = buckets.get_mut(key) {
            b
        } else {
            buckets
                .entry(key.to_string())
                .or_insert_with(|| WindowBucket::new(now))
        };

        let elapsed = now.duration_since(bucket.window_started);
        if elapsed >= self.window {
            bucket.count = 0;
            bucket.window_started = now;
        }

        bucket.count += 1;
        let allowed = bucket.count <= self.limit;
        let remaining = self.limit.saturating_sub(bucket.count);

        let retry_after_secs = if allowed {
            None
        } else {
            let window_remaining = self
                .window
                .saturating_sub(now.duration_since(bucket.window_started));
            Some((window_remaining.as_secs_f64().ceil() as u64).max(1))
        };

        if !allowed {
            debug!(
                "Rate limit exceeded for {}: {}/{} requests",
                key, bucket.count, self.limit
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
