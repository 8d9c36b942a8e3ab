//! Rate limiting
//!
//! Fixed-window request counting behind a pluggable backend: in-memory
//! counters for single-instance deployments, Redis-backed counters (cargo
//! feature `redis`) when several instances must share limits. The contract
//! (window, ceiling, retry-after) is identical across backends.

mod memory;
#[cfg(feature = "redis")]
mod redis;
mod types;

#[cfg(test)]
mod tests;

pub use memory::MemoryRateLimiter;
#[cfg(feature = "redis")]
pub use redis::RedisRateLimiter;
pub use types::RateLimitDecision;

use crate::config::models::{RateLimitBackendKind, RateLimitConfig};
use crate::utils::error::{ProxyError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Backend-agnostic rate limiter contract
#[async_trait]
pub trait RateLimitBackend: Send + Sync {
    /// Atomically count a request against `key` and decide whether it is
    /// allowed within the current window.
    async fn check_and_record(&self, key: &str) -> Result<RateLimitDecision>;
}

/// Build the configured limiter for one logical endpoint.
///
/// Each endpoint gets its own instance so ceilings stay independent; `scope`
/// keeps shared-store keys from colliding across endpoints.
pub async fn build_limiter(
    config: &RateLimitConfig,
    scope: &str,
    limit: u32,
) -> Result<Arc<dyn RateLimitBackend>> {
    let window = Duration::from_secs(config.window_secs);

    match config.backend {
        RateLimitBackendKind::Memory => {
            let _ = scope;
            let limiter = Arc::new(MemoryRateLimiter::new(limit, window, config.enabled));
            limiter.clone().start_cleanup_task();
            Ok(limiter)
        }
        #[cfg(feature = "redis")]
        RateLimitBackendKind::Redis => {
            let url = config.redis_url.as_deref().ok_or_else(|| {
                ProxyError::Config("Redis rate limit backend requires redis_url".to_string())
            })?;
            let limiter =
                RedisRateLimiter::connect(url, scope, limit, window, config.enabled).await?;
            Ok(Arc::new(limiter))
        }
        #[cfg(not(feature = "redis"))]
        RateLimitBackendKind::Redis => Err(ProxyError::Config(
            "Redis rate limit backend requires building with the 'redis' feature".to_string(),
        )),
    }
}
