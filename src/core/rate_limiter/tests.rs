//! Tests for rate limiter

use super::memory::MemoryRateLimiter;
use super::{RateLimitBackend, build_limiter};
use crate::config::models::{RateLimitBackendKind, RateLimitConfig};
use std::time::Duration;

fn limiter(limit: u32, window: Duration) -> MemoryRateLimiter {
    MemoryRateLimiter::new(limit, window, true)
}

#[tokio::test]
async fn test_disabled_limiter_allows_everything() {
    let limiter = MemoryRateLimiter::new(3, Duration::from_secs(60), false);

    for _ in 0..100 {
        let decision = limiter.check_and_record("client").await.unwrap();
        assert!(decision.allowed);
    }
}

#[tokio::test]
async fn test_allows_up_to_limit() {
    let limiter = limiter(10, Duration::from_secs(60));

    for i in 0..10 {
        let decision = limiter.check_and_record("client").await.unwrap();
        assert!(decision.allowed, "request {} should be allowed", i);
    }
}

#[tokio::test]
async fn test_denies_over_limit_with_retry_after() {
    let limiter = limiter(5, Duration::from_secs(60));

    for _ in 0..5 {
        assert!(limiter.check_and_record("client").await.unwrap().allowed);
    }

    let denied = limiter.check_and_record("client").await.unwrap();
    assert!(!denied.allowed);
    let retry_after = denied.retry_after_secs.unwrap();
    assert!(retry_after >= 1 && retry_after <= 60);
}

#[tokio::test]
async fn test_different_keys_are_independent() {
    let limiter = limiter(2, Duration::from_secs(60));

    limiter.check_and_record("key1").await.unwrap();
    limiter.check_and_record("key1").await.unwrap();

    let denied = limiter.check_and_record("key1").await.unwrap();
    assert!(!denied.allowed);

    let other = limiter.check_and_record("key2").await.unwrap();
    assert!(other.allowed);
}

#[tokio::test]
async fn test_window_reset_allows_again() {
    let limiter = limiter(2, Duration::from_millis(50));

    limiter.check_and_record("client").await.unwrap();
    limiter.check_and_record("client").await.unwrap();
    assert!(!limiter.check_and_record("client").await.unwrap().allowed);

    tokio::time::sleep(Duration::from_millis(80)).await;

    let decision = limiter.check_and_record("client").await.unwrap();
    assert!(decision.allowed);
    assert_eq!(decision.remaining, 1);
}

#[tokio::test]
async fn test_remaining_counts_down() {
    let limiter = limiter(3, Duration::from_secs(60));

    let d1 = limiter.check_and_record("client").await.unwrap();
    assert_eq!(d1.remaining, 2);
    let d2 = limiter.check_and_record("client").await.unwrap();
    assert_eq!(d2.remaining, 1);
    let d3 = limiter.check_and_record("client").await.unwrap();
    assert_eq!(d3.remaining, 0);
    assert!(d3.allowed);
}

#[tokio::test]
async fn test_cleanup_drops_lapsed_buckets() {
    let limiter = limiter(100, Duration::from_millis(50));

    limiter.check_and_record("key1").await.unwrap();
    limiter.check_and_record("key2").await.unwrap();
    assert_eq!(limiter.bucket_count().await, 2);

    tokio::time::sleep(Duration::from_millis(80)).await;
    limiter.cleanup().await;

    assert_eq!(limiter.bucket_count().await, 0);
}

#[tokio::test]
async fn test_build_limiter_memory_backend() {
    let config = RateLimitConfig {
        backend: RateLimitBackendKind::Memory,
        proxy_limit: 2,
        ..Default::default()
    };

    let limiter = build_limiter(&config, "proxy", config.proxy_limit)
        .await
        .unwrap();
    assert!(limiter.check_and_record("client").await.unwrap().allowed);
    assert!(limiter.check_and_record("client").await.unwrap().allowed);
    assert!(!limiter.check_and_record("client").await.unwrap().allowed);
}

#[cfg(not(feature = "redis"))]
#[tokio::test]
async fn test_build_limiter_redis_backend_requires_feature() {
    let config = RateLimitConfig {
        backend: RateLimitBackendKind::Redis,
        redis_url: Some("redis://127.0.0.1:6379".to_string()),
        ..Default::default()
    };

    assert!(build_limiter(&config, "proxy", 10).await.is_err());
}
