//! Rate limiting configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Window length in seconds
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
    /// Requests per window for the embedding proxy endpoint
    #[serde(default = "default_proxy_limit")]
    pub proxy_limit: u32,
    /// Requests per window for the analytics endpoint
    #[serde(default = "default_track_limit")]
    pub track_limit: u32,
    /// Which backend holds the counters
    #[serde(default)]
    pub backend: RateLimitBackendKind,
    /// Redis connection URL for the shared-store backend
    #[serde(default)]
    pub redis_url: Option<String>,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            window_secs: default_window_secs(),
            proxy_limit: default_proxy_limit(),
            track_limit: default_track_limit(),
            backend: RateLimitBackendKind::default(),
            redis_url: None,
        }
    }
}

impl RateLimitConfig {
    /// Merge rate limit configurations
    pub fn merge(mut self, other: Self) -> Self {
        if !other.enabled {
            self.enabled = other.enabled;
        }
        if other.window_secs != default_window_secs() {
            self.window_secs = other.window_secs;
        }
        if other.proxy_limit != default_proxy_limit() {
            self.proxy_limit = other.proxy_limit;
        }
        if other.track_limit != default_track_limit() {
            self.track_limit = other.track_limit;
        }
        if other.backend != RateLimitBackendKind::default() {
            self.backend = other.backend;
        }
        if other.redis_url.is_some() {
            self.redis_url = other.redis_url;
        }
        self
    }

    /// Validate rate limit configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.window_secs == 0 {
            return Err("Rate limit window must be greater than 0".to_string());
        }
        if self.proxy_limit == 0 || self.track_limit == 0 {
            return Err("Rate limit ceilings must be greater than 0".to_string());
        }
        if self.backend == RateLimitBackendKind::Redis && self.redis_url.is_none() {
            return Err("Redis backend requires redis_url".to_string());
        }
        Ok(())
    }
}

/// Rate limiter backend selection
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum RateLimitBackendKind {
    /// Per-process in-memory counters
    #[default]
    Memory,
    /// Shared counters in Redis (multi-instance deployments)
    Redis,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_config_default() {
        let config = RateLimitConfig::default();
        assert!(config.enabled);
        assert_eq!(config.window_secs, 60);
        assert_eq!(config.proxy_limit, 100);
        assert_eq!(config.track_limit, 30);
        assert_eq!(config.backend, RateLimitBackendKind::Memory);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_backend_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&RateLimitBackendKind::Memory).unwrap(),
            "\"memory\""
        );
        assert_eq!(
            serde_json::to_string(&RateLimitBackendKind::Redis).unwrap(),
            "\"redis\""
        );
    }

    #[test]
    fn test_redis_backend_requires_url() {
        let config = RateLimitConfig {
            backend: RateLimitBackendKind::Redis,
            redis_url: None,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = RateLimitConfig {
            backend: RateLimitBackendKind::Redis,
            redis_url: Some("redis://127.0.0.1:6379".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rate_limit_config_merge() {
        let base = RateLimitConfig::default();
        let other = RateLimitConfig {
            proxy_limit: 10,
            window_secs: 5,
            ..Default::default()
        };
        let merged = base.merge(other);
        assert_eq!(merged.proxy_limit, 10);
        assert_eq!(merged.window_secs, 5);
        assert_eq!(merged.track_limit, 30);
    }

    #[test]
    fn test_rate_limit_config_deserialization_defaults() {
        let config: RateLimitConfig = serde_json::from_str("{}").unwrap();
        assert!(config.enabled);
        assert_eq!(config.proxy_limit, 100);
    }
}
