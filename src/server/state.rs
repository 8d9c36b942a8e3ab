//! Application state shared across HTTP handlers
//!
//! This module provides the AppState struct and its implementations.

use crate::config::Config;
use crate::core::fetcher::Fetcher;
use crate::core::rate_limiter::{RateLimitBackend, build_limiter};
use crate::utils::error::Result;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// The service is stateless per request apart from the rate-limit counters
/// living behind the limiter backends. Everything here is wrapped in Arc for
/// cheap sharing across workers.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// Outbound page fetcher
    pub fetcher: Arc<Fetcher>,
    /// Rate limiter for the embedding proxy endpoint
    pub proxy_limiter: Arc<dyn RateLimitBackend>,
    /// Rate limiter for the analytics endpoint (independent bucket and ceiling)
    pub track_limiter: Arc<dyn RateLimitBackend>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub async fn new(config: Config) -> Result<Self> {
        let fetcher = Arc::new(Fetcher::new(config.proxy())?);

        let rate_limit = config.rate_limit();
        let proxy_limiter = build_limiter(rate_limit, "proxy", rate_limit.proxy_limit).await?;
        let track_limiter = build_limiter(rate_limit, "track", rate_limit.track_limit).await?;

        Ok(Self {
            config: Arc::new(config),
            fetcher,
            proxy_limiter,
            track_limiter,
        })
    }

    /// Get service configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
