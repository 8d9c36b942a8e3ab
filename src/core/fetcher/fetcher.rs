//! Fetcher implementation

use super::types::FetchResult;
use crate::config::models::ProxyConfig;
use crate::core::url_guard::NormalizedUrl;
use crate::utils::error::{ProxyError, Result};
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE};
use reqwest::redirect;
use std::time::Duration;
use tracing::debug;

const ACCEPT_BROWSER: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";

/// Outbound HTTP fetcher
///
/// One reqwest client per process; connection pooling is whatever the client
/// does natively. Timeouts are applied per request because the probe and the
/// full fetch use different budgets.
pub struct Fetcher {
    client: reqwest::Client,
    fetch_timeout: Duration,
    probe_timeout: Duration,
    accept_language: String,
}

impl Fetcher {
    /// Build a fetcher from the outbound fetch configuration
    pub fn new(config: &ProxyConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(redirect::Policy::limited(config.max_redirects))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            fetch_timeout: Duration::from_secs(config.fetch_timeout_secs),
            probe_timeout: Duration::from_secs(config.probe_timeout_secs),
            accept_language: config.accept_language.clone(),
        })
    }

    /// HEAD reachability probe.
    ///
    /// Any response at all, error statuses included, means the target is
    /// reachable; only transport failures (DNS, connect, timeout) surface as
    /// [`ProxyError::UpstreamUnreachable`].
    pub async fn probe(&self, target: &NormalizedUrl) -> Result<u16> {
        debug!("Probing {}", target);

        let response = self
            .client
            .head(target.as_str())
            .timeout(self.probe_timeout)
            .header(ACCEPT, "*/*")
            .header(ACCEPT_LANGUAGE, self.accept_language.as_str())
            .send()
            .await
            .map_err(ProxyError::from_probe_failure)?;

        Ok(response.status().as_u16())
    }

    /// Full GET fetch.
    ///
    /// Follows redirects up to the configured cap and buffers the body. Any
    /// status below 500 is a valid result relayed to the caller; upstream
    /// server errors become [`ProxyError::Upstream`].
    pub async fn fetch(&self, target: &NormalizedUrl) -> Result<FetchResult> {
        debug!("Fetching {}", target);

        let response = self
            .client
            .get(target.as_str())
            .timeout(self.fetch_timeout)
            .header(ACCEPT, ACCEPT_BROWSER)
            .header(ACCEPT_LANGUAGE, self.accept_language.as_str())
            .send()
            .await?;

        let status = response.status();
        if status.is_server_error() {
            return Err(ProxyError::Upstream(format!(
                "Upstream returned {} for {}",
                status, target
            )));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        debug!(
            "Fetched {}: status={} bytes={} content_type={:?}",
            target,
            status,
            body.len(),
            content_type
        );

        Ok(FetchResult {
            status: status.as_u16(),
            headers,
            content_type,
            body,
        })
    }
}
