//! Outbound fetch configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Configuration for the outbound page fetcher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Full-fetch timeout in seconds
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
    /// Reachability-probe (HEAD) timeout in seconds
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,
    /// Maximum number of redirects followed on a fetch
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
    /// User agent sent upstream
    ///
    /// A realistic browser string; bare client UAs get served degraded
    /// bot-detection pages by many sites.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Accept-Language sent upstream
    #[serde(default = "default_accept_language")]
    pub accept_language: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: default_fetch_timeout(),
            probe_timeout_secs: default_probe_timeout(),
            max_redirects: default_max_redirects(),
            user_agent: default_user_agent(),
            accept_language: default_accept_language(),
        }
    }
}

impl ProxyConfig {
    /// Merge fetch configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.fetch_timeout_secs != default_fetch_timeout() {
            self.fetch_timeout_secs = other.fetch_timeout_secs;
        }
        if other.probe_timeout_secs != default_probe_timeout() {
            self.probe_timeout_secs = other.probe_timeout_secs;
        }
        if other.max_redirects != default_max_redirects() {
            self.max_redirects = other.max_redirects;
        }
        if other.user_agent != default_user_agent() {
            self.user_agent = other.user_agent;
        }
        if other.accept_language != default_accept_language() {
            self.accept_language = other.accept_language;
        }
        self
    }

    /// Validate fetch configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.fetch_timeout_secs == 0 {
            return Err("Fetch timeout must be greater than 0".to_string());
        }
        if self.probe_timeout_secs == 0 {
            return Err("Probe timeout must be greater than 0".to_string());
        }
        if self.max_redirects > 20 {
            return Err("Redirect cap seems too high (>20)".to_string());
        }
        if self.user_agent.is_empty() {
            return Err("User agent cannot be empty".to_string());
        }
        Ok(())
    }
}
