//! Main gateway configuration

use super::*;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Main gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GatewayConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Outbound fetch configuration
    #[serde(default)]
    pub proxy: ProxyConfig,
    /// Widget injection configuration
    #[serde(default)]
    pub widget: WidgetConfig,
    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Bundled static site configuration
    #[serde(default)]
    pub bundles: BundleConfig,
}

impl GatewayConfig {
    /// Build a configuration from `EMBEDGATE_*` environment variables.
    ///
    /// Unset variables leave the defaults in place, so the result is suitable
    /// for merging over a file-loaded configuration.
    pub fn from_env() -> crate::utils::error::Result<Self> {
        let mut config = Self::default();

        if let Some(host) = env_var("EMBEDGATE_HOST") {
            config.server.host = host;
        }
        if let Some(port) = env_parse("EMBEDGATE_PORT") {
            config.server.port = port;
        }
        if let Some(workers) = env_parse("EMBEDGATE_WORKERS") {
            config.server.workers = Some(workers);
        }

        if let Some(secs) = env_parse("EMBEDGATE_FETCH_TIMEOUT_SECS") {
            config.proxy.fetch_timeout_secs = secs;
        }
        if let Some(secs) = env_parse("EMBEDGATE_PROBE_TIMEOUT_SECS") {
            config.proxy.probe_timeout_secs = secs;
        }
        if let Some(cap) = env_parse("EMBEDGATE_MAX_REDIRECTS") {
            config.proxy.max_redirects = cap;
        }
        if let Some(ua) = env_var("EMBEDGATE_USER_AGENT") {
            config.proxy.user_agent = ua;
        }

        if let Some(url) = env_var("EMBEDGATE_WIDGET_SCRIPT_URL") {
            config.widget.script_url = url;
        }
        if let Some(origin) = env_var("EMBEDGATE_WIDGET_BACKEND") {
            config.widget.backend_origin = Some(origin);
        }

        if let Some(secs) = env_parse("EMBEDGATE_WINDOW_SECS") {
            config.rate_limit.window_secs = secs;
        }
        if let Some(limit) = env_parse("EMBEDGATE_PROXY_LIMIT") {
            config.rate_limit.proxy_limit = limit;
        }
        if let Some(limit) = env_parse("EMBEDGATE_TRACK_LIMIT") {
            config.rate_limit.track_limit = limit;
        }
        if let Some(url) = env_var("EMBEDGATE_REDIS_URL") {
            config.rate_limit.redis_url = Some(url);
            config.rate_limit.backend = RateLimitBackendKind::Redis;
        }

        if let Some(root) = env_var("EMBEDGATE_BUNDLE_ROOT") {
            config.bundles.root = root;
        }

        Ok(config)
    }

    /// Merge two configurations, with other taking precedence
    pub fn merge(mut self, other: Self) -> Self {
        self.server = self.server.merge(other.server);
        self.proxy = self.proxy.merge(other.proxy);
        self.widget = self.widget.merge(other.widget);
        self.rate_limit = self.rate_limit.merge(other.rate_limit);
        self.bundles = self.bundles.merge(other.bundles);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        self.server.validate()?;
        self.proxy.validate()?;
        self.widget.validate()?;
        self.rate_limit.validate()?;
        self.bundles.validate()?;
        Ok(())
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = env_var(key)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring unparseable {}={}", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_config_default_validates() {
        let config = GatewayConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_gateway_config_merge_sections() {
        let base = GatewayConfig::default();
        let other = GatewayConfig {
            rate_limit: RateLimitConfig {
                proxy_limit: 5,
                ..Default::default()
            },
            ..Default::default()
        };
        let merged = base.merge(other);
        assert_eq!(merged.rate_limit.proxy_limit, 5);
        assert_eq!(merged.server.port, default_port());
    }
}
