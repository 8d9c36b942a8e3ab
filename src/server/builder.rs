//! Server builder and run_server function
//!
//! This module provides the ServerBuilder for easier server configuration
//! and the run_server function for automatic configuration loading.

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{ProxyError, Result};
use tracing::info;

/// Default configuration file location
const CONFIG_PATH: &str = "config/embedgate.yaml";

/// Server builder for easier configuration
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| ProxyError::Config("Configuration is required".to_string()))?;

        HttpServer::new(&config).await
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the server with automatic configuration loading.
///
/// Loads `config/embedgate.yaml` when present, falls back to defaults
/// otherwise, and layers `EMBEDGATE_*` environment overrides on top.
pub async fn run_server() -> Result<()> {
    info!("🚀 Starting embedgate");

    let file_config = match Config::from_file(CONFIG_PATH).await {
        Ok(config) => {
            info!("Loaded configuration file: {}", CONFIG_PATH);
            config
        }
        Err(e) => {
            info!(
                "No usable configuration file ({}), using defaults: {}",
                CONFIG_PATH, e
            );
            Config::default()
        }
    };

    let config = file_config.merge(Config::from_env()?);
    config.validate()?;

    let server = HttpServer::new(&config).await?;
    info!(
        "🌐 Server starting at: http://{}",
        config.server().address()
    );
    info!("📋 Endpoints:");
    info!("   GET  /proxy?url=<target>&test=<bool> - Embedding proxy");
    info!("   POST /api/track - Widget analytics");
    info!(
        "   GET  {}/... - Bundled demo sites",
        config.bundles().mount_path
    );
    info!("   GET  /health - Health check");

    server.start().await
}
