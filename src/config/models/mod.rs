//! Configuration data models
//!
//! This module defines all configuration structures used throughout the proxy.

#![allow(missing_docs)]

pub mod bundle;
pub mod gateway;
pub mod proxy;
pub mod rate_limit;
pub mod server;
pub mod widget;

// Re-export all configuration types
pub use bundle::*;
pub use gateway::*;
pub use proxy::*;
pub use rate_limit::*;
pub use server::*;
pub use widget::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8080
}

pub fn default_true() -> bool {
    true
}

/// Default outbound fetch timeout in seconds
pub fn default_fetch_timeout() -> u64 {
    30
}

/// Default reachability-probe timeout in seconds
pub fn default_probe_timeout() -> u64 {
    8
}

/// Default redirect-following cap
pub fn default_max_redirects() -> usize {
    5
}

/// Default browser-like user agent sent to upstream sites
pub fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
        .to_string()
}

pub fn default_accept_language() -> String {
    "en-US,en;q=0.9".to_string()
}

/// Default rate-limit window length in seconds
pub fn default_window_secs() -> u64 {
    60
}

/// Default proxy-endpoint ceiling per window
pub fn default_proxy_limit() -> u32 {
    100
}

/// Default analytics-endpoint ceiling per window
pub fn default_track_limit() -> u32 {
    30
}

pub fn default_widget_script_url() -> String {
    "/widget.js".to_string()
}

pub fn default_bundle_root() -> String {
    "bundles".to_string()
}

pub fn default_mount_path() -> String {
    "/mounted".to_string()
}

/// The fixed set of bundled asset filenames the bundle rewriter remaps
pub fn default_bundle_assets() -> Vec<String> {
    ["styles.css", "script.js", "app.js", "logo.png", "favicon.ico"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

pub fn default_cors_methods() -> Vec<String> {
    vec!["GET".to_string(), "POST".to_string(), "OPTIONS".to_string()]
}

pub fn default_cors_headers() -> Vec<String> {
    vec!["Content-Type".to_string(), "Accept".to_string()]
}

pub fn default_cors_max_age() -> u32 {
    3600
}
