//! # embedgate
//!
//! Website-embedding reverse proxy. Given an arbitrary third-party URL,
//! embedgate safely fetches the page, defends against request forgery at
//! internal infrastructure, rate-limits abuse, and rewrites the returned
//! HTML so the embeddable widget loads inside a hosting origin.
//!
//! ## Pipeline
//!
//! Validator → SSRF guard → rate limiter → fetcher → (HTML only) rewriter →
//! emitter. Each stage short-circuits with its own error response.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use embedgate::server;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), embedgate::ProxyError> {
//!     // Loads config/embedgate.yaml if present, plus EMBEDGATE_* overrides
//!     server::builder::run_server().await
//! }
//! ```
//!
//! ## Library use
//!
//! The pipeline stages are usable on their own:
//!
//! ```rust
//! use embedgate::core::url_guard::{normalize_target, ensure_public_target};
//!
//! let target = normalize_target("example.com/page").unwrap();
//! assert_eq!(target.as_str(), "https://example.com/page");
//! assert!(ensure_public_target(&target).is_ok());
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{ProxyError, Result};

pub use core::fetcher::{FetchResult, Fetcher};
pub use core::rate_limiter::{MemoryRateLimiter, RateLimitBackend, RateLimitDecision};
pub use core::rewriter::{BundleRewriter, RemotePageRewriter, RewriteContext, RewriteHtml};
pub use core::url_guard::{NormalizedUrl, ensure_public_target, normalize_target};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
