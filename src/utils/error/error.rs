//! Error handling for the proxy
//!
//! This module defines all error types used throughout the service and their
//! mapping onto the HTTP error bodies the API contract specifies.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Result type alias for the proxy
pub type Result<T> = std::result::Result<T, ProxyError>;

/// Main error type for the proxy
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed or missing target URL
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Target blocked by the SSRF guard
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Rate limit exceeded
    #[error("Too many requests, retry after {retry_after_secs}s")]
    TooManyRequests {
        /// Seconds until the client's window resets
        retry_after_secs: u64,
    },

    /// The outbound probe/fetch failed at the network level (DNS, connect, timeout)
    #[error("Upstream unreachable: {details}")]
    UpstreamUnreachable {
        /// Underlying transport error message
        details: String,
        /// Short machine-readable failure class
        code: String,
        /// User-facing hint
        suggestion: String,
    },

    /// The upstream answered with a server error (status >= 500)
    #[error("Upstream failure: {0}")]
    Upstream(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Redis errors
    #[cfg(feature = "redis")]
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// HTML rewriting errors
    #[error("Rewrite error: {0}")]
    Rewrite(String),

    /// Unexpected internal failures
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ProxyError {
    /// Classify a reqwest transport failure into the probe error contract.
    ///
    /// Any network-level failure (DNS, connect, timeout) becomes
    /// `UpstreamUnreachable` carrying a short code and a user-facing
    /// suggestion; everything else stays a generic client error.
    pub fn from_probe_failure(err: reqwest::Error) -> Self {
        let (code, suggestion) = if err.is_timeout() {
            (
                "timeout",
                "The site took too long to respond. Try again or check that it is online.",
            )
        } else if err.is_connect() {
            (
                "connection_refused",
                "Could not connect to the site. Check that the URL is correct and the site is reachable.",
            )
        } else if err.is_request() {
            (
                "dns_error",
                "The hostname could not be resolved. Check the spelling of the domain.",
            )
        } else {
            (
                "network_error",
                "The site could not be reached. Check the URL and try again.",
            )
        };

        ProxyError::UpstreamUnreachable {
            details: err.to_string(),
            code: code.to_string(),
            suggestion: suggestion.to_string(),
        }
    }
}

impl ResponseError for ProxyError {
    fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::InvalidInput(_) | ProxyError::UpstreamUnreachable { .. } => {
                StatusCode::BAD_REQUEST
            }
            ProxyError::Forbidden(_) => StatusCode::FORBIDDEN,
            ProxyError::NotFound(_) => StatusCode::NOT_FOUND,
            ProxyError::TooManyRequests { .. } => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ProxyError::InvalidInput(msg) => {
                HttpResponse::BadRequest().json(json!({ "error": msg }))
            }
            ProxyError::Forbidden(msg) => HttpResponse::Forbidden().json(json!({ "error": msg })),
            ProxyError::NotFound(msg) => HttpResponse::NotFound().json(json!({ "error": msg })),
            ProxyError::TooManyRequests { retry_after_secs } => HttpResponse::TooManyRequests()
                .insert_header(("Retry-After", retry_after_secs.to_string()))
                .json(json!({
                    "error": "Too many requests",
                    "retryAfter": retry_after_secs,
                })),
            ProxyError::UpstreamUnreachable {
                details,
                code,
                suggestion,
            } => HttpResponse::BadRequest().json(json!({
                "error": "Website unreachable",
                "details": details,
                "code": code,
                "suggestion": suggestion,
            })),
            ProxyError::Upstream(details)
            | ProxyError::Internal(details)
            | ProxyError::Rewrite(details)
            | ProxyError::Config(details) => HttpResponse::InternalServerError().json(json!({
                "error": "Internal server error",
                "details": details,
            })),
            other => HttpResponse::InternalServerError().json(json!({
                "error": "Internal server error",
                "details": other.to_string(),
            })),
        }
    }
}
