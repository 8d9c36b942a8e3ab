//! Target URL normalization

use crate::utils::error::{ProxyError, Result};
use std::fmt;
use url::Url;

/// A validated absolute `http(s)` target URL
///
/// Always carries a host; construction goes through [`normalize_target`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedUrl(Url);

impl NormalizedUrl {
    /// The underlying parsed URL
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// The serialized URL string
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The host component (guaranteed present)
    pub fn host(&self) -> &str {
        self.0.host_str().unwrap_or_default()
    }

    /// The directory the document lives in, used as the base for resolving
    /// relative resource references
    pub fn resolution_base(&self) -> Url {
        self.0.join(".").unwrap_or_else(|_| self.0.clone())
    }
}

impl fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Parse and canonicalize a client-supplied target string.
///
/// A schemeless input defaults to `https`. Anything that does not end up as
/// an absolute `http(s)` URL with a host is rejected. Normalization is
/// idempotent: re-normalizing an already-normalized URL returns the same
/// value.
pub fn normalize_target(raw: &str) -> Result<NormalizedUrl> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ProxyError::InvalidInput("Missing url parameter".to_string()));
    }

    let parsed = match Url::parse(trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => url,
        // "example.com:8080/x" parses with scheme "example.com"; anything
        // without an explicit "://" gets the https default instead.
        Ok(_) | Err(url::ParseError::RelativeUrlWithoutBase) if !trimmed.contains("://") => {
            Url::parse(&format!("https://{}", trimmed))
                .map_err(|e| ProxyError::InvalidInput(format!("Invalid url: {}", e)))?
        }
        Ok(url) => {
            return Err(ProxyError::InvalidInput(format!(
                "Unsupported scheme: {}",
                url.scheme()
            )));
        }
        Err(e) => {
            return Err(ProxyError::InvalidInput(format!("Invalid url: {}", e)));
        }
    };

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ProxyError::InvalidInput(format!(
            "Unsupported scheme: {}",
            parsed.scheme()
        )));
    }

    if parsed.host_str().map_or(true, |h| h.is_empty()) {
        return Err(ProxyError::InvalidInput(
            "Url must have a host".to_string(),
        ));
    }

    Ok(NormalizedUrl(parsed))
}
