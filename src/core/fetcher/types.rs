//! Fetch result types

use bytes::Bytes;
use reqwest::header::HeaderMap;

/// Buffered upstream response, owned by the request that produced it
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// Upstream status code (always < 500)
    pub status: u16,
    /// Upstream response headers
    pub headers: HeaderMap,
    /// Upstream Content-Type, if one was sent
    pub content_type: Option<String>,
    /// Buffered response body
    pub body: Bytes,
}

impl FetchResult {
    /// Whether the response carries an HTML document
    pub fn is_html(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("text/html"))
    }

    /// The body decoded as text (lossy for non-UTF-8 documents)
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
