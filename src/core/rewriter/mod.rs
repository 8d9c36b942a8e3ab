//! HTML rewriting
//!
//! Structured rewriting of HTML documents before emission. Two policies
//! implement one seam: [`RemotePageRewriter`] for pages fetched from
//! arbitrary remote sites, [`BundleRewriter`] for bundled static sites
//! served from local storage. Selection is by source, never by guessing at
//! the document.

mod bundle;
mod remote;

#[cfg(test)]
mod tests;

pub use bundle::BundleRewriter;
pub use remote::RemotePageRewriter;

use crate::core::url_guard::NormalizedUrl;
use crate::utils::error::Result;

/// A policy for transforming an HTML document before emission
pub trait RewriteHtml {
    /// Rewrite a full document, returning the transformed markup
    fn rewrite(&self, html: &str) -> Result<String>;
}

/// The two origins a remote rewrite needs: where the document came from and
/// who is hosting the embed
#[derive(Debug, Clone)]
pub struct RewriteContext {
    /// The original target the document was fetched from
    pub target: NormalizedUrl,
    /// Origin of the hosting page, scheme included (e.g. `https://embed.example.com`)
    pub hosting_origin: String,
}
