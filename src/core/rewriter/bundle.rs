//! Bundle rewriter
//!
//! Path rewriting for fully bundled static sites served from local storage.
//! Only references matching the configured fixed set of asset filenames are
//! touched; they become absolute paths under the proxy's mount path so the
//! bundled pages work from any route depth. The source is local trusted
//! content, so no SSRF guard runs here.

use super::RewriteHtml;
use crate::config::models::BundleConfig;
use crate::utils::error::{ProxyError, Result};
use lol_html::{HtmlRewriter, Settings, element};

/// Rewriter for bundled static sites
pub struct BundleRewriter {
    mount_path: String,
    assets: Vec<String>,
}

impl BundleRewriter {
    /// Create a rewriter from the bundle configuration
    pub fn new(config: &BundleConfig) -> Self {
        Self {
            mount_path: config.mount_path.clone(),
            assets: config.assets.clone(),
        }
    }

    /// Map a reference onto the mount path when it names a known asset
    fn remap(&self, value: &str) -> Option<String> {
        let name = value.trim().trim_start_matches("./");
        if self.assets.iter().any(|asset| asset == name) {
            Some(format!("{}/{}", self.mount_path, name))
        } else {
            None
        }
    }
}

impl RewriteHtml for BundleRewriter {
    fn rewrite(&self, html: &str) -> Result<String> {
        let mut output = Vec::new();
        let mut rewriter = HtmlRewriter::new(
            Settings {
                element_content_handlers: vec![
                    element!("link[href], a[href]", |el| {
                        if let Some(href) = el.get_attribute("href") {
                            if let Some(mapped) = self.remap(&href) {
                                el.set_attribute("href", &mapped)?;
                            }
                        }
                        Ok(())
                    }),
                    element!("script[src], img[src], source[src]", |el| {
                        if let Some(src) = el.get_attribute("src") {
                            if let Some(mapped) = self.remap(&src) {
                                el.set_attribute("src", &mapped)?;
                            }
                        }
                        Ok(())
                    }),
                ],
                ..Settings::default()
            },
            |c: &[u8]| output.extend_from_slice(c),
        );

        rewriter
            .write(html.as_bytes())
            .and_then(|_| rewriter.end())
            .map_err(|e| ProxyError::Rewrite(e.to_string()))?;

        Ok(String::from_utf8_lossy(&output).into_owned())
    }
}
