//! Remote page rewriter
//!
//! Rewrites a fetched third-party document so it renders correctly inside
//! the hosting origin: resource and navigation references resolve against
//! the original site, and the embed widget bootstrap is injected exactly
//! once.

use super::{RewriteContext, RewriteHtml};
use crate::config::models::WidgetConfig;
use crate::utils::error::{ProxyError, Result};
use lol_html::html_content::ContentType;
use lol_html::{HtmlRewriter, Settings, element};
use std::cell::Cell;
use tracing::debug;
use url::Url;

/// Attribute marking markup owned by the widget injector; pre-existing
/// copies are stripped before the fresh bootstrap goes in.
const WIDGET_MARKER: &str = "data-embedgate-widget";

/// Rewriter for remotely fetched pages
pub struct RemotePageRewriter {
    ctx: RewriteContext,
    widget: WidgetConfig,
}

impl RemotePageRewriter {
    /// Create a rewriter for one fetched document
    pub fn new(ctx: RewriteContext, widget: WidgetConfig) -> Self {
        Self { ctx, widget }
    }

    /// The `<script>` pair injected into every proxied page: inline bootstrap
    /// configuration plus the widget loader itself.
    fn widget_markup(&self) -> Result<String> {
        let script_src = if self.widget.script_url.starts_with("http://")
            || self.widget.script_url.starts_with("https://")
        {
            self.widget.script_url.clone()
        } else {
            format!("{}{}", self.ctx.hosting_origin, self.widget.script_url)
        };

        let backend = self
            .widget
            .backend_origin
            .clone()
            .unwrap_or_else(|| self.ctx.hosting_origin.clone());

        Ok(format!(
            "<script {marker}>window.__embedgate = {{ backend: {backend} }};</script>\
             <script {marker} src=\"{src}\" async></script>",
            marker = WIDGET_MARKER,
            backend = serde_json::to_string(&backend)?,
            src = script_src,
        ))
    }
}

impl RewriteHtml for RemotePageRewriter {
    fn rewrite(&self, html: &str) -> Result<String> {
        let base = self.ctx.target.resolution_base();
        let widget_markup = self.widget_markup()?;

        // A document-supplied <base> wins; we only establish one when the
        // page has none.
        let has_base = html.to_ascii_lowercase().contains("<base");
        let base_injected = Cell::new(has_base);
        let widget_injected = Cell::new(false);

        let base_tag = format!("<base href=\"{}\">", base.as_str());

        let mut output = Vec::new();
        let mut rewriter = HtmlRewriter::new(
            Settings {
                element_content_handlers: vec![
                    // Drop stale copies of our own markup before re-injecting
                    element!(format!("script[{}]", WIDGET_MARKER), |el| {
                        el.remove();
                        Ok(())
                    }),
                    element!("head", {
                        let base_injected = &base_injected;
                        let base_tag = &base_tag;
                        move |el| {
                            if !base_injected.get() {
                                el.prepend(base_tag, ContentType::Html);
                                base_injected.set(true);
                            }
                            Ok(())
                        }
                    }),
                    element!("link[href], a[href], area[href]", {
                        let base = &base;
                        move |el| {
                            if let Some(href) = el.get_attribute("href") {
                                if let Some(resolved) = resolve_reference(base, &href) {
                                    el.set_attribute("href", &resolved)?;
                                }
                            }
                            Ok(())
                        }
                    }),
                    element!(
                        "img[src], script[src], iframe[src], source[src], video[src], audio[src]",
                        {
                            let base = &base;
                            move |el| {
                                if let Some(src) = el.get_attribute("src") {
                                    if let Some(resolved) = resolve_reference(base, &src) {
                                        el.set_attribute("src", &resolved)?;
                                    }
                                }
                                Ok(())
                            }
                        }
                    ),
                    element!("img[srcset], source[srcset]", {
                        let base = &base;
                        move |el| {
                            if let Some(srcset) = el.get_attribute("srcset") {
                                el.set_attribute("srcset", &resolve_srcset(base, &srcset))?;
                            }
                            Ok(())
                        }
                    }),
                    element!("form[action]", {
                        let base = &base;
                        move |el| {
                            if let Some(action) = el.get_attribute("action") {
                                if let Some(resolved) = resolve_reference(base, &action) {
                                    el.set_attribute("action", &resolved)?;
                                }
                            }
                            Ok(())
                        }
                    }),
                    element!("video[poster]", {
                        let base = &base;
                        move |el| {
                            if let Some(poster) = el.get_attribute("poster") {
                                if let Some(resolved) = resolve_reference(base, &poster) {
                                    el.set_attribute("poster", &resolved)?;
                                }
                            }
                            Ok(())
                        }
                    }),
                    element!("body", {
                        let widget_injected = &widget_injected;
                        let widget_markup = &widget_markup;
                        move |el| {
                            if !widget_injected.get() {
                                el.append(widget_markup, ContentType::Html);
                                widget_injected.set(true);
                            }
                            Ok(())
                        }
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

        // Fragment without a <body>: the bootstrap still has to load
        if !widget_injected.get() {
            debug!("Document has no body element, appending widget at end");
            output.extend_from_slice(widget_markup.as_bytes());
        }

        Ok(String::from_utf8_lossy(&output).into_owned())
    }
}

/// Resolve a document reference against the page's base, leaving absolute
/// and non-fetchable values untouched.
fn resolve_reference(base: &Url, value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
        return None;
    }

    let lower = trimmed.to_ascii_lowercase();
    for prefix in [
        "http://",
        "https://",
        "data:",
        "blob:",
        "mailto:",
        "tel:",
        "javascript:",
    ] {
        if lower.starts_with(prefix) {
            return None;
        }
    }

    base.join(trimmed).ok().map(String::from)
}

/// Rewrite each URL in a `srcset` value (`url1 1x, url2 2x, url3 300w`)
fn resolve_srcset(base: &Url, srcset: &str) -> String {
    srcset
        .split(',')
        .map(|entry| {
            let entry = entry.trim();
            let mut parts = entry.splitn(2, char::is_whitespace);
            let candidate = parts.next().unwrap_or_default();
            let descriptor = parts.next();

            let resolved =
                resolve_reference(base, candidate).unwrap_or_else(|| candidate.to_string());
            match descriptor {
                Some(d) => format!("{} {}", resolved, d.trim()),
                None => resolved,
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
