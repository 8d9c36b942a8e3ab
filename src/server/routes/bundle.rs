//! Bundled static site serving
//!
//! `GET /mounted/{path..}` serves the bundled demo sites from local storage.
//! HTML files get the bundle rewriter applied so their fixed asset
//! references point back under the mount path; other assets stream as-is.
//! The only guard here is against `..` traversal — the content is local and
//! trusted, so the SSRF guard does not apply.

use crate::core::rewriter::{BundleRewriter, RewriteHtml};
use crate::server::state::AppState;
use crate::utils::error::{ProxyError, Result};
use actix_files::NamedFile;
use actix_web::{HttpRequest, HttpResponse, web};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Route pattern for the configured mount path
pub fn route_pattern(mount_path: &str) -> String {
    format!("{}/{{path:.*}}", mount_path)
}

/// Bundle serving handler
pub async fn serve_bundle(
    req: HttpRequest,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let rel = path.into_inner();
    let full = resolve_bundle_path(&state.config.bundles().root, &rel)?;

    if is_html_file(&full) {
        let html = tokio::fs::read_to_string(&full)
            .await
            .map_err(|_| ProxyError::NotFound(format!("No such bundle file: {}", rel)))?;

        let rewriter = BundleRewriter::new(state.config.bundles());
        let rewritten = rewriter.rewrite(&html)?;

        debug!("Served bundled page {} ({} bytes)", rel, rewritten.len());
        return Ok(HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(rewritten));
    }

    let file = NamedFile::open_async(&full)
        .await
        .map_err(|_| ProxyError::NotFound(format!("No such bundle file: {}", rel)))?;
    Ok(file.into_response(&req))
}

/// Resolve a request path inside the bundle root, rejecting traversal.
fn resolve_bundle_path(root: &str, rel: &str) -> Result<PathBuf> {
    if rel
        .split(['/', '\\'])
        .any(|segment| segment == ".." || segment.contains('\0'))
    {
        return Err(ProxyError::InvalidInput("Invalid bundle path".to_string()));
    }

    let mut full = PathBuf::from(root);
    if rel.is_empty() || rel.ends_with('/') {
        full.push(rel);
        full.push("index.html");
    } else {
        full.push(rel);
    }
    Ok(full)
}

fn is_html_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("html") | Some("htm")
    )
}
