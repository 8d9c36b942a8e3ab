//! Embedding proxy endpoint
//!
//! `GET /proxy?url=<target>&test=<true|false>` runs the full pipeline:
//! validate → SSRF guard → rate limit → fetch → (HTML only) rewrite → emit.
//! Each stage short-circuits with its own error response; nothing after a
//! failed stage executes.

use crate::core::rewriter::{RemotePageRewriter, RewriteContext, RewriteHtml};
use crate::core::url_guard::{ensure_public_target, normalize_target};
use crate::server::middleware::{client_identifier, hosting_origin};
use crate::server::state::AppState;
use crate::utils::error::{ProxyError, Result};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

/// Configure proxy routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/proxy", web::get().to(handle_proxy));
}

/// Query parameters for the proxy endpoint
#[derive(Debug, Deserialize)]
pub struct ProxyQuery {
    /// Target URL to embed
    pub url: Option<String>,
    /// When "true", only probe reachability instead of fetching
    pub test: Option<String>,
}

/// One inbound embedding request, assembled per call and never persisted
#[derive(Debug)]
struct ProxyRequest {
    raw_target: String,
    test_only: bool,
    client_id: String,
}

impl ProxyRequest {
    fn from_parts(req: &HttpRequest, query: &ProxyQuery) -> Self {
        Self {
            raw_target: query.url.clone().unwrap_or_default(),
            test_only: query.test.as_deref() == Some("true"),
            client_id: client_identifier(req),
        }
    }
}

/// Proxy endpoint handler
pub async fn handle_proxy(
    req: HttpRequest,
    query: web::Query<ProxyQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let proxy_req = ProxyRequest::from_parts(&req, &query);

    let target = normalize_target(&proxy_req.raw_target)?;
    ensure_public_target(&target)?;

    let decision = state
        .proxy_limiter
        .check_and_record(&proxy_req.client_id)
        .await?;
    if !decision.allowed {
        return Err(ProxyError::TooManyRequests {
            retry_after_secs: decision.retry_after_secs.unwrap_or(1),
        });
    }

    if proxy_req.test_only {
        let status = state.fetcher.probe(&target).await?;
        debug!("Probe for {} answered {}", target, status);
        return Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "reachable": true,
            "status": status,
        })));
    }

    let result = state.fetcher.fetch(&target).await?;
    let upstream_status =
        StatusCode::from_u16(result.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if result.is_html() {
        let ctx = RewriteContext {
            target,
            hosting_origin: hosting_origin(&req),
        };
        let rewriter = RemotePageRewriter::new(ctx, state.config.widget().clone());
        let html = rewriter.rewrite(&result.body_text())?;

        info!(
            "Proxied {} for {} ({} bytes rewritten)",
            proxy_req.raw_target,
            proxy_req.client_id,
            html.len()
        );

        // Upstream framing and cookie headers are intentionally dropped; the
        // rewritten page is only allowed to be framed by the hosting origin.
        return Ok(HttpResponse::build(upstream_status)
            .content_type("text/html; charset=utf-8")
            .insert_header(("X-Frame-Options", "SAMEORIGIN"))
            .insert_header(("Content-Security-Policy", "frame-ancestors 'self'"))
            .body(html));
    }

    // Non-HTML passthrough: identical bytes, upstream content type verbatim
    let mut builder = HttpResponse::build(upstream_status);
    if let Some(content_type) = &result.content_type {
        builder.content_type(content_type.as_str());
    }
    Ok(builder.body(result.body))
}
