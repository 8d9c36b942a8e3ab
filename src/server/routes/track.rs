//! Widget analytics endpoint
//!
//! `POST /api/track` records widget pageview events. Deliberately minimal —
//! events are logged, not stored — but it carries its own rate-limit bucket,
//! independent of the proxy endpoint's.

use crate::server::middleware::client_identifier;
use crate::server::state::AppState;
use crate::utils::error::{ProxyError, Result};
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

/// Configure analytics routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/track", web::post().to(handle_track));
}

/// A widget event reported from an embedded page
#[derive(Debug, Deserialize)]
pub struct TrackEvent {
    /// Event name (e.g. "pageview", "widget_opened")
    pub event: String,
    /// Page the widget was embedded on
    pub page: Option<String>,
    /// Referrer of the embedding page
    pub referrer: Option<String>,
}

/// Analytics endpoint handler
pub async fn handle_track(
    req: HttpRequest,
    payload: web::Json<TrackEvent>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let client_id = client_identifier(&req);
    let decision = state.track_limiter.check_and_record(&client_id).await?;
    if !decision.allowed {
        return Err(ProxyError::TooManyRequests {
            retry_after_secs: decision.retry_after_secs.unwrap_or(1),
        });
    }

    info!(
        event = %payload.event,
        page = payload.page.as_deref().unwrap_or("-"),
        referrer = payload.referrer.as_deref().unwrap_or("-"),
        client = %client_id,
        "widget event"
    );

    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}
