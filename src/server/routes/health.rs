//! Health check and version endpoints

use crate::server::routes::ApiResponse;
use actix_web::{HttpResponse, Result as ActixResult, web};
use std::borrow::Cow;
use tracing::debug;

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/version", web::get().to(version_info));
}

/// Health status payload
#[derive(Debug, Clone, serde::Serialize)]
pub struct HealthStatus {
    /// Service status
    pub status: Cow<'static, str>,
    /// Current timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Crate version
    pub version: Cow<'static, str>,
}

/// Basic health check endpoint
///
/// Used by load balancers and monitoring; always healthy while the process
/// answers.
pub async fn health_check() -> ActixResult<HttpResponse> {
    debug!("Health check requested");

    let health_status = HealthStatus {
        status: Cow::Borrowed("healthy"),
        timestamp: chrono::Utc::now(),
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(health_status)))
}

/// Version payload with build metadata
#[derive(Debug, Clone, serde::Serialize)]
pub struct VersionInfo {
    /// Crate version
    pub version: Cow<'static, str>,
    /// Build timestamp (unix seconds)
    pub build_time: Cow<'static, str>,
    /// Git commit hash at build time
    pub git_hash: Cow<'static, str>,
}

/// Version endpoint
pub async fn version_info() -> ActixResult<HttpResponse> {
    let info = VersionInfo {
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
        build_time: Cow::Borrowed(env!("BUILD_TIME")),
        git_hash: Cow::Borrowed(env!("GIT_HASH")),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(info)))
}
