//! Helper functions for request handling

use actix_web::HttpRequest;

/// Derive the rate-limit client identifier for a request.
///
/// The first `X-Forwarded-For` entry wins (the proxy usually sits behind a
/// load balancer); the transport peer address is the fallback.
pub fn client_identifier(req: &HttpRequest) -> String {
    if let Some(forwarded) = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
    {
        let first = forwarded.split(',').next().unwrap_or(forwarded).trim();
        if !first.is_empty() {
            return first.to_string();
        }
    }

    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Origin of the hosting page, scheme included.
///
/// actix resolves `X-Forwarded-Proto`/`X-Forwarded-Host` into the connection
/// info, so this works both behind a load balancer and when serving
/// directly.
pub fn hosting_origin(req: &HttpRequest) -> String {
    let info = req.connection_info();
    format!("{}://{}", info.scheme(), info.host())
}
