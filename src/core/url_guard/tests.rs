//! Tests for target URL validation

use super::{ensure_public_target, normalize_target};
use crate::utils::error::ProxyError;

#[test]
fn test_normalize_rejects_empty_input() {
    assert!(matches!(
        normalize_target(""),
        Err(ProxyError::InvalidInput(_))
    ));
    assert!(matches!(
        normalize_target("   "),
        Err(ProxyError::InvalidInput(_))
    ));
}

#[test]
fn test_normalize_defaults_to_https() {
    let url = normalize_target("example.com/page").unwrap();
    assert_eq!(url.as_str(), "https://example.com/page");
}

#[test]
fn test_normalize_keeps_explicit_http() {
    let url = normalize_target("http://example.com").unwrap();
    assert_eq!(url.as_url().scheme(), "http");
}

#[test]
fn test_normalize_rejects_non_http_schemes() {
    assert!(matches!(
        normalize_target("ftp://example.com/file"),
        Err(ProxyError::InvalidInput(_))
    ));
    assert!(matches!(
        normalize_target("javascript:alert(1)"),
        Err(ProxyError::InvalidInput(_))
    ));
}

#[test]
fn test_normalize_rejects_hostless_input() {
    assert!(matches!(
        normalize_target("http:///just-a-path"),
        Err(ProxyError::InvalidInput(_))
    ));
    assert!(matches!(
        normalize_target("https://"),
        Err(ProxyError::InvalidInput(_))
    ));
}

#[test]
fn test_normalize_is_idempotent() {
    let once = normalize_target("Example.COM/Path?q=1").unwrap();
    let twice = normalize_target(once.as_str()).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_resolution_base_is_document_directory() {
    let url = normalize_target("https://example.com/articles/x").unwrap();
    assert_eq!(url.resolution_base().as_str(), "https://example.com/articles/");

    let root = normalize_target("https://example.com").unwrap();
    assert_eq!(root.resolution_base().as_str(), "https://example.com/");
}

#[test]
fn test_guard_blocks_local_hosts() {
    for raw in [
        "http://localhost:3000",
        "http://127.0.0.1",
        "http://0.0.0.0:8080",
        "http://[::1]/admin",
        "https://LOCALHOST/x",
    ] {
        let url = normalize_target(raw).unwrap();
        assert!(
            matches!(ensure_public_target(&url), Err(ProxyError::Forbidden(_))),
            "{} should be blocked",
            raw
        );
    }
}

#[test]
fn test_guard_blocks_private_ranges() {
    for raw in [
        "http://10.0.0.1",
        "http://10.255.255.254/path",
        "http://172.16.0.1",
        "http://172.31.9.9:8080",
        "http://192.168.1.1",
        "http://169.254.169.254/latest/meta-data",
    ] {
        let url = normalize_target(raw).unwrap();
        assert!(
            matches!(ensure_public_target(&url), Err(ProxyError::Forbidden(_))),
            "{} should be blocked",
            raw
        );
    }
}

#[test]
fn test_guard_blocks_encoded_loopback_literals() {
    // 2130706433 == 0x7f000001 == 127.0.0.1
    let decimal = normalize_target("http://2130706433/").unwrap();
    assert!(ensure_public_target(&decimal).is_err());

    let hex = normalize_target("http://0x7f000001/").unwrap();
    assert!(ensure_public_target(&hex).is_err());
}

#[test]
fn test_guard_allows_public_targets() {
    for raw in [
        "https://example.com",
        "https://www.rust-lang.org/learn",
        "http://8.8.8.8",
        // Just outside the RFC 1918 ranges
        "http://172.15.0.1",
        "http://172.32.0.1",
        "http://11.0.0.1",
        "http://192.169.0.1",
    ] {
        let url = normalize_target(raw).unwrap();
        assert!(
            ensure_public_target(&url).is_ok(),
            "{} should be allowed",
            raw
        );
    }
}

#[test]
fn test_guard_does_not_resolve_hostnames() {
    // The guard is a literal check; a hostname that would resolve to a
    // private address still passes this stage.
    let url = normalize_target("https://internal-service.example.com").unwrap();
    assert!(ensure_public_target(&url).is_ok());
}
