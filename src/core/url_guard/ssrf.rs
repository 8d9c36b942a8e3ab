//! SSRF guard
//!
//! Rejects targets whose hostname is, in literal textual form, a loopback,
//! private, link-local, or otherwise non-routable address.
//!
//! Known limitation: the check operates on the hostname as written, not on
//! the address it resolves to at fetch time. A public hostname that resolves
//! to a private address via DNS (including rebinding) passes this stage, and
//! redirect targets are not re-checked. See DESIGN.md.

use super::normalize::NormalizedUrl;
use crate::utils::error::{ProxyError, Result};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use tracing::debug;

/// Hostnames rejected by exact match
const BLOCKED_HOSTS: &[&str] = &["localhost", "127.0.0.1", "0.0.0.0", "::1", "[::1]"];

/// Reject targets addressing local or private infrastructure.
pub fn ensure_public_target(target: &NormalizedUrl) -> Result<()> {
    let host = target.host().to_ascii_lowercase();

    if BLOCKED_HOSTS.contains(&host.as_str()) {
        debug!("Blocked local target host: {}", host);
        return Err(forbidden(&host));
    }

    // The url crate keeps IPv6 hosts bracketed
    let bare = host.trim_start_matches('[').trim_end_matches(']');

    if let Ok(ip) = bare.parse::<IpAddr>() {
        if is_non_routable(&ip) {
            debug!("Blocked non-routable target address: {}", bare);
            return Err(forbidden(&host));
        }
    }

    // Decimal- and hex-encoded IPv4 literals (2130706433 == 0x7f000001 == 127.0.0.1)
    if bare.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(num) = bare.parse::<u32>() {
            if is_non_routable(&IpAddr::V4(Ipv4Addr::from(num))) {
                return Err(forbidden(&host));
            }
        }
    }
    if let Some(hex) = bare.strip_prefix("0x") {
        if let Ok(num) = u32::from_str_radix(hex, 16) {
            if is_non_routable(&IpAddr::V4(Ipv4Addr::from(num))) {
                return Err(forbidden(&host));
            }
        }
    }

    Ok(())
}

fn forbidden(host: &str) -> ProxyError {
    ProxyError::Forbidden(format!(
        "Cannot proxy local or private address: {}",
        host
    ))
}

/// Whether an IP literal addresses loopback, private, link-local, or other
/// non-routable space
fn is_non_routable(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(ipv4) => {
            ipv4.is_loopback()
                // RFC 1918: 10.0.0.0/8, 172.16.0.0/12, 192.168.0.0/16
                || ipv4.is_private()
                // 169.254.0.0/16, includes cloud metadata endpoints
                || ipv4.is_link_local()
                || ipv4.is_broadcast()
                || ipv4.is_unspecified()
        }
        IpAddr::V6(ipv6) => {
            ipv6.is_loopback()
                || ipv6.is_unspecified()
                // Unique local (fc00::/7)
                || (ipv6.segments()[0] & 0xfe00) == 0xfc00
                // Link-local (fe80::/10)
                || (ipv6.segments()[0] & 0xffc0) == 0xfe80
                || mapped_v4_is_non_routable(ipv6)
        }
    }
}

fn mapped_v4_is_non_routable(ipv6: &Ipv6Addr) -> bool {
    ipv6.to_ipv4_mapped()
        .is_some_and(|ipv4| is_non_routable(&IpAddr::V4(ipv4)))
}
