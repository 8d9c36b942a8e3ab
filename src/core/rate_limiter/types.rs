//! Rate limiter types and data structures

use std::time::Instant;

/// Outcome of counting one request against a client's window
#[derive(Debug, Clone)]
pub struct RateLimitDecision {
    /// Whether the request is allowed
    pub allowed: bool,
    /// Maximum requests allowed per window
    pub limit: u32,
    /// Remaining requests in the current window
    pub remaining: u32,
    /// Seconds until the window resets (only set when denied)
    pub retry_after_secs: Option<u64>,
}

impl RateLimitDecision {
    /// Decision used when limiting is disabled
    pub(super) fn unlimited(limit: u32) -> Self {
        Self {
            allowed: true,
            limit,
            remaining: limit,
            retry_after_secs: None,
        }
    }
}

/// Per-client fixed-window counter
#[derive(Debug, Clone)]
pub(super) struct WindowBucket {
    /// Requests counted in the current window
    pub(super) count: u32,
    /// When the current window started
    pub(super) window_started: Instant,
}

impl WindowBucket {
    pub(super) fn new(now: Instant) -> Self {
        Self {
            count: 0,
            window_started: now,
        }
    }
}
