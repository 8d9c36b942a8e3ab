//! Outbound page fetching
//!
//! Performs the HTTP GET/HEAD against validated targets with timeouts,
//! redirect caps, and browser-like headers.

mod fetcher;
mod types;


pub use fetcher::Fetcher;
pub use types::FetchResult;
