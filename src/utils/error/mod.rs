//! Error handling for the proxy
//!
//! Defines the error taxonomy and its mapping onto HTTP responses.

pub mod error;

pub use error::{ProxyError, Result};
