//! Utility modules for embedgate
//!
//! - **error**: error taxonomy and HTTP response mapping

pub mod error;

pub use error::{ProxyError, Result};
