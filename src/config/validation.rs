//! Configuration validation
//!
//! This module provides the validation seam for configuration structures.

use super::models::GatewayConfig;
use crate::utils::error::{ProxyError, Result};
use tracing::debug;

/// Validation trait for configuration structures
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

impl Validate for GatewayConfig {
    fn validate(&self) -> Result<()> {
        debug!("Validating gateway configuration");
        GatewayConfig::validate(self).map_err(ProxyError::Config)
    }
}
