//! Widget injection configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Configuration for the injected embed widget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// URL of the widget bootstrap script injected into proxied pages
    ///
    /// A path is resolved against the hosting origin at injection time; an
    /// absolute URL is used as-is.
    #[serde(default = "default_widget_script_url")]
    pub script_url: String,
    /// Backend origin the widget calls from embedded pages
    ///
    /// When unset, the inbound Host header decides.
    #[serde(default)]
    pub backend_origin: Option<String>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            script_url: default_widget_script_url(),
            backend_origin: None,
        }
    }
}

impl WidgetConfig {
    /// Merge widget configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.script_url != default_widget_script_url() {
            self.script_url = other.script_url;
        }
        if other.backend_origin.is_some() {
            self.backend_origin = other.backend_origin;
        }
        self
    }

    /// Validate widget configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.script_url.is_empty() {
            return Err("Widget script URL cannot be empty".to_string());
        }
        Ok(())
    }
}
