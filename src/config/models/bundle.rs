//! Bundled static site configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Configuration for bundled demo sites served from local storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleConfig {
    /// Directory holding the bundled sites
    #[serde(default = "default_bundle_root")]
    pub root: String,
    /// URL path prefix the bundles are mounted under
    #[serde(default = "default_mount_path")]
    pub mount_path: String,
    /// Asset filenames the bundle rewriter remaps to the mount path
    #[serde(default = "default_bundle_assets")]
    pub assets: Vec<String>,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            root: default_bundle_root(),
            mount_path: default_mount_path(),
            assets: default_bundle_assets(),
        }
    }
}

impl BundleConfig {
    /// Merge bundle configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.root != default_bundle_root() {
            self.root = other.root;
        }
        if other.mount_path != default_mount_path() {
            self.mount_path = other.mount_path;
        }
        if other.assets != default_bundle_assets() {
            self.assets = other.assets;
        }
        self
    }

    /// Validate bundle configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.mount_path.starts_with('/') {
            return Err("Bundle mount path must start with '/'".to_string());
        }
        if self.mount_path.ends_with('/') && self.mount_path.len() > 1 {
            return Err("Bundle mount path must not end with '/'".to_string());
        }
        Ok(())
    }
}
