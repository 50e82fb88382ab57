//! Storage configuration

use crate::install::PollConfig;

/// Namespace used when none is given
pub const DEFAULT_NAMESPACE: &str = "default";

/// Configuration shared by the installer, kind clients and versioner
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Namespace for objects without one and for cluster-scoped kinds
    pub default_namespace: String,
    /// Type installer readiness polling
    pub poll: PollConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            default_namespace: DEFAULT_NAMESPACE.to_string(),
            poll: PollConfig::default(),
        }
    }
}

impl StorageConfig {
    /// Resolve a possibly empty namespace to the one objects are stored in
    pub fn namespace_or_default<'a>(&'a self, namespace: Option<&'a str>) -> &'a str {
        match namespace {
            Some(ns) if !ns.is_empty() => ns,
            _ => &self.default_namespace,
        }
    }
}
