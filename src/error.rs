//! Error types for the catalog CRD storage
//!
//! Provides structured error types for type installation, object conversion,
//! kind clients and the resource versioner.

use crate::registry::KindId;
use thiserror::Error;

/// Unified error type for the storage adapter
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Internal Errors
    // =========================================================================
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("{operation} not implemented")]
    NotImplemented { operation: &'static str },

    // =========================================================================
    // Kubernetes Errors
    // =========================================================================
    /// Errors from the host API, including not-found, passed through unchanged
    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] http::Error),

    // =========================================================================
    // Type Installation Errors
    // =========================================================================
    #[error("Failed to install {} resource type(s): {}", .failures.len(), join_failures(.failures))]
    Install { failures: Vec<KindFailure> },

    #[error("Resource type {definition} not ready after {timeout_secs}s: {last_error}")]
    PollTimeout {
        definition: String,
        timeout_secs: u64,
        last_error: String,
    },

    // =========================================================================
    // Conversion Errors
    // =========================================================================
    #[error("Failed to convert {kind} object: {source}")]
    Conversion {
        kind: KindId,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode object {name}: {source}")]
    Encode {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    // =========================================================================
    // Versioning Errors
    // =========================================================================
    #[error("Object has no name")]
    MissingName,

    #[error("Object {name} has no resource version")]
    MissingResourceVersion { name: String },

    #[error("Invalid resource version {value:?}: {source}")]
    InvalidResourceVersion {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Installation failure of a single kind
#[derive(Debug)]
pub struct KindFailure {
    /// Registration name of the failing kind
    pub definition: String,
    /// Underlying cause
    pub error: Box<Error>,
}

impl std::fmt::Display for KindFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.definition, self.error)
    }
}

fn join_failures(failures: &[KindFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl Error {
    pub fn not_implemented(operation: &'static str) -> Self {
        Error::NotImplemented { operation }
    }

    /// Check if this is a not-found response from the host API
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Kube(kube::Error::Api(response)) if response.code == 404)
    }

    /// Check if this error marks an unsupported operation
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, Error::NotImplemented { .. })
    }

    /// Check if this error is transient
    ///
    /// A registration that is not visible yet and connectivity failures are
    /// worth retrying; everything else is permanent.
    pub fn is_transient(&self) -> bool {
        match self {
            Error::Kube(kube::Error::Api(response)) => {
                response.code == 404 || response.code == 429 || response.code >= 500
            }
            Error::Kube(_) => true,
            _ => false,
        }
    }
}

/// Result type alias for the storage adapter
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
pub(crate) fn api_error(code: u16, reason: &str, message: &str) -> Error {
    Error::Kube(kube::Error::Api(kube::core::ErrorResponse {
        status: "Failure".into(),
        message: message.into(),
        reason: reason.into(),
        code,
    }))
}
