//! Error types for kstatus-kube

use thiserror::Error;

/// Result type for status classification
pub type Result<T> = std::result::Result<T, StatusError>;

/// Errors that can occur while classifying an object
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StatusError {
    /// The object reference was absent
    #[error("{kind} is nil")]
    NilInput { kind: &'static str },

    /// The object could not be decoded into its typed schema
    #[error("convert object to {target}: {source}")]
    Conversion {
        target: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The object does not declare apiVersion and kind
    #[error("object '{name}' has no apiVersion/kind")]
    MissingTypeMeta { name: String },

    /// Classification was cancelled before it started
    #[error("status classification cancelled")]
    Cancelled,

    /// Manifest could not be parsed
    #[error("invalid manifest: {0}")]
    InvalidManifest(String),

    /// Object store failure
    #[error("store error: {0}")]
    Store(String),
}

impl From<serde_yaml::Error> for StatusError {
    fn from(e: serde_yaml::Error) -> Self {
        StatusError::InvalidManifest(e.to_string())
    }
}

impl StatusError {
    /// Check if this error came from an absent object
    pub fn is_nil_input(&self) -> bool {
        matches!(self, StatusError::NilInput { .. })
    }

    /// Check if this error came from decoding the object
    pub fn is_conversion(&self) -> bool {
        matches!(self, StatusError::Conversion { .. })
    }
}
