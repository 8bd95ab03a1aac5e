//! CLI error types with exit code handling

use miette::Diagnostic;
use thiserror::Error;

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum CliError {
    /// Manifest could not be read or parsed
    #[error("Manifest error in {file}: {message}")]
    #[diagnostic(code(kstatus::cli::manifest))]
    Manifest {
        file: String,
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Configuration file is invalid
    #[error("Config error: {message}")]
    #[diagnostic(code(kstatus::cli::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// One or more objects are in error
    #[error("{count} object(s) unhealthy")]
    #[diagnostic(
        code(kstatus::cli::unhealthy),
        help("Run without --strict to report unhealthy objects without failing")
    )]
    Unhealthy { count: usize },

    /// IO error (file not found, permissions, etc.)
    #[error("IO error: {message}")]
    #[diagnostic(code(kstatus::cli::io))]
    Io { message: String },

    /// Internal error (runtime, unexpected failure)
    #[error("Internal error: {message}")]
    #[diagnostic(code(kstatus::cli::internal))]
    Internal { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Manifest { .. } => exit_codes::MANIFEST_ERROR,
            CliError::Config { .. } => exit_codes::CONFIG_ERROR,
            CliError::Unhealthy { .. } => exit_codes::UNHEALTHY,
            CliError::Io { .. } => exit_codes::IO_ERROR,
            CliError::Internal { .. } => exit_codes::ERROR,
        }
    }

    /// Create a manifest error
    pub fn manifest(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Manifest {
            file: file.into(),
            message: message.into(),
            help: Some("Manifests must be YAML or JSON Kubernetes objects separated by ---".into()),
        }
    }

    /// Create a config error with help text
    pub fn config(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: Some(help.into()),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::internal(format!("JSON serialization failed: {}", err))
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(err: serde_yaml::Error) -> Self {
        CliError::internal(format!("YAML serialization failed: {}", err))
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
