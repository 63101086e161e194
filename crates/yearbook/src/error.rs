//! Error types for yearbook.
//!
//! This module defines all error types used throughout the yearbook crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for yearbook operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Manifest Errors ===
    /// Failed to read the manifest file.
    #[error("failed to read manifest at {path}: {source}")]
    ManifestRead {
        /// Path to the manifest file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the manifest file.
    #[error("failed to write manifest to {path}: {source}")]
    ManifestWrite {
        /// Path to the manifest file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The manifest parsed as JSON but breaks a manifest invariant.
    #[error("invalid manifest: {message}")]
    ManifestInvalid {
        /// Description of what is wrong.
        message: String,
    },

    /// A year identifier was not four ASCII digits.
    #[error("invalid year '{0}': expected four digits")]
    InvalidYear(String),

    // === Server Errors ===
    /// Failed to bind the listening socket.
    #[error("failed to bind {addr}: {source}")]
    ServerBind {
        /// Address we tried to bind.
        addr: SocketAddr,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The HTTP server stopped with an error.
    #[error("server error: {0}")]
    Server(String),

    // === I/O Errors ===
    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for yearbook operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Create a new invalid manifest error.
    #[must_use]
    pub fn manifest_invalid(message: impl Into<String>) -> Self {
        Self::ManifestInvalid {
            message: message.into(),
        }
    }

    /// Create a new server error.
    #[must_use]
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server(message.into())
    }

    /// Check if this error means the manifest file does not exist yet.
    #[must_use]
    pub fn is_manifest_missing(&self) -> bool {
        matches!(
            self,
            Self::ManifestRead { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Check if this error is a configuration problem.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigLoad(_) | Self::ConfigValidation { .. })
    }
}
