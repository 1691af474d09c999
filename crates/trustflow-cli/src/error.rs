//! Error types for trustflow-cli

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for trustflow-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in trustflow-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from trustflow-core
    #[error("Core error: {0}")]
    Core(#[from] trustflow_core::Error),

    /// Error from trustflow-gifttax
    #[error("Gift tax error: {0}")]
    GiftTax(#[from] trustflow_gifttax::Error),

    /// Error from trustflow-premium
    #[error("Premium error: {0}")]
    Premium(#[from] trustflow_premium::Error),

    /// An input snapshot could not be decoded
    #[error("Could not read {path}: {source}")]
    Input {
        /// Snapshot file
        path: PathBuf,
        /// Decoder error
        #[source]
        source: serde_json::Error,
    },

    /// Output could not be encoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Core(trustflow_core::Error::config(message))
    }

    /// Shorthand for a file I/O error.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Core(trustflow_core::Error::io_with_path(source, path))
    }
}
