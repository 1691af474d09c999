//! Error types for trustflow-gifttax

use thiserror::Error;

/// Result type alias for trustflow-gifttax operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in trustflow-gifttax
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from trustflow-core
    #[error("Core error: {0}")]
    Core(#[from] trustflow_core::Error),

    /// CSV encoding failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Writing the export failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a validation error raised by this crate.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::Core(trustflow_core::Error::validation(message))
    }
}
