//! Error types for TrustFlow core.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::types::NoticeStatus;

/// Errors raised by TrustFlow computations and data-model operations.
///
/// All error variants are marked with `#[non_exhaustive]` to allow
/// adding new error types without breaking changes.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Malformed or out-of-range input, rejected before any computation.
    #[error("Validation error: {message}")]
    Validation {
        /// Field or aspect that failed validation
        field: Option<String>,
        /// What went wrong
        message: String,
    },

    /// A withdrawal notice was asked to move along an edge the lifecycle forbids.
    #[error("Invalid notice transition: {from} -> {to}")]
    InvalidTransition {
        /// Status the notice was in
        from: NoticeStatus,
        /// Status that was requested
        to: NoticeStatus,
    },

    /// The withdrawal right could not be exercised because its deadline has passed.
    #[error("Withdrawal deadline {deadline} has passed (attempted on {attempted})")]
    DeadlinePassed {
        /// Last day the right was exercisable
        deadline: NaiveDate,
        /// Day the action was attempted
        attempted: NaiveDate,
    },

    /// A notice cannot expire while its withdrawal window is still open.
    #[error("Withdrawal deadline {deadline} has not passed (attempted on {attempted})")]
    DeadlineNotReached {
        /// Last day the right is exercisable
        deadline: NaiveDate,
        /// Day the action was attempted
        attempted: NaiveDate,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// I/O error without path context
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error on a specific file
    #[error("I/O error on {path}: {source}")]
    IoPath {
        /// File that was being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience `Result` type alias for TrustFlow operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns whether this error is retryable.
    ///
    /// Only I/O failures are transient; the computations themselves are pure
    /// and will fail the same way on every attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Io(_) | Error::IoPath { .. } => true,
            Error::Validation { .. } => false,
            Error::InvalidTransition { .. } => false,
            Error::DeadlinePassed { .. } => false,
            Error::DeadlineNotReached { .. } => false,
            Error::Config { .. } => false,
            Error::Serialization(_) => false,
        }
    }

    /// Creates a new validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::Validation {
            field: None,
            message: message.into(),
        }
    }

    /// Creates a new validation error with a field name.
    pub fn validation_field<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        Error::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Wraps an I/O error with the path it occurred on.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::IoPath {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
