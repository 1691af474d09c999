//! Error types for trustflow-premium

use thiserror::Error;

/// Result type alias for trustflow-premium operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in trustflow-premium
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
    /// Shorthand for a validation error on `field`.
    pub fn validation_field<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        Error::Core(trustflow_core::Error::validation_field(field, message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_field_wraps_core() {
        let err = Error::validation_field("lookahead_days", "must be positive");
        assert!(matches!(
            err,
            Error::Core(trustflow_core::Error::Validation { ref field, .. })
                if field.as_deref() == Some("lookahead_days")
        ));
        assert_eq!(err.to_string(), "Core error: Validation error: must be positive");
    }
}
