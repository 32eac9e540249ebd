//! Application-level errors

use thiserror::Error;

use crate::core::CalcError;

/// Result type for application operations
pub type AppResult<T> = Result<T, AppError>;

/// Errors that end the program
#[derive(Debug, Error)]
pub enum AppError {
    /// Terminal or file I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The log subscriber could not be installed
    #[error("Logging setup failed: {message}")]
    Logging {
        /// Error message
        message: String,
    },

    /// One-shot evaluation failed
    #[error("{0}")]
    Calc(#[from] CalcError),
}

impl AppError {
    /// Create a logging error
    #[must_use]
    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }
}
