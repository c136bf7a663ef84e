//! Error types for the gaitphase core crate.
//!
//! Error handling uses [`thiserror`] for automatic `Display` and `Error`
//! trait implementations.
//!
//! # Example
//!
//! ```rust
//! use gaitphase_core::error::CoreError;
//!
//! fn check_joint_index(index: u8) -> Result<(), CoreError> {
//!     if index > 24 {
//!         return Err(CoreError::validation(format!("no joint with index {index}")));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// A specialized `Result` type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Top-level error type for the gaitphase core crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CoreError {
    /// Validation error for input data
    #[error("Validation error: {message}")]
    Validation {
        /// Description of what validation failed
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
    },

    /// Frame source error
    #[error("Frame source error: {message}")]
    Source {
        /// Description of the source failure
        message: String,
    },
}

impl CoreError {
    /// Creates a new validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a new configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a new frame source error.
    #[must_use]
    pub fn source(message: impl Into<String>) -> Self {
        Self::Source {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = CoreError::validation("coordinate out of range");
        assert!(err.to_string().contains("Validation error"));
        assert!(err.to_string().contains("coordinate out of range"));
    }

    #[test]
    fn test_source_error_display() {
        let err = CoreError::source("recording ended unexpectedly");
        assert!(err.to_string().contains("Frame source error"));
    }
}
