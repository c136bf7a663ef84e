//! Error types for the gaitphase tracker crate.
//!
//! The state machine itself never fails; errors originate from the sinks
//! that persist transition events.

use thiserror::Error;

/// A specialized `Result` type for tracker operations.
pub type TrackerResult<T> = Result<T, TrackerError>;

/// Unified error type for tracker operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TrackerError {
    /// Track log I/O error
    #[error("Track log I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Sink error outside plain I/O
    #[error("Sink error: {message}")]
    Sink {
        /// Description of the sink failure
        message: String,
    },
}

impl TrackerError {
    /// Creates a new sink error.
    #[must_use]
    pub fn sink(message: impl Into<String>) -> Self {
        Self::Sink {
            message: message.into(),
        }
    }
}
