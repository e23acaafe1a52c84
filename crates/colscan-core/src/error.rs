//! Error types for `colscan`.
//!
//! Absent keys are never errors: lookups report them through `Option`.
//! Errors are reserved for inputs a component refuses to process.

use thiserror::Error;

/// Result type alias for `colscan` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in `colscan` operations.
///
/// Error codes follow the pattern `COLSCAN-XXX` for easy debugging.
#[derive(Error, Debug)]
pub enum Error {
    /// Vector scan precondition violated and the configured policy rejects it (COLSCAN-001).
    #[error("[COLSCAN-001] Unsupported input shape for {operation}: {reason}")]
    UnsupportedShape {
        /// Scan operation that refused the input.
        operation: &'static str,
        /// What was wrong with the input.
        reason: String,
    },

    /// Dictionary cannot assign any more codes (COLSCAN-002).
    #[error("[COLSCAN-002] Code space exhausted: {distinct} distinct keys present, {requested} more requested")]
    CodeSpaceExhausted {
        /// Keys already in the dictionary.
        distinct: usize,
        /// New keys the rejected call would have added.
        requested: usize,
    },

    /// Configuration error (COLSCAN-003).
    #[error("[COLSCAN-003] Configuration error: {0}")]
    Config(String),

    /// Internal error (COLSCAN-004).
    ///
    /// Indicates an unexpected internal error, such as a worker pool that
    /// could not be built.
    #[error("[COLSCAN-004] Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Returns the error code (e.g., "COLSCAN-001").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedShape { .. } => "COLSCAN-001",
            Self::CodeSpaceExhausted { .. } => "COLSCAN-002",
            Self::Config(_) => "COLSCAN-003",
            Self::Internal(_) => "COLSCAN-004",
        }
    }

    /// Returns true if this error is recoverable.
    ///
    /// An unsupported shape can be retried with a different policy and a
    /// configuration error by fixing the configuration.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::UnsupportedShape { .. } | Self::Config(_))
    }
}

impl From<crate::config::ConfigError> for Error {
    fn from(err: crate::config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
