//! Error types for sasgraph.

use thiserror::Error;

use crate::state::State;

/// Main error type for sasgraph operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SasError {
    /// Malformed input: wrong marker, bad integer, dangling reference.
    #[error("Format error at line {line}: {message}")]
    Format { line: usize, message: String },

    /// Input ended while a section was still being read.
    #[error("Unexpected end of input while reading {section} section")]
    UnexpectedEof { section: &'static str },

    /// The Cartesian product of all variable domains is larger than allowed.
    #[error("Cartesian state space of {attempted} states exceeds the limit of {limit}")]
    CapacityExceeded { attempted: u128, limit: usize },

    /// A state was looked up in a graph that does not contain it.
    #[error("State {state} is not a node of the graph")]
    StateNotFound { state: State },

    /// Builder configuration could not be decoded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SasError {
    /// Create a format error at the given 1-based line.
    pub fn format(line: usize, message: impl Into<String>) -> Self {
        SasError::Format {
            line,
            message: message.into(),
        }
    }

    /// Returns true if the error describes malformed or truncated input.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            SasError::Format { .. } | SasError::UnexpectedEof { .. }
        )
    }

    /// Returns true if the caller can recover by changing its request,
    /// e.g. by raising the cap or using the reachability builder.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SasError::CapacityExceeded { .. })
    }
}

/// Convenience Result type for sasgraph operations.
pub type Result<T> = std::result::Result<T, SasError>;

impl From<serde_json::Error> for SasError {
    fn from(err: serde_json::Error) -> Self {
        SasError::Serialization(err.to_string())
    }
}
