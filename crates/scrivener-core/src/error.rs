//! Error types for Scrivener core.

use thiserror::Error;

/// The main error type for Scrivener core operations.
#[derive(Debug, Error)]
pub enum ScrivenerError {
    /// Signal-related error.
    #[error("signal error: {0}")]
    Signal(#[from] SignalError),
}

/// Signal-specific errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignalError {
    /// The connection ID is invalid or has already been disconnected.
    #[error("invalid or already disconnected connection")]
    InvalidConnection,
}

/// A specialized Result type for Scrivener core operations.
pub type Result<T> = std::result::Result<T, ScrivenerError>;
