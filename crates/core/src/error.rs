//! Error types for Service Hub.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using Service Hub's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for Service Hub.
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Session Errors
    // =========================================================================
    #[error("Initialization error: {0}")]
    Initialization(String),

    // =========================================================================
    // Adapter Errors
    // =========================================================================
    #[error("Invocation error: {0}")]
    Invocation(String),

    #[error("Transport error: HTTP status {status}")]
    Transport { status: u16 },

    #[error("Parsing error: {0}")]
    Parsing(String),

    #[error("Capture error: {0}")]
    Capture(String),

    // =========================================================================
    // Caller Errors
    // =========================================================================
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // =========================================================================
    // Generic Errors
    // =========================================================================
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Create an initialization error.
    pub fn initialization(msg: impl Into<String>) -> Self {
        Self::Initialization(msg.into())
    }

    /// Create an invocation error.
    pub fn invocation(msg: impl Into<String>) -> Self {
        Self::Invocation(msg.into())
    }

    /// Create a transport error for a non-success HTTP status.
    pub fn transport(status: u16) -> Self {
        Self::Transport { status }
    }

    /// Create a parsing error.
    pub fn parsing(msg: impl Into<String>) -> Self {
        Self::Parsing(msg.into())
    }

    /// Create a capture error.
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture(msg.into())
    }

    /// Create an invalid request error.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create an internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Taxonomy kind used to label a `Failure` result.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Initialization(_) => ErrorKind::Initialization,
            Error::Invocation(_) => ErrorKind::Invocation,
            Error::Transport { .. } => ErrorKind::Transport,
            Error::Parsing(_) | Error::Serialization(_) => ErrorKind::Parsing,
            Error::Capture(_) => ErrorKind::Capture,
            Error::InvalidRequest(_) => ErrorKind::InvalidRequest,
            Error::Internal(_) | Error::Other(_) => ErrorKind::Internal,
        }
    }

    /// Only initialization failures end a session.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Initialization(_))
    }
}

/// Failure classification carried inside `ServiceResult::Failure`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Initialization,
    Invocation,
    Transport,
    Parsing,
    Capture,
    InvalidRequest,
    Internal,
}

impl ErrorKind {
    /// Stable label, also used for metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Initialization => "InitializationError",
            ErrorKind::Invocation => "InvocationError",
            ErrorKind::Transport => "TransportError",
            ErrorKind::Parsing => "ParsingError",
            ErrorKind::Capture => "CaptureError",
            ErrorKind::InvalidRequest => "InvalidRequest",
            ErrorKind::Internal => "InternalError",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
