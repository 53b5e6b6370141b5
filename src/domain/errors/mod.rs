// Domain errors - Error types for the domain layer

use std::fmt;

/// Domain-specific error types
#[derive(Debug, Clone)]
pub enum DomainError {
    /// Invalid arguments provided
    BadArgs(String),
    /// Asset probing failed
    ProbeFailed(String),
    /// Required track is missing
    MissingTrack(String),
    /// External trim execution failed
    ExecFailed(String),
    /// Thumbnail extraction failed
    ThumbnailFailed(String),
    /// Invalid state transition
    BadState(String),
    /// Configuration is invalid
    ConfigInvalid(String),
    /// I/O failure talking to an external tool
    Io(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::BadArgs(msg) => write!(f, "Bad arguments: {}", msg),
            DomainError::ProbeFailed(msg) => write!(f, "Probe failed: {}", msg),
            DomainError::MissingTrack(msg) => write!(f, "Missing track: {}", msg),
            DomainError::ExecFailed(msg) => write!(f, "Execution failed: {}", msg),
            DomainError::ThumbnailFailed(msg) => write!(f, "Thumbnail failed: {}", msg),
            DomainError::BadState(msg) => write!(f, "Bad state: {}", msg),
            DomainError::ConfigInvalid(msg) => write!(f, "Invalid configuration: {}", msg),
            DomainError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        DomainError::Io(err.to_string())
    }
}
