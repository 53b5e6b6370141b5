//! Error handling module for the trimmer core

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for trimmer operations
#[derive(Error, Debug)]
pub enum TrimError {
    /// Asset could not be loaded or probed
    #[error("Failed to load asset: {message}")]
    AssetLoadError { message: String },

    /// Trim invocation failed; message is the external tool's diagnostic, verbatim
    #[error("Trimming failed: {message}")]
    TrimFailed { message: String },

    /// Thumbnail extraction failed
    #[error("Thumbnail extraction failed: {message}")]
    ThumbnailError { message: String },

    /// Configuration file error
    #[error("Invalid configuration: {message}")]
    ConfigError { message: String },

    /// Domain layer error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for trimmer operations
pub type TrimResult<T> = std::result::Result<T, TrimError>;
