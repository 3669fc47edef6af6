//! Error types for the image converter worker.
//!
//! Provides a hierarchy of error types using `thiserror` for ergonomic error handling.

use std::io;
use serde::Serialize;
use thiserror::Error;

/// Main error type for the converter worker.
///
/// All errors are converted to this type before being turned into a tagged
/// `error` response on the message boundary.
#[derive(Error, Debug, Serialize)]
pub enum ConverterError {
    /// Engine initialization failed (missing or invalid engine payload)
    #[error("error loading image engine: {0}")]
    Initialization(String),

    /// A conversion was attempted before the engine finished loading
    #[error("image engine not initialized")]
    NotInitialized,

    /// Unknown request type on the message boundary
    #[error("Unknown message type: {0}")]
    UnsupportedRequest(String),

    /// A recognized request type whose body failed to decode
    #[error("invalid message payload: {0}")]
    InvalidPayload(String),

    /// A multi-image container (ICO/ANI/ICNS) could not be parsed
    #[error("{0}")]
    ContainerParse(String),

    /// Unsupported or invalid image format
    #[error("Format error: {0}")]
    Format(String),

    /// Image decode/encode/resize failed
    #[error("Processing error: {0}")]
    Processing(String),

    /// Byte-stream or archive IO error
    #[error("IO error: {0}")]
    IO(String),
}

/// Convenience result type for converter operations.
pub type ConverterResult<T> = Result<T, ConverterError>;

// Helper methods for error creation
impl ConverterError {
    pub fn initialization<T: Into<String>>(msg: T) -> Self {
        Self::Initialization(msg.into())
    }

    pub fn container<T: Into<String>>(msg: T) -> Self {
        Self::ContainerParse(msg.into())
    }

    pub fn format<T: Into<String>>(msg: T) -> Self {
        Self::Format(msg.into())
    }

    pub fn processing<T: Into<String>>(msg: T) -> Self {
        Self::Processing(msg.into())
    }
}

// Convert std::io::Error to ConverterError
impl From<io::Error> for ConverterError {
    fn from(err: io::Error) -> Self {
        Self::IO(err.to_string())
    }
}

// Engine errors are unclassified processing failures
impl From<image::ImageError> for ConverterError {
    fn from(err: image::ImageError) -> Self {
        Self::Processing(err.to_string())
    }
}

impl From<zip::result::ZipError> for ConverterError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::IO(format!("zip: {err}"))
    }
}

impl From<serde_json::Error> for ConverterError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidPayload(err.to_string())
    }
}

impl From<tokio::sync::AcquireError> for ConverterError {
    fn from(err: tokio::sync::AcquireError) -> Self {
        Self::Processing(format!("Failed to acquire frame worker: {err}"))
    }
}
