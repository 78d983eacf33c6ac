//! Error types for format operations
//!
//! Converters never fail; these errors only surface at the boundaries: decoding
//! an incoming payload, looking up a format, or asking a format for a capability
//! it does not have.

use thiserror::Error;

/// Errors that can occur during format operations
#[derive(Debug, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error during parsing
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Format does not support the requested operation
    #[error("Operation not supported: {0}")]
    NotSupported(String),
    /// The payload was not valid JSON at all
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}
