//! Error types for the Cast library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Cast operations.
#[derive(Error, Debug)]
pub enum Error {
    /// File does not exist or cannot be accessed
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Invalid magic value at start of file
    #[error("Invalid Cast file magic: {0:#010x}")]
    InvalidMagic(u32),

    /// Property kind tag outside the known set
    #[error("Unsupported property kind: {0:#06x}")]
    UnsupportedPropertyKind(u16),

    /// Invalid data structure in file or in a tree about to be written
    #[error("Invalid file structure: {0}")]
    InvalidStructure(String),

    /// Property not found by name
    #[error("Property not found: {0}")]
    PropertyNotFound(String),

    /// Referenced node not found by hash
    #[error("Node not found: {0:#018x}")]
    NodeNotFound(u64),

    /// Property exists but holds no values
    #[error("Property has no values: {0}")]
    EmptyValues(String),

    /// Type mismatch when reading values
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// Memory mapping failed
    #[error("Memory mapping failed: {0}")]
    MmapFailed(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Text requested as `&str` is not valid UTF-8
    #[error("Invalid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

impl Error {
    /// Create an invalid structure error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidStructure(msg.into())
    }

    /// Create a type mismatch error.
    pub fn mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// True for errors caused by malformed data rather than I/O or lookups.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidMagic(_) | Self::UnsupportedPropertyKind(_) | Self::InvalidStructure(_)
        )
    }

    /// True for failed property or node lookups.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::PropertyNotFound(_) | Self::NodeNotFound(_) | Self::EmptyValues(_)
        )
    }
}

/// Result type alias for Cast operations.
pub type Result<T> = std::result::Result<T, Error>;
