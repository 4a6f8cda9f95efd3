//! Error types for ClipMap
//!
//! Defines all error types used throughout the library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for ClipMap operations
#[derive(Debug, Error)]
pub enum ClipMapError {
    /// Configuration loading errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while loading the clip configuration
/// or one of its referenced mapping tables
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file not found
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    /// Mapping table resource not found
    #[error("Mapping file not found: {} (referenced by entry '{primary}')", path.display())]
    MappingNotFound { path: PathBuf, primary: String },

    /// Malformed XML document read from a file
    #[error("Invalid XML in {}: {source}", path.display())]
    InvalidXml {
        path: PathBuf,
        #[source]
        source: quick_xml::DeError,
    },

    /// Malformed XML from an in-memory document (no path context)
    #[error("Invalid XML document: {0}")]
    InvalidDocument(#[from] quick_xml::DeError),

    /// I/O error during loading
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for ClipMap operations
pub type Result<T> = std::result::Result<T, ClipMapError>;

/// Result type alias for configuration loading
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
