//! Error types for layerconf
//!
//! Only construction can fail. Lookups never return errors: a value that
//! cannot be coerced resolves to the zero value of the requested type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for layerconf operations
pub type LayerconfResult<T> = Result<T, LayerconfError>;

/// Main error type for layerconf operations
#[derive(Error, Debug)]
pub enum LayerconfError {
    /// A layer failed to parse in the declared format
    #[error("failed to parse layer {index} as {format}: {message}")]
    Parse {
        /// Zero-based position of the failing reader
        index: usize,
        format: String,
        message: String,
    },

    /// The parser has no grammar for the declared format
    #[error("unsupported config type '{format}'")]
    UnsupportedFormat { format: String },

    /// A layer could not be read from disk
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A parsed layer was not a mapping at its root
    #[error("layer {index} is not a mapping at the top level")]
    NotAMapping { index: usize },
}
