//! Error types for the pattern catalog.

use thiserror::Error;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors that can occur while loading, compiling, or querying the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A pattern's regex source failed to compile.
    #[error("pattern '{id}' has an invalid regex: {source}")]
    InvalidRegex {
        /// Pattern identifier.
        id: String,
        /// Underlying regex compilation error.
        #[source]
        source: regex::Error,
    },

    /// The catalog JSON could not be parsed.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// Reading or writing the catalog file failed.
    #[error("catalog I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog ended up with no usable patterns after load.
    #[error("catalog is empty after load: every pattern failed to compile")]
    Empty,
}
