//! Error types for sanitization and canary operations.

use thiserror::Error;

/// Errors that can occur during content sanitization (CDR).
///
/// # Security Note
///
/// When sanitization fails, the safe default is to reject the content.
/// Never pass unsanitized content further through the pipeline.
#[derive(Debug, Error)]
pub enum SanitizeError {
    /// Content exceeds the maximum size the sanitizer will process.
    #[error("content too large: {size} bytes (max: {max})")]
    TooLarge {
        /// Actual size of the content.
        size: usize,
        /// Maximum allowed size.
        max: usize,
    },

    /// Generic sanitization failure (e.g. malformed JSON).
    #[error("sanitization failed: {0}")]
    Failed(String),
}
