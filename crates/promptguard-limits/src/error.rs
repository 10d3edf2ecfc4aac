//! Error types for time and resource limits.

use thiserror::Error;

/// Result type alias for limits operations.
pub type Result<T> = std::result::Result<T, LimitsError>;

#[derive(Debug, Error)]
pub enum LimitsError {
    /// A detector's allotted time slice elapsed before it produced a result.
    #[error("detector '{detector}' timed out after {elapsed_ms}ms (slice: {slice_ms}ms)")]
    SliceExhausted {
        detector: String,
        elapsed_ms: u64,
        slice_ms: u64,
    },

    /// The estimated working set for this request exceeds the configured
    /// resource guard, so parallel dispatch was downgraded to sequential.
    #[error("estimated working set {estimated_bytes} exceeds guard {limit_bytes}")]
    ResourceGuardTripped {
        estimated_bytes: usize,
        limit_bytes: usize,
    },
}
