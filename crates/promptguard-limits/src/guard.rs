//! # Resource Guard
//!
//! Parallel detector dispatch is cheap for ordinary inputs but can balloon
//! on pathological ones (a multi-megabyte prompt fanned out to 8 detectors
//! at once). Querying actual process memory per request is expensive and
//! platform-specific; instead, following the gas-budget idiom of a cheap
//! proxy over real measurement, we estimate the working set from input
//! length and fall back to sequential dispatch when the estimate is too
//! high.

/// Rough bytes of working memory a single detector needs per input byte
/// (compiled regex state, intermediate string copies, match buffers).
const BYTES_PER_DETECTOR_PER_INPUT_BYTE: usize = 4;

/// Estimated total working set for dispatching `detector_count` detectors
/// in parallel over an input of `input_len` bytes.
pub fn estimate_working_set(input_len: usize, detector_count: usize) -> usize {
    input_len
        .saturating_mul(detector_count)
        .saturating_mul(BYTES_PER_DETECTOR_PER_INPUT_BYTE)
}

/// `true` if parallel dispatch should be downgraded to sequential for this
/// request, given `max_memory_bytes` from configuration.
pub fn should_run_sequentially(input_len: usize, detector_count: usize, max_memory_bytes: usize) -> bool {
    estimate_working_set(input_len, detector_count) > max_memory_bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_input_stays_parallel() {
        assert!(!should_run_sequentially(1_000, 8, 512 * 1024 * 1024));
    }

    #[test]
    fn huge_input_falls_back_to_sequential() {
        assert!(should_run_sequentially(100_000_000, 8, 512 * 1024 * 1024));
    }

    #[test]
    fn estimate_scales_with_detectors_and_length() {
        assert_eq!(estimate_working_set(100, 8), 100 * 8 * 4);
    }
}
